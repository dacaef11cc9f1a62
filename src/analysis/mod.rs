pub mod activity;
pub mod aggregator;
pub mod languages;
pub mod personality;
pub mod pipeline;

pub use aggregator::{aggregate, Aggregator};
pub use pipeline::WrappedPipeline;
