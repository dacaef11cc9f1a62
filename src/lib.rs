pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod analysis;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{DataSource, GitHubClient};
pub use analysis::{aggregate, Aggregator, WrappedPipeline};
pub use models::{RawPayload, WrappedSummary};
