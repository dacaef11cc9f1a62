pub mod payload;
pub mod summary;

pub use payload::*;
pub use summary::*;
