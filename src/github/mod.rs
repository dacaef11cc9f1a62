pub mod client;
pub mod list_fetcher;
pub mod source;

pub use client::GitHubClient;
pub use list_fetcher::ListFetcher;
pub use source::DataSource;
