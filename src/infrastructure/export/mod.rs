mod http_source_fetcher;
mod local_source_fetcher;

pub use http_source_fetcher::HttpSourceFetcher;
pub use local_source_fetcher::LocalSourceFetcher;
