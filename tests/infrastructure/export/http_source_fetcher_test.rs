use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docuchat::application::ports::SourceFetcher;
use docuchat::infrastructure::export::HttpSourceFetcher;

#[tokio::test]
async fn given_file_served_at_path_when_fetching_then_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/src/main.rs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fn main() {}"))
        .mount(&server)
        .await;
    let fetcher = HttpSourceFetcher::new(server.uri());

    assert_eq!(fetcher.fetch("src/main.rs").await.unwrap(), "fn main() {}");
}

#[tokio::test]
async fn given_file_only_served_at_root_when_fetching_then_falls_back_to_file_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/main.rs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fn main() {}"))
        .mount(&server)
        .await;
    let fetcher = HttpSourceFetcher::new(format!("{}/", server.uri()));

    assert_eq!(fetcher.fetch("src/main.rs").await.unwrap(), "fn main() {}");
}

#[tokio::test]
async fn given_file_not_served_when_fetching_then_returns_error() {
    let server = MockServer::start().await;
    let fetcher = HttpSourceFetcher::new(server.uri());

    assert!(fetcher.fetch("src/main.rs").await.is_err());
}
