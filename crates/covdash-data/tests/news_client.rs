//! Integration tests for `NewsClient` using wiremock HTTP mocks.

use covdash_data::{DataError, NewsClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NewsClient {
    NewsClient::with_base_url("test-key", 5, "covdash-tests/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn top_headlines_sends_key_header_and_parses_articles() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            { "title": "Cases fall for fifth day", "description": "Seven-day average drops." },
            { "title": "Booster rollout widens", "description": null }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("q", "Covid COVID-19 coronavirus"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let articles = client
        .top_headlines("Covid COVID-19 coronavirus")
        .await
        .expect("should parse headlines");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Cases fall for fifth day");
    assert_eq!(
        articles[0].description.as_deref(),
        Some("Seven-day average drops.")
    );
    assert_eq!(articles[1].description, None);
}

#[tokio::test]
async fn articles_without_usable_titles_are_dropped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "articles": [
            { "title": null, "description": "removed article" },
            { "title": "   ", "description": "blank title" },
            { "title": "Kept headline", "description": "ok" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let articles = client.top_headlines("covid").await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Kept headline");
}

#[tokio::test]
async fn missing_articles_array_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let articles = client.top_headlines("covid").await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn unauthorized_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.top_headlines("covid").await.unwrap_err();
    assert!(matches!(err, DataError::Http(_)), "got: {err:?}");
}
