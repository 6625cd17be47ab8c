//! Integration tests for the smart-news headline aggregator
//!
//! These tests verify the full workflow from configuration loading
//! through the upstream relay, ranking and page rendering.

use std::io::Write;
use tempfile::NamedTempFile;

mod common {
    use std::sync::Arc;

    use axum::Router;
    use serde_json::{json, Value};
    use smart_news::config::Config;
    use smart_news::relay::NewsClient;
    use smart_news::routes::{self, AppState};
    use smart_news::weather::WeatherClient;

    /// Config pointing both upstream APIs at a mock server
    pub fn config_for(uri: &str) -> Config {
        let mut config = Config::default();
        config.news_api.base_url = uri.to_string();
        config.news_api.api_key = Some("integration-key".to_string());
        config.weather.base_url = uri.to_string();
        config
    }

    pub fn create_app(config: &Config) -> Router {
        let state = Arc::new(AppState {
            news: NewsClient::new(&config.news_api).unwrap(),
            weather: WeatherClient::new(&config.weather).unwrap(),
            ranking: config.ranking.clone(),
        });
        routes::router(state, &config.static_dir)
    }

    pub fn article(title: &str, source: &str, image: Option<&str>) -> Value {
        json!({
            "source": {"id": null, "name": source},
            "author": null,
            "title": title,
            "description": null,
            "url": format!("https://news.example.com/{}", title.replace(' ', "-")),
            "urlToImage": image,
            "publishedAt": "2024-12-09T10:00:00Z",
            "content": null
        })
    }
}

#[cfg(test)]
mod config_integration_tests {
    use super::*;
    use smart_news::config::Config;

    #[test]
    fn test_load_actual_news_config() {
        // Test loading the actual news.toml from the project
        let config = Config::load("news.toml");
        assert!(config.is_ok(), "Failed to load news.toml: {:?}", config.err());

        let config = config.unwrap();
        assert_eq!(config.news_api.page_size, 20);
        assert!(config.ranking.picks > 0, "picks should be positive");
        assert!(!config.ranking.major_sources.is_empty());
    }

    #[test]
    fn test_config_from_file() {
        let toml_content = r#"
            bind = "127.0.0.1:5050"

            [news_api]
            page_size = 10
            timeout_secs = 3

            [ranking]
            major_sources = ["Reuters", "AP"]
            picks = 2
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.bind, "127.0.0.1:5050");
        assert_eq!(config.news_api.page_size, 10);
        assert_eq!(config.news_api.timeout_secs, 3);
        assert_eq!(config.ranking.major_sources, vec!["Reuters", "AP"]);
        assert_eq!(config.ranking.picks, 2);
        // Untouched sections keep their defaults
        assert_eq!(config.weather.fallback_city, "Islamabad");
    }
}

#[cfg(test)]
mod relay_integration_tests {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_api_news_relays_category_request() {
        let server = MockServer::start().await;
        let upstream = json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [article("Markets rally", "Reuters", None)]
        });
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("apiKey", "integration-key"))
            .and(query_param("category", "business"))
            .and(query_param("country", "us"))
            .and(query_param("pageSize", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let app = create_app(&config_for(&server.uri()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news?category=business")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, upstream);
    }
}

#[cfg(test)]
mod page_integration_tests {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn body_of(app: axum::Router, uri: &str) -> String {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_section_page_then_news_partial() {
        let server = MockServer::start().await;
        Mock::given(path("/top-headlines"))
            .and(query_param("q", "pakistan"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 4,
                "articles": [
                    article("Short one", "Dawn", None),
                    article("Imaged", "Dawn", Some("https://img.example.com/1.jpg")),
                    article("A fairly long headline that clearly passes forty characters", "Al Jazeera English", Some("https://img.example.com/2.jpg")),
                    article("Wire copy", "Reuters", None)
                ]
            })))
            .mount(&server)
            .await;

        let config = config_for(&server.uri());

        // The page shell points the news container at the Local section query
        let page = body_of(create_app(&config), "/section/local").await;
        assert!(page.contains("/partials/news?q=pakistan"));

        // Following that link yields the ranked fragment
        let fragment = body_of(create_app(&config), "/partials/news?q=pakistan").await;

        let hero = fragment
            .find("<h1>A fairly long headline that clearly passes forty characters</h1>")
            .expect("hero rendered");
        let wire = fragment.find("<h2>Wire copy</h2>").expect("wire card");
        let imaged = fragment.find("<h2>Imaged</h2>").expect("imaged card");
        let short = fragment.find("<h2>Short one</h2>").expect("short card");

        // 30, then 15, then 10, then 0
        assert!(hero < wire);
        assert!(wire < imaged);
        assert!(imaged < short);

        assert_eq!(fragment.matches("class=\"pick-card\"").count(), 3);
    }

    #[tokio::test]
    async fn test_news_partial_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(path("/top-headlines"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fragment = body_of(create_app(&config_for(&server.uri())), "/partials/news").await;
        assert!(fragment.contains("Failed to fetch news."));
        assert!(!fragment.contains("news-card"));
    }

    #[tokio::test]
    async fn test_static_assets_are_served() {
        let config = config_for("http://127.0.0.1:1");
        let css = body_of(create_app(&config), "/static/css/style.css").await;
        assert!(css.contains(".news-card"));
    }
}
