use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, warn};

use crate::clock::format_datetime;
use crate::config::RankingConfig;
use crate::query::{NewsQuery, Section};
use crate::relay::{NewsClient, RelayError};
use crate::render::{load_news, NewsFragment};
use crate::weather::{WeatherClient, WeatherView};

pub struct AppState {
    pub news: NewsClient,
    pub weather: WeatherClient,
    pub ranking: RankingConfig,
}

pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/section/:slug", get(section))
        .route("/search", get(search))
        .route("/partials/news", get(news_partial))
        .route("/partials/weather", get(weather_partial))
        .route("/partials/clock", get(clock_partial))
        .route("/api/news", get(api_news))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(index)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub clock: String,
    pub nav: Vec<NavItem>,
    pub search: String,
    pub news_query: String,
}

pub struct NavItem {
    pub label: &'static str,
    pub slug: &'static str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "clock.html")]
pub struct ClockTemplate {
    pub clock: String,
}

#[derive(Template)]
#[template(path = "weather.html")]
pub struct WeatherTemplate {
    pub weather: WeatherView,
}

impl IndexTemplate {
    fn new(active: Option<Section>, search: &str, query: &NewsQuery) -> Self {
        let nav = Section::ALL
            .into_iter()
            .map(|s| NavItem {
                label: s.label(),
                slug: s.slug(),
                active: Some(s) == active,
            })
            .collect();

        Self {
            clock: format_datetime(&Local::now()),
            nav,
            search: search.to_string(),
            news_query: query.to_query_string(),
        }
    }

    fn for_section(section: Section) -> Self {
        Self::new(Some(section), "", &section.query())
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Relay failures surface as a JSON error body
pub struct AppError(RelayError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Failed to fetch news: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch news" })),
        )
            .into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        AppError(err)
    }
}

// Route handlers
pub async fn index() -> impl IntoResponse {
    HtmlTemplate(IndexTemplate::for_section(Section::Home))
}

pub async fn section(Path(slug): Path<String>) -> impl IntoResponse {
    HtmlTemplate(IndexTemplate::for_section(Section::from_key(&slug)))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search(Query(query): Query<SearchQuery>) -> impl IntoResponse {
    let q = query.q.trim();
    if q.is_empty() {
        return HtmlTemplate(IndexTemplate::for_section(Section::Home));
    }
    HtmlTemplate(IndexTemplate::new(None, q, &NewsQuery::search(q)))
}

pub async fn news_partial(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> impl IntoResponse {
    let news = load_news(&state.news, &query, &state.ranking, Utc::now()).await;
    HtmlTemplate(NewsFragment { news })
}

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

pub async fn weather_partial(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> impl IntoResponse {
    let coords = query.lat.zip(query.lon);
    let weather = state.weather.load(coords).await;
    HtmlTemplate(WeatherTemplate { weather })
}

pub async fn clock_partial() -> impl IntoResponse {
    HtmlTemplate(ClockTemplate {
        clock: format_datetime(&Local::now()),
    })
}

pub async fn api_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (status, body) = state.news.fetch_raw(&query).await?;
    if !status.is_success() {
        warn!("Upstream answered {}, relaying its body", status);
    }
    Ok(Json(body))
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
