//! Turns fetched headlines into the view models the templates print.
//!
//! Every string stored in a card is already HTML-escaped, so templates
//! emit them with `|safe`.

use askama::Template;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::error;

use crate::article::{escape_html, pick, rank, safe_href, time_ago, Article, Headlines};
use crate::config::RankingConfig;
use crate::query::NewsQuery;
use crate::relay::{NewsClient, RelayError};

/// Hero or regular news card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub image: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub source: String,
    pub published: String,
    pub href: String,
}

impl Card {
    pub fn from_article(article: &Article, now: DateTime<Utc>) -> Self {
        Self {
            image: image_src(article),
            title: escape_html(article.title.as_deref().unwrap_or("")),
            description: article
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(escape_html),
            source: escape_html(
                article
                    .source_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or("Unknown"),
            ),
            published: time_ago(article.published_at.as_deref(), now),
            href: escape_html(&safe_href(article.url.as_deref())),
        }
    }
}

/// Compact sidebar card for a random pick.
#[derive(Debug, Clone, PartialEq)]
pub struct PickCard {
    pub image: Option<String>,
    pub alt: String,
    pub title: String,
    pub href: String,
}

impl PickCard {
    pub fn from_article(article: &Article) -> Self {
        let title = article.title.as_deref().unwrap_or("");
        Self {
            image: image_src(article),
            alt: escape_html(title),
            title: escape_html(if title.is_empty() { "Untitled" } else { title }),
            href: escape_html(&safe_href(article.url.as_deref())),
        }
    }
}

fn image_src(article: &Article) -> Option<String> {
    article
        .image()
        .map(|src| safe_href(Some(src)))
        .filter(|src| src != "#")
        .map(|src| escape_html(&src))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Front {
    pub hero: Option<Card>,
    pub cards: Vec<Card>,
    pub picks: Vec<PickCard>,
}

impl Front {
    /// Hero and cards follow the ranking; picks are drawn from the
    /// articles in upstream order.
    pub fn build<R: Rng + ?Sized>(
        articles: &[Article],
        ranking: &RankingConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let mut ranked = rank(articles, &ranking.major_sources)
            .into_iter()
            .map(|a| Card::from_article(&a, now));
        let hero = ranked.next();
        let cards = ranked.collect();

        let picks = pick(articles, ranking.picks, rng)
            .iter()
            .map(PickCard::from_article)
            .collect();

        Self { hero, cards, picks }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewsView {
    Loaded(Front),
    Empty,
    Failed,
}

impl NewsView {
    pub fn build<R: Rng + ?Sized>(
        result: Result<Headlines, RelayError>,
        ranking: &RankingConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        match result {
            Ok(Headlines {
                articles: Some(articles),
                ..
            }) => NewsView::Loaded(Front::build(&articles, ranking, now, rng)),
            Ok(_) => NewsView::Empty,
            Err(e) => {
                error!("Failed to fetch news: {}", e);
                NewsView::Failed
            }
        }
    }

    pub fn front(&self) -> Option<&Front> {
        match self {
            NewsView::Loaded(front) => Some(front),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            NewsView::Loaded(_) => None,
            NewsView::Empty => Some("No articles returned."),
            NewsView::Failed => Some("Failed to fetch news."),
        }
    }
}

/// Fetch, score and lay out the headlines for `query`.
pub async fn load_news(
    client: &NewsClient,
    query: &NewsQuery,
    ranking: &RankingConfig,
    now: DateTime<Utc>,
) -> NewsView {
    let result = client.fetch_headlines(query).await;
    NewsView::build(result, ranking, now, &mut StdRng::from_entropy())
}

/// The `#news` container contents plus an out-of-band swap of `#picks`.
#[derive(Template)]
#[template(path = "news.html")]
pub struct NewsFragment {
    pub news: NewsView,
}
