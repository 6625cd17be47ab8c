//! Article model and the pure helpers used to rank and present headlines.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub source: Option<Source>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl Article {
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Image URL, treating an empty string as no image.
    pub fn image(&self) -> Option<&str> {
        self.url_to_image.as_deref().filter(|s| !s.is_empty())
    }
}

/// Body of a `top-headlines` response. `articles` is `None` when the
/// upstream answered without an article list (for example an error body).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Headlines {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub articles: Option<Vec<Article>>,
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compact relative age such as `42s`, `5m`, `3h` or `2d`.
///
/// Returns an empty string when `published` is missing or not RFC 3339.
/// Timestamps in the future count as zero seconds old.
pub fn time_ago(published: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(published) = published.filter(|p| !p.is_empty()) else {
        return String::new();
    };
    let Ok(published) = DateTime::parse_from_rfc3339(published) else {
        return String::new();
    };

    let sec = (now - published.with_timezone(&Utc)).num_seconds().max(0);
    if sec < 60 {
        format!("{}s", sec)
    } else if sec < 3600 {
        format!("{}m", sec / 60)
    } else if sec < 86400 {
        format!("{}h", sec / 3600)
    } else {
        format!("{}d", sec / 86400)
    }
}

const IMAGE_BONUS: u32 = 10;
const LONG_TITLE_BONUS: u32 = 5;
/// Measured in UTF-16 code units, as browsers count string length.
const LONG_TITLE_UNITS: usize = 40;
const MAJOR_SOURCE_BONUS: u32 = 15;

pub fn score<S: AsRef<str>>(article: &Article, major_sources: &[S]) -> u32 {
    let mut score = 0;
    if article.image().is_some() {
        score += IMAGE_BONUS;
    }
    if article
        .title
        .as_deref()
        .is_some_and(|t| t.encode_utf16().count() > LONG_TITLE_UNITS)
    {
        score += LONG_TITLE_BONUS;
    }
    if let Some(name) = article.source_name().filter(|n| !n.is_empty()) {
        if major_sources.iter().any(|s| name.contains(s.as_ref())) {
            score += MAJOR_SOURCE_BONUS;
        }
    }
    score
}

/// Highest score first. Ties keep their upstream order.
pub fn rank<S: AsRef<str>>(articles: &[Article], major_sources: &[S]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by_cached_key(|a| Reverse(score(a, major_sources)));
    sorted
}

/// Up to `n` articles drawn uniformly without replacement.
pub fn pick<R: Rng + ?Sized>(articles: &[Article], n: usize, rng: &mut R) -> Vec<Article> {
    let mut copy = articles.to_vec();
    copy.shuffle(rng);
    copy.truncate(n);
    copy
}

/// Only `http` and `https` links are emitted into pages.
pub fn safe_href(url: Option<&str>) -> String {
    match url.map(Url::parse) {
        Some(Ok(parsed)) if matches!(parsed.scheme(), "http" | "https") => parsed.into(),
        _ => "#".to_string(),
    }
}
