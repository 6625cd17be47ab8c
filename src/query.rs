use serde::Deserialize;

/// Query string accepted by `/api/news` and the news partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl NewsQuery {
    pub fn category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            q: None,
        }
    }

    pub fn search(q: &str) -> Self {
        Self {
            category: None,
            q: Some(q.to_string()),
        }
    }

    /// Parameters for the upstream `top-headlines` call, excluding the key
    /// and page size. Category wins over keyword; blank values are ignored.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        let category = non_blank(self.category.as_deref());
        let q = non_blank(self.q.as_deref());

        match (category, q) {
            (Some("local"), _) => vec![("country", "pk".to_string())],
            (Some(category), _) => vec![
                ("category", category.to_string()),
                ("country", "us".to_string()),
            ],
            (None, Some(q)) => vec![("q", q.to_string()), ("language", "en".to_string())],
            (None, None) => vec![
                ("category", "general".to_string()),
                ("country", "us".to_string()),
            ],
        }
    }

    /// Query string for re-requesting this selection from the news partial.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(category) = non_blank(self.category.as_deref()) {
            serializer.append_pair("category", category);
        } else if let Some(q) = non_blank(self.q.as_deref()) {
            serializer.append_pair("q", q);
        }
        serializer.finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    ForYou,
    Following,
    Politics,
    World,
    Local,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Section {
    pub const ALL: [Section; 12] = [
        Section::Home,
        Section::ForYou,
        Section::Following,
        Section::Politics,
        Section::World,
        Section::Local,
        Section::Business,
        Section::Technology,
        Section::Entertainment,
        Section::Sports,
        Section::Science,
        Section::Health,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::ForYou => "For You",
            Section::Following => "Following",
            Section::Politics => "Politics",
            Section::World => "World",
            Section::Local => "Local",
            Section::Business => "Business",
            Section::Technology => "Technology",
            Section::Entertainment => "Entertainment",
            Section::Sports => "Sports",
            Section::Science => "Science",
            Section::Health => "Health",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::ForYou => "for-you",
            Section::Following => "following",
            Section::Politics => "politics",
            Section::World => "world",
            Section::Local => "local",
            Section::Business => "business",
            Section::Technology => "technology",
            Section::Entertainment => "entertainment",
            Section::Sports => "sports",
            Section::Science => "science",
            Section::Health => "health",
        }
    }

    pub fn query(self) -> NewsQuery {
        match self {
            Section::Home | Section::ForYou | Section::Following => NewsQuery::category("general"),
            Section::Politics => NewsQuery::search("politics"),
            Section::World => NewsQuery::search("world"),
            Section::Local => NewsQuery::search("pakistan"),
            Section::Business => NewsQuery::category("business"),
            Section::Technology => NewsQuery::category("technology"),
            Section::Entertainment => NewsQuery::category("entertainment"),
            Section::Sports => NewsQuery::category("sports"),
            Section::Science => NewsQuery::category("science"),
            Section::Health => NewsQuery::category("health"),
        }
    }

    /// Match a nav label ("For You") or slug ("for-you"), ignoring case and
    /// surrounding whitespace.
    pub fn lookup(key: &str) -> Option<Section> {
        let key = key.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.slug() == key || s.label().to_lowercase() == key)
    }

    /// Like [`Section::lookup`] but unknown keys map to the home feed.
    pub fn from_key(key: &str) -> Section {
        Self::lookup(key).unwrap_or(Section::Home)
    }
}
