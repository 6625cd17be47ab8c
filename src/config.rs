use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub news_api: NewsApiConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_static_dir() -> String {
    "public".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsApiConfig {
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            page_size: default_page_size(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_fallback_city")]
    pub fallback_city: String,
    #[serde(default = "default_fallback_lat")]
    pub fallback_lat: f64,
    #[serde(default = "default_fallback_lon")]
    pub fallback_lon: f64,
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_fallback_city() -> String {
    "Islamabad".to_string()
}

fn default_fallback_lat() -> f64 {
    33.6844
}

fn default_fallback_lon() -> f64 {
    73.0479
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            fallback_city: default_fallback_city(),
            fallback_lat: default_fallback_lat(),
            fallback_lon: default_fallback_lon(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    /// Source names that earn the major-source bonus (substring match)
    #[serde(default = "default_major_sources")]
    pub major_sources: Vec<String>,
    /// Number of random picks shown in the sidebar
    #[serde(default = "default_picks")]
    pub picks: usize,
}

fn default_major_sources() -> Vec<String> {
    ["BBC", "CNN", "Reuters", "The Guardian", "Al Jazeera"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_picks() -> usize {
    3
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            major_sources: default_major_sources(),
            picks: default_picks(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
            news_api: NewsApiConfig::default(),
            weather: WeatherConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Overlay values taken from the environment.
    pub fn apply_env(&mut self) {
        self.apply_api_key(std::env::var("NEWS_API_KEY").ok());
    }

    fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.news_api.api_key = Some(key);
        }
    }
}
