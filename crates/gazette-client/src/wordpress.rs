use std::sync::Arc;
use std::time::Duration;

use gazette_core::error::AppError;
use gazette_core::models::Category;
use gazette_core::traits::CategorySource;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Upstream page size for the categories listing.
const CATEGORIES_PER_PAGE: u32 = 50;
const CACHE_KEY: &str = "categories";

/// Connection settings for the WordPress REST API.
#[derive(Debug, Clone)]
pub struct WordPressConfig {
    /// Base of the REST API, e.g. `https://cms.example.com/wp-json/wp/v2`.
    pub api_url: String,
    /// How long category listings are cached. Zero disables caching.
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl WordPressConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            cache_ttl: Duration::from_secs(300),
            timeout: Duration::from_secs(10),
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `WORDPRESS_API_URL` (required)
    /// - `WORDPRESS_CACHE_TTL_SECS` (optional, defaults to 300; 0 disables the cache)
    pub fn from_env() -> Result<Self, AppError> {
        let api_url = std::env::var("WORDPRESS_API_URL").map_err(|_| {
            AppError::ConfigError("WORDPRESS_API_URL not set. Required for category listing.".into())
        })?;
        let mut config = Self::new(api_url);

        if let Ok(raw) = std::env::var("WORDPRESS_CACHE_TTL_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid WORDPRESS_CACHE_TTL_SECS '{raw}': must be a non-negative integer"
                ))
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Category as returned by `GET /wp/v2/categories`. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct WpCategory {
    id: u64,
    name: String,
    slug: String,
    #[serde(default)]
    count: u64,
}

impl From<WpCategory> for Category {
    fn from(wp: WpCategory) -> Self {
        Category {
            id: wp.id,
            name: wp.name,
            slug: wp.slug,
            count: wp.count,
        }
    }
}

/// Recover the error from a cache fill shared between concurrent callers.
fn unshare(err: Arc<AppError>) -> AppError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| AppError::Upstream(shared.to_string()))
}

/// Read-only client for the WordPress REST API.
#[derive(Clone)]
pub struct WordPressClient {
    client: Client,
    categories_url: Url,
    timeout_secs: u64,
    cache: Option<Cache<&'static str, Vec<Category>>>,
}

impl WordPressClient {
    pub fn new(config: &WordPressConfig) -> Result<Self, AppError> {
        let base = config.api_url.trim_end_matches('/');
        let mut categories_url = Url::parse(&format!("{base}/categories")).map_err(|e| {
            AppError::ConfigError(format!("Invalid WORDPRESS_API_URL '{}': {e}", config.api_url))
        })?;
        categories_url
            .query_pairs_mut()
            .append_pair("per_page", &CATEGORIES_PER_PAGE.to_string());

        let client = Client::builder()
            .user_agent("Gazette/0.1")
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            client,
            categories_url,
            timeout_secs: config.timeout.as_secs(),
            cache,
        })
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, AppError> {
        let response = self
            .client
            .get(self.categories_url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "HTTP {} for {}",
                status.as_u16(),
                self.categories_url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))?;
        let categories: Vec<WpCategory> = serde_json::from_slice(&body)
            .map_err(|e| AppError::Upstream(format!("Unexpected categories payload: {e}")))?;

        tracing::debug!(count = categories.len(), "Fetched categories from WordPress");
        Ok(categories.into_iter().map(Category::from).collect())
    }
}

impl CategorySource for WordPressClient {
    async fn categories(&self) -> Result<Vec<Category>, AppError> {
        let Some(cache) = &self.cache else {
            return self.fetch_categories().await;
        };
        // Concurrent misses share one upstream request.
        cache
            .try_get_with(CACHE_KEY, self.fetch_categories())
            .await
            .map_err(unshare)
    }
}
