use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::NewItemPenalty;

/// Where committed snapshots go
#[derive(Clone, Debug, PartialEq)]
pub enum StoreBackend {
    /// Google Cloud Storage bucket
    Gcs {
        base_url: String,
        bucket: String,
        /// Pre-issued OAuth token, passed through as a bearer header
        access_token: Option<String>,
    },
    /// Local directory
    Filesystem { dir: PathBuf },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub feed_url: String,
    pub user_agent: String,
    pub http_timeout: Option<Duration>,
    pub store: StoreBackend,
    /// Object (or file) name of the cached page
    pub cache_object: String,
    pub cache_content_type: String,
    pub template_path: PathBuf,
    pub new_item_penalty: NewItemPenalty,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                format!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw)
            })?)),
            None => None,
        };

        let store = match var("STORE_BACKEND", "gcs").to_ascii_lowercase().as_str() {
            "gcs" => StoreBackend::Gcs {
                base_url: var("GCS_BASE_URL", "https://storage.googleapis.com"),
                bucket: var("GCS_BUCKET", "www.f6oclock.com"),
                access_token: lookup("GCS_ACCESS_TOKEN").filter(|t| !t.is_empty()),
            },
            "fs" | "filesystem" => StoreBackend::Filesystem {
                dir: PathBuf::from(var("OUTPUT_DIR", "./public")),
            },
            other => {
                return Err(format!(
                    "STORE_BACKEND must be 'gcs' or 'fs', got '{}'",
                    other
                ))
            }
        };

        let new_item_penalty = var("NEW_ITEM_PENALTY", "previous-len").parse()?;

        Ok(Self {
            feed_url: var(
                "FEED_URL",
                "https://www.reddit.com/r/politics/rising.json",
            ),
            user_agent: var("FEED_USER_AGENT", "f6oclock/1.0.0"),
            http_timeout,
            store,
            cache_object: var("CACHE_OBJECT", "index.html"),
            cache_content_type: var("CACHE_CONTENT_TYPE", "text/html; charset=utf-8"),
            template_path: PathBuf::from(var("TEMPLATE_PATH", "../index.html")),
            new_item_penalty,
        })
    }
}
