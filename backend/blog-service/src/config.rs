/// Configuration management for Blog Service
///
/// Values come from environment variables (optionally loaded from a `.env`
/// file by the binaries before calling [`Config::from_env`]).
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Uploaded media (post images)
    pub media: MediaConfig,
    /// Presentation settings shared by all pages
    pub site: SiteConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Media configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Public URL prefix, always starting and ending with `/`
    pub url: String,
    /// Directory the files are served from
    pub root: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            url: "/media/".to_string(),
            root: "media".to_string(),
        }
    }
}

impl MediaConfig {
    /// Public URL of a stored image path.
    pub fn url_for(&self, image: &str) -> String {
        format!("{}{}", self.url, image.trim_start_matches('/'))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let port = match std::env::var("BLOG_SERVICE_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| format!("Failed to parse BLOG_SERVICE_PORT='{}': {}", raw, e))?,
            Err(_) => 8000,
        };

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if app_env.eq_ignore_ascii_case("production") => {
                return Err("DATABASE_URL must be set in production".to_string())
            }
            Err(_) => "postgresql://localhost/sensive_blog".to_string(),
        };

        let media_url = std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string());
        if !media_url.starts_with('/') || !media_url.ends_with('/') {
            return Err(format!(
                "MEDIA_URL must start and end with '/', got '{}'",
                media_url
            ));
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            media: MediaConfig {
                url: media_url,
                root: std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()),
            },
            site: SiteConfig {
                title: std::env::var("SITE_TITLE").unwrap_or_else(|_| "Sensive Blog".to_string()),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
