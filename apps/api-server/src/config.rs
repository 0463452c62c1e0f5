//! Application configuration loaded from environment variables.

use std::env;

use chronicle_infra::database::DatabaseConfig;

/// Public site identity, used for permalinks, the feed, and the sitemap.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Absolute origin the site is served from, no trailing slash.
    pub base_url: String,
    pub title: String,
    pub description: String,
}

/// SMTP settings for share-by-email.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub relay: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub site: SiteConfig,
    /// SMTP is optional; without it share-by-email logs instead of sending.
    pub smtp: Option<SmtpSettings>,
    /// Posts per page on the public listings.
    pub page_size: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let site = SiteConfig {
            base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            title: env::var("SITE_TITLE").unwrap_or_else(|_| "Chronicle".to_string()),
            description: env::var("SITE_DESCRIPTION")
                .unwrap_or_else(|_| "New posts from the Chronicle blog.".to_string()),
        };

        let smtp = env::var("SMTP_RELAY").ok().map(|relay| SmtpSettings {
            relay,
            username: env::var("SMTP_USERNAME").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| "admin@chronicle.blog".to_string()),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            site,
            smtp,
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
        }
    }
}
