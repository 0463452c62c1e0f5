//! Application state - shared across all handlers.

use std::sync::Arc;

use chronicle_core::ports::{
    CommentRepository, Mailer, PostRepository, TagRepository, UserRepository,
};
use chronicle_infra::database::DbConn;
use chronicle_infra::mailer::LogMailer;
use chronicle_infra::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Wire repositories and the mailer from an open database connection.
    pub fn new(config: AppConfig, db: DbConn) -> Self {
        let mailer = build_mailer(&config);

        let state = Self {
            config: Arc::new(config),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            users: Arc::new(PostgresUserRepository::new(db)),
            mailer,
        };

        tracing::info!("Application state initialized");
        state
    }
}

/// SMTP when configured, otherwise a mailer that only logs. Share-by-email
/// is best effort, so a missing or broken SMTP setup degrades rather than
/// preventing startup.
fn build_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    if let Some(settings) = &config.smtp {
        use chronicle_infra::{SmtpConfig, SmtpMailer};

        match SmtpMailer::new(SmtpConfig {
            relay: settings.relay.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            from: settings.from.clone(),
        }) {
            Ok(mailer) => {
                tracing::info!(relay = %settings.relay, "SMTP mailer configured");
                return Arc::new(mailer);
            }
            Err(e) => {
                tracing::error!("Failed to build SMTP mailer: {}. Falling back to logging.", e);
                return Arc::new(LogMailer);
            }
        }
    }

    tracing::warn!("SMTP_RELAY not set. Outbound email will be logged, not sent.");
    Arc::new(LogMailer)
}
