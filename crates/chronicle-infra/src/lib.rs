//! # Chronicle Infrastructure
//!
//! Concrete implementations of the ports defined in `chronicle-core`.
//! This crate contains the database repositories, the mail transport, and
//! the auth and rate-limiting services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external backends, in-memory/logging adapters only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Rate limiting via governor
//! - `smtp` - SMTP mail transport via lettre

pub mod database;
pub mod mailer;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use mailer::{InMemoryMailer, LogMailer};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "smtp")]
pub use mailer::{SmtpConfig, SmtpMailer};
