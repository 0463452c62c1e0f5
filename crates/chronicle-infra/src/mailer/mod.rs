//! Mail transport implementations.

mod memory;

#[cfg(feature = "smtp")]
mod smtp;

pub use memory::{InMemoryMailer, LogMailer};

#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};
