//! Non-SMTP mailers: a tracing fallback and an in-memory capture for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use chronicle_core::ports::{MailError, Mailer, OutboundEmail};

/// Mailer used when SMTP is not configured: logs the message instead of
/// sending it. Share-by-email is best effort, so this keeps the endpoint
/// working in development.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "SMTP not configured; logging outbound email instead of sending"
        );
        Ok(())
    }
}

/// Mailer that captures sent messages for assertions in tests.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer lock").push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_mailer_captures_sends() {
        let mailer = InMemoryMailer::new();

        mailer
            .send(OutboundEmail {
                to: "friend@example.com".to_string(),
                subject: "Hi".to_string(),
                body: "Read this".to_string(),
            })
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "friend@example.com");
    }
}
