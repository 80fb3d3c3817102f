use async_trait::async_trait;

use crate::Result;

/// Outbound email side-channel.
///
/// The default implementation drops messages; deployments that want real
/// delivery plug in their own transport.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Sender that discards every message.
#[derive(Debug, Default)]
pub struct NoopEmailSender;

#[async_trait]
impl EmailSender for NoopEmailSender {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}
