//! Notification publishing
//!
//! Fire-and-forget delivery of user-facing notifications. The publisher
//! owns transport and retry; callers treat a failed publish as non-fatal.

mod email;

pub use email::{EmailSender, NoopEmailSender};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::user::UserId;
use crate::Result;

/// Severity attached to a published notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    Info,
    Success,
    Warn,
    Error,
    Fatal,
}

/// Payload of a published notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationData {
    pub message: String,
}

impl NotificationData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Publisher for user-facing notification events.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(
        &self,
        event: &str,
        data: &NotificationData,
        severity: NotificationSeverity,
        recipients: &[UserId],
    ) -> Result<()>;
}

/// Publisher that only emits a tracing event.
#[derive(Debug, Default)]
pub struct TracingNotificationPublisher;

#[async_trait]
impl NotificationPublisher for TracingNotificationPublisher {
    async fn publish(
        &self,
        event: &str,
        data: &NotificationData,
        severity: NotificationSeverity,
        recipients: &[UserId],
    ) -> Result<()> {
        tracing::info!(
            event = %event,
            ?severity,
            ?recipients,
            message = %data.message,
            "notification published"
        );
        Ok(())
    }
}
