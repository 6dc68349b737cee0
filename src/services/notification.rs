//! Outbound credential notifications.

use std::sync::Arc;

use async_trait::async_trait;
use lapin::Connection;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::rabbitmq_service::rabbitmq_service::RabbitMQService;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::Delivery(msg) => AppError::DeliveryError(msg),
        }
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

pub type SharedEmailSender = Arc<dyn EmailSender>;

/// Publishes messages on the `mail_service` queue consumed by the mail worker.
pub struct RabbitMqEmailSender {
    connection: Arc<Connection>,
}

impl RabbitMqEmailSender {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl EmailSender for RabbitMqEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        RabbitMQService::publish_to_mail_queue(&self.connection, to, subject, body)
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))
    }
}

/// Local development sender: records that a message would have gone out.
/// The body is never logged since it carries a plaintext password.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotificationError> {
        tracing::info!(recipient = %to, subject = %subject, "Email delivery skipped (log sender)");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every message in memory instead of delivering it.
#[derive(Debug, Default, Clone)]
pub struct MemoryEmailSender {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailSender for MemoryEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent.lock().await.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_sender_keeps_messages_in_order() {
        let sender = MemoryEmailSender::new();
        sender.send("a@example.com", "first", "one").await.unwrap();
        sender.send("b@example.com", "second", "two").await.unwrap();

        let sent = sender.sent_emails().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[1].subject, "second");
    }

    #[test]
    fn delivery_error_maps_to_app_error() {
        let err: AppError = NotificationError::Delivery("broker down".into()).into();
        assert!(matches!(err, AppError::DeliveryError(msg) if msg == "broker down"));
    }
}
