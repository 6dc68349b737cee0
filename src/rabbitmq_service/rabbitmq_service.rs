use crate::config::MAIL_QUEUE;
use lapin::{BasicProperties, Connection, ConnectionProperties, options::*};
use serde_json::json;

pub struct RabbitMQService;

impl RabbitMQService {
    pub async fn new(uri: &str) -> Result<Connection, anyhow::Error> {
        Connection::connect(uri, ConnectionProperties::default())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to RabbitMQ: {}", e))
    }

    pub async fn create_mail_queue(connection: &Connection) -> Result<(), anyhow::Error> {
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create RabbitMQ channel: {}", e))?;

        channel
            .queue_declare(
                MAIL_QUEUE,
                QueueDeclareOptions::default(),
                Default::default(),
            )
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create RabbitMQ queue: {}", e))?;

        Ok(())
    }

    pub async fn publish_to_mail_queue(
        connection: &Connection,
        to: &str,
        subject: &str,
        email_data: &str,
    ) -> Result<(), anyhow::Error> {
        let standard_msg = mail_message(to, subject, email_data);

        let channel = connection.create_channel().await?;

        channel
            .basic_publish(
                "",
                MAIL_QUEUE,
                BasicPublishOptions::default(),
                standard_msg.to_string().as_bytes(),
                BasicProperties::default(),
            )
            .await?;

        Ok(())
    }
}

/// Envelope understood by the mail worker.
fn mail_message(to: &str, subject: &str, text: &str) -> serde_json::Value {
    json!({
        "pattern": "send-email",
        "data": {
            "to": to,
            "subject": subject,
            "text": text
        }
    })
}
