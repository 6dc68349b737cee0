#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use school_manager::config::ServiceSettings;
use school_manager::services::notification::{
    EmailSender, MemoryEmailSender, NotificationError, SharedEmailSender,
};
use school_manager::state::AppState;
use school_manager::utils::jwt::JwtManager;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Fresh in-memory database with the full schema. A single connection keeps
/// every query on the same in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite connects");
    Migrator::up(&db, None).await.expect("migrations apply");
    db
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        login_url: "https://portal.test/login".to_string(),
        hash_cost: 4,
        ..ServiceSettings::default()
    }
}

/// Always fails, to exercise best-effort delivery.
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Delivery("smtp relay unreachable".to_string()))
    }
}

pub fn memory_sender() -> (Arc<MemoryEmailSender>, SharedEmailSender) {
    let sender = Arc::new(MemoryEmailSender::new());
    let shared: SharedEmailSender = sender.clone();
    (sender, shared)
}

pub fn test_state(db: DatabaseConnection, email_sender: SharedEmailSender) -> AppState {
    AppState {
        db,
        email_sender,
        settings: test_settings(),
        jwt: Arc::new(JwtManager::new(TEST_JWT_SECRET, 3600)),
        app_env: "test".to_string(),
    }
}

pub const TEACHER_HEADER: &str = "first_name,middle_name,last_name,gender,date_of_birth,email,phone,address,national_id_number,qualification,specialization,employment_status,hire_date";

/// A valid csv data line for the header above.
pub fn teacher_csv_row(n: usize) -> String {
    format!(
        "Teacher{n},,Lastname{n},M,1985-05-15,teacher{n}@school.test,024123456{d},,,bachelor,Mathematics,permanent,2020-09-01",
        d = n % 10
    )
}

pub fn teacher_csv(rows: &[String]) -> Vec<u8> {
    let mut csv = String::from(TEACHER_HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv.into_bytes()
}
