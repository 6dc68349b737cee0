use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::ServiceSettings;
use crate::services::notification::SharedEmailSender;
use crate::services::{
    AccountProvisioner, BulkTeacherImporter, StudentService, TeacherService,
};
use crate::utils::jwt::JwtManager;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub email_sender: SharedEmailSender,
    pub settings: ServiceSettings,
    pub jwt: Arc<JwtManager>,
    pub app_env: String,
}

impl AppState {
    pub fn provisioner(&self) -> AccountProvisioner {
        AccountProvisioner::new(
            self.db.clone(),
            self.email_sender.clone(),
            self.settings.clone(),
        )
    }

    pub fn teacher_service(&self) -> TeacherService {
        TeacherService::new(
            self.db.clone(),
            self.email_sender.clone(),
            self.settings.clone(),
        )
    }

    pub fn student_service(&self) -> StudentService {
        StudentService::new(
            self.db.clone(),
            self.email_sender.clone(),
            self.settings.clone(),
        )
    }

    pub fn importer(&self) -> BulkTeacherImporter {
        BulkTeacherImporter::new(
            self.db.clone(),
            self.email_sender.clone(),
            self.settings.clone(),
        )
    }
}
