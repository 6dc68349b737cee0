//! Single-teacher registration and portal password resets.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::config::ServiceSettings;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{account, teacher};
use crate::error::AppError;
use crate::repositories::id_sequence_repository::TEACHER_SEQUENCE;
use crate::repositories::{AccountRepository, IdSequenceRepository, TeacherRepository};
use crate::services::account_provisioner::{AccountProvisioner, NewAccount, normalize_email};
use crate::services::bulk_import::processor::{
    EMPLOYEE_ID_PREFIX, duplicate_teacher, map_teacher_conflict,
};
use crate::services::bulk_import::row::TeacherRowValues;
use crate::services::notification::SharedEmailSender;
use crate::services::profile::Profile;

#[derive(Debug, Clone)]
pub struct TeacherRegistration {
    pub teacher: teacher::Model,
    pub account: Option<account::Model>,
    pub generated_password: Option<String>,
}

pub struct TeacherService {
    accounts: AccountRepository,
    teachers: TeacherRepository,
    sequences: IdSequenceRepository,
    provisioner: AccountProvisioner,
}

impl TeacherService {
    pub fn new(
        db: DatabaseConnection,
        email_sender: SharedEmailSender,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            teachers: TeacherRepository::new(db.clone()),
            sequences: IdSequenceRepository::new(db.clone()),
            provisioner: AccountProvisioner::new(db, email_sender, settings),
        }
    }

    /// The email is mandatory here and checked against both teachers and
    /// accounts before anything is written.
    pub async fn register(
        &self,
        values: TeacherRowValues,
        create_account: bool,
        send_email: bool,
    ) -> Result<TeacherRegistration, AppError> {
        let email = values
            .email
            .as_deref()
            .ok_or_else(|| AppError::FieldValidation("email: This field is required".to_string()))
            .and_then(normalize_email)?;
        let values = TeacherRowValues {
            email: Some(email.clone()),
            ..values
        };

        if self.teachers.exists_by_email(&email).await? {
            return Err(duplicate_teacher(&email));
        }
        if create_account && self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateIdentity(format!(
                "An account with email {email} already exists"
            )));
        }

        let national_id_taken = match values.national_id_number.as_deref() {
            Some(national_id) => self.teachers.exists_by_national_id(national_id).await?,
            None => false,
        };
        let record = values.validate(Utc::now().date_naive(), national_id_taken)?;

        let employee_id = self
            .sequences
            .next_identifier(TEACHER_SEQUENCE, EMPLOYEE_ID_PREFIX)
            .await?;
        let teacher = self
            .teachers
            .create(employee_id, record)
            .await
            .map_err(|e| map_teacher_conflict(e, Some(&email)))?;

        tracing::info!(
            teacher_id = %teacher.teacher_id,
            employee_id = %teacher.employee_id,
            "Teacher registered"
        );

        if !create_account {
            return Ok(TeacherRegistration {
                teacher,
                account: None,
                generated_password: None,
            });
        }

        let provisioned = self
            .provisioner
            .create_account(
                NewAccount {
                    email,
                    role: RoleEnum::Teacher,
                    password: None,
                    first_name: teacher.first_name.clone(),
                    last_name: teacher.last_name.clone(),
                },
                Some(Profile::Teacher(teacher.clone())),
                send_email,
            )
            .await?;

        let teacher = match provisioned.profile {
            Some(Profile::Teacher(linked)) => linked,
            _ => teacher,
        };

        Ok(TeacherRegistration {
            teacher,
            account: Some(provisioned.account),
            generated_password: provisioned.generated_password,
        })
    }

    /// New portal password for the teacher's linked account.
    pub async fn reset_portal_password(&self, teacher_id: Uuid) -> Result<String, AppError> {
        let teacher = self
            .teachers
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Teacher".to_string()))?;

        let account_id = teacher.account_id.ok_or_else(|| {
            AppError::UnsupportedOperation("Teacher does not have portal access".to_string())
        })?;

        self.provisioner.reset_password(account_id).await
    }
}
