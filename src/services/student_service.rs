//! Student registration with generated `STU` codes.

use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use uuid::Uuid;

use crate::config::ServiceSettings;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{account, student};
use crate::error::AppError;
use crate::repositories::id_sequence_repository::STUDENT_SEQUENCE;
use crate::repositories::{
    AccountRepository, IdSequenceRepository, NewStudent, StudentRepository,
};
use crate::services::account_provisioner::{AccountProvisioner, NewAccount, normalize_email};
use crate::services::notification::SharedEmailSender;
use crate::services::profile::Profile;

pub const STUDENT_CODE_PREFIX: &str = "STU";

#[derive(Debug, Clone)]
pub struct StudentRegistration {
    pub student: student::Model,
    pub account: Option<account::Model>,
    pub generated_password: Option<String>,
}

pub struct StudentService {
    accounts: AccountRepository,
    students: StudentRepository,
    sequences: IdSequenceRepository,
    provisioner: AccountProvisioner,
}

impl StudentService {
    pub fn new(
        db: DatabaseConnection,
        email_sender: SharedEmailSender,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            students: StudentRepository::new(db.clone()),
            sequences: IdSequenceRepository::new(db.clone()),
            provisioner: AccountProvisioner::new(db, email_sender, settings),
        }
    }

    pub async fn register(
        &self,
        record: NewStudent,
        create_account: bool,
        send_email: bool,
    ) -> Result<StudentRegistration, AppError> {
        validate_student(&record)?;

        let email = record.email.as_deref().map(normalize_email).transpose()?;
        let record = NewStudent {
            email: email.clone(),
            ..record
        };

        let account_email = match (create_account, email) {
            (true, Some(email)) => {
                if self.accounts.exists_by_email(&email).await? {
                    return Err(AppError::DuplicateIdentity(format!(
                        "An account with email {email} already exists"
                    )));
                }
                Some(email)
            }
            (true, None) => {
                return Err(AppError::FieldValidation(
                    "email: Required when creating a portal account".to_string(),
                ));
            }
            (false, _) => None,
        };

        let student_code = self
            .sequences
            .next_identifier(STUDENT_SEQUENCE, STUDENT_CODE_PREFIX)
            .await?;
        let student = self
            .students
            .create(student_code, record)
            .await
            .map_err(map_student_conflict)?;

        tracing::info!(
            student_id = %student.student_id,
            student_code = %student.student_code,
            "Student registered"
        );

        let Some(email) = account_email else {
            return Ok(StudentRegistration {
                student,
                account: None,
                generated_password: None,
            });
        };

        let provisioned = self
            .provisioner
            .create_account(
                NewAccount {
                    email,
                    role: RoleEnum::Student,
                    password: None,
                    first_name: student.first_name.clone(),
                    last_name: student.last_name.clone(),
                },
                Some(Profile::Student(student.clone())),
                send_email,
            )
            .await?;

        let student = match provisioned.profile {
            Some(Profile::Student(linked)) => linked,
            _ => student,
        };

        Ok(StudentRegistration {
            student,
            account: Some(provisioned.account),
            generated_password: provisioned.generated_password,
        })
    }

    pub async fn reset_portal_password(&self, student_id: Uuid) -> Result<String, AppError> {
        let student = self
            .students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student".to_string()))?;

        let account_id = student.account_id.ok_or_else(|| {
            AppError::UnsupportedOperation("Student does not have portal access".to_string())
        })?;

        self.provisioner.reset_password(account_id).await
    }
}

fn map_student_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            AppError::DuplicateIdentity("Student with this email already exists".to_string())
        }
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("national_id") => {
            AppError::FieldValidation(
                "national_id_number: Student with this national ID number already exists"
                    .to_string(),
            )
        }
        _ => AppError::Database(err),
    }
}

fn validate_student(record: &NewStudent) -> Result<(), AppError> {
    let mut problems = Vec::new();

    for (field, value) in [
        ("first_name", &record.first_name),
        ("last_name", &record.last_name),
    ] {
        let len = value.trim().chars().count();
        if !(2..=100).contains(&len) {
            problems.push(format!("{field}: Must be between 2 and 100 characters"));
        }
    }

    if record.date_of_birth > Utc::now().date_naive() {
        problems.push("date_of_birth: Date of birth cannot be in the future".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::FieldValidation(problems.join("; ")))
    }
}
