use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use serde::Serialize;
use utoipa::ToSchema;

use super::row::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS, TeacherRowValues, missing_columns};
use super::spreadsheet::{self, FileFormat, SheetRow};
use crate::config::ServiceSettings;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::teacher;
use crate::error::AppError;
use crate::repositories::id_sequence_repository::TEACHER_SEQUENCE;
use crate::repositories::{IdSequenceRepository, TeacherRepository};
use crate::services::account_provisioner::{AccountProvisioner, NewAccount};
use crate::services::notification::SharedEmailSender;
use crate::services::profile::{Profile, ProfileKind, ProfileRef};

pub const EMPLOYEE_ID_PREFIX: &str = "TCH";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    pub create_accounts: bool,
    pub send_emails: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            create_accounts: true,
            send_emails: true,
        }
    }
}

/// Plaintext credentials handed back once to the caller of an import.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedCredential {
    pub profile: ProfileRef,
    pub email: String,
    pub password: String,
    pub employee_id: String,
}

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub success_count: usize,
    pub errors: Vec<String>,
    pub created_profiles: Vec<teacher::Model>,
    pub issued_credentials: Vec<IssuedCredential>,
}

pub struct BulkTeacherImporter {
    teachers: TeacherRepository,
    sequences: IdSequenceRepository,
    provisioner: AccountProvisioner,
    settings: ServiceSettings,
}

impl BulkTeacherImporter {
    pub fn new(
        db: DatabaseConnection,
        email_sender: SharedEmailSender,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            teachers: TeacherRepository::new(db.clone()),
            sequences: IdSequenceRepository::new(db.clone()),
            provisioner: AccountProvisioner::new(db, email_sender, settings.clone()),
            settings,
        }
    }

    pub async fn process(
        &self,
        file: &UploadedFile,
        options: ImportOptions,
    ) -> Result<ImportOutcome, AppError> {
        if file.bytes.len() > self.settings.max_upload_bytes {
            return Err(AppError::SizeLimitExceeded {
                limit_mb: self.settings.max_upload_bytes / (1024 * 1024),
            });
        }

        let format = FileFormat::from_file_name(&file.file_name)?;
        let sheet = spreadsheet::parse(&file.bytes, format)?;

        let missing = missing_columns(&sheet.headers);
        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing));
        }

        let ignored: Vec<&str> = sheet
            .headers
            .iter()
            .map(String::as_str)
            .filter(|h| !REQUIRED_COLUMNS.contains(h) && !OPTIONAL_COLUMNS.contains(h))
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(columns = ?ignored, "Ignoring unknown import columns");
        }

        tracing::info!(
            file_name = %file.file_name,
            rows = sheet.rows.len(),
            create_accounts = options.create_accounts,
            send_emails = options.send_emails,
            "Processing teacher import"
        );

        let mut outcome = ImportOutcome::default();
        for row in &sheet.rows {
            if let Err(e) = self.process_row(row, options, &mut outcome).await {
                tracing::debug!(row = row.line, error = %e, "Import row rejected");
                outcome.errors.push(format!("Row {}: {}", row.line, e));
            }
        }

        tracing::info!(
            file_name = %file.file_name,
            success_count = outcome.success_count,
            error_count = outcome.errors.len(),
            credentials_issued = outcome.issued_credentials.len(),
            "Teacher import completed"
        );

        Ok(outcome)
    }

    /// Errors returned here reject the row. Account failures after the
    /// profile was saved are recorded on the outcome instead.
    async fn process_row(
        &self,
        row: &SheetRow,
        options: ImportOptions,
        outcome: &mut ImportOutcome,
    ) -> Result<(), AppError> {
        let values = TeacherRowValues::from_row(row)?;

        if let Some(email) = values.email.as_deref() {
            if self.teachers.exists_by_email(email).await? {
                return Err(duplicate_teacher(email));
            }
        }

        let national_id_taken = match values.national_id_number.as_deref() {
            Some(national_id) => self.teachers.exists_by_national_id(national_id).await?,
            None => false,
        };

        let today = Utc::now().date_naive();
        let record = values.validate(today, national_id_taken)?;
        let email = record.email.clone();

        let employee_id = self
            .sequences
            .next_identifier(TEACHER_SEQUENCE, EMPLOYEE_ID_PREFIX)
            .await?;

        let teacher = self
            .teachers
            .create(employee_id, record)
            .await
            .map_err(|e| map_teacher_conflict(e, email.as_deref()))?;

        outcome.success_count += 1;

        let teacher = match (options.create_accounts, teacher.email.clone()) {
            (true, Some(email)) => {
                match self.create_account(&teacher, email, options.send_emails).await {
                    Ok((linked, credential)) => {
                        outcome.issued_credentials.extend(credential);
                        linked
                    }
                    Err(e) => {
                        outcome.errors.push(format!("Row {}: {}", row.line, e));
                        teacher
                    }
                }
            }
            _ => teacher,
        };

        outcome.created_profiles.push(teacher);
        Ok(())
    }

    async fn create_account(
        &self,
        teacher: &teacher::Model,
        email: String,
        send_email: bool,
    ) -> Result<(teacher::Model, Option<IssuedCredential>), AppError> {
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

        let linked = match provisioned.profile {
            Some(Profile::Teacher(linked)) => linked,
            _ => teacher.clone(),
        };

        let credential = provisioned
            .generated_password
            .map(|password| IssuedCredential {
                profile: ProfileRef {
                    kind: ProfileKind::Teacher,
                    id: linked.teacher_id,
                },
                email: provisioned.account.email.clone(),
                password,
                employee_id: linked.employee_id.clone(),
            });

        Ok((linked, credential))
    }
}

pub(crate) fn duplicate_teacher(email: &str) -> AppError {
    AppError::DuplicateIdentity(format!("Teacher with email {email} already exists"))
}

/// A concurrent insert can still hit the unique indexes after the pre-checks.
pub(crate) fn map_teacher_conflict(err: DbErr, email: Option<&str>) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            duplicate_teacher(email.unwrap_or_default())
        }
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("national_id") => {
            AppError::FieldValidation(
                "national_id_number: Teacher with this national ID number already exists"
                    .to_string(),
            )
        }
        _ => AppError::Database(err),
    }
}
