use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{
    EmploymentStatus, Gender, Qualification,
};
use crate::entities::teacher;
use crate::repositories::TeacherUpdate;
use crate::services::bulk_import::normalize::{
    normalize_employment_status, normalize_gender, normalize_qualification,
};
use crate::services::bulk_import::row::TeacherRowValues;
use crate::services::bulk_import::{ImportOutcome, IssuedCredential};

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub teacher_id: Uuid,
    #[schema(example = "TCH00001")]
    pub employee_id: String,
    pub account_id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub national_id_number: Option<String>,
    pub qualification: Qualification,
    pub specialization: String,
    pub employment_status: EmploymentStatus,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<teacher::Model> for TeacherResponse {
    fn from(teacher: teacher::Model) -> Self {
        Self {
            teacher_id: teacher.teacher_id,
            employee_id: teacher.employee_id,
            account_id: teacher.account_id,
            first_name: teacher.first_name,
            middle_name: teacher.middle_name,
            last_name: teacher.last_name,
            gender: teacher.gender,
            date_of_birth: teacher.date_of_birth,
            phone: teacher.phone,
            address: teacher.address,
            email: teacher.email,
            national_id_number: teacher.national_id_number,
            qualification: teacher.qualification,
            specialization: teacher.specialization,
            employment_status: teacher.employment_status,
            hire_date: teacher.hire_date,
            is_active: teacher.is_active,
            created_at: teacher.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherListResponse {
    pub teachers: Vec<TeacherResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TeacherQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Matches names, employee id, email and specialization.
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

/// Free-text choices (`gender`, `qualification`, `employment_status`) accept
/// the same spellings as the import sheet.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeacherRequest {
    #[schema(example = "Kwame")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[schema(example = "Boateng")]
    pub last_name: String,
    #[schema(example = "M")]
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    #[schema(example = "kwame.boateng@school.edu")]
    pub email: String,
    #[schema(example = "+233241234567")]
    pub phone: String,
    pub address: Option<String>,
    #[schema(example = "GHA-123456789-0")]
    pub national_id_number: Option<String>,
    #[schema(example = "bachelor")]
    pub qualification: String,
    #[schema(example = "Mathematics")]
    pub specialization: String,
    pub employment_status: Option<String>,
    pub hire_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub create_user_account: bool,
    #[serde(default = "default_true")]
    pub send_credentials_email: bool,
}

impl CreateTeacherRequest {
    pub fn into_values(self) -> TeacherRowValues {
        TeacherRowValues {
            first_name: non_blank(Some(self.first_name)),
            middle_name: non_blank(self.middle_name),
            last_name: non_blank(Some(self.last_name)),
            gender: non_blank(Some(self.gender)).map(|g| normalize_gender(&g)),
            date_of_birth: self.date_of_birth,
            email: non_blank(Some(self.email)),
            phone: non_blank(Some(self.phone)),
            address: non_blank(self.address),
            national_id_number: non_blank(self.national_id_number),
            qualification: non_blank(Some(self.qualification))
                .map(|q| normalize_qualification(&q)),
            specialization: non_blank(Some(self.specialization)),
            employment_status: non_blank(self.employment_status)
                .map(|s| normalize_employment_status(&s)),
            hire_date: self.hire_date,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTeacherResponse {
    pub teacher: TeacherResponse,
    pub account_id: Option<Uuid>,
    /// Shown once; also emailed when requested.
    pub generated_password: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub qualification: Option<Qualification>,
    pub specialization: Option<String>,
    pub employment_status: Option<EmploymentStatus>,
}

impl From<UpdateTeacherRequest> for TeacherUpdate {
    fn from(request: UpdateTeacherRequest) -> Self {
        TeacherUpdate {
            first_name: non_blank(request.first_name),
            middle_name: non_blank(request.middle_name),
            last_name: non_blank(request.last_name),
            phone: non_blank(request.phone),
            address: non_blank(request.address),
            qualification: request.qualification,
            specialization: non_blank(request.specialization),
            employment_status: request.employment_status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResetPasswordResponse {
    pub message: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkUploadResponse {
    pub message: String,
    pub success_count: usize,
    pub errors: Vec<String>,
    pub teachers: Vec<TeacherResponse>,
    pub issued_credentials: Vec<IssuedCredential>,
}

impl From<ImportOutcome> for BulkUploadResponse {
    fn from(outcome: ImportOutcome) -> Self {
        let message = if outcome.errors.is_empty() {
            format!("Imported {} teachers", outcome.success_count)
        } else {
            format!(
                "Imported {} teachers with {} errors",
                outcome.success_count,
                outcome.errors.len()
            )
        };

        Self {
            message,
            success_count: outcome.success_count,
            errors: outcome.errors,
            teachers: outcome
                .created_profiles
                .into_iter()
                .map(TeacherResponse::from)
                .collect(),
            issued_credentials: outcome.issued_credentials,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TemplateQueryParams {
    /// `xlsx` (default) or `csv`.
    pub format: Option<String>,
}
