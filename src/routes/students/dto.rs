use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::student;
use crate::error::AppError;
use crate::repositories::NewStudent;
use crate::services::bulk_import::normalize::{normalize_gender, parse_gender};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: Uuid,
    #[schema(example = "STU00001")]
    pub student_code: String,
    pub account_id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub admission_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        Self {
            student_id: student.student_id,
            student_code: student.student_code,
            account_id: student.account_id,
            first_name: student.first_name,
            middle_name: student.middle_name,
            last_name: student.last_name,
            gender: student.gender,
            date_of_birth: student.date_of_birth,
            phone: student.phone,
            address: student.address,
            email: student.email,
            admission_date: student.admission_date,
            is_active: student.is_active,
            created_at: student.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct StudentQueryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Efua")]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[schema(example = "Owusu")]
    pub last_name: String,
    #[schema(example = "F")]
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub national_id_number: Option<String>,
    /// Today when omitted.
    pub admission_date: Option<NaiveDate>,
    /// Defaults to whether an email was given.
    pub create_user_account: Option<bool>,
    #[serde(default = "default_true")]
    pub send_credentials_email: bool,
}

fn default_true() -> bool {
    true
}

impl CreateStudentRequest {
    pub fn create_account(&self) -> bool {
        self.create_user_account
            .unwrap_or_else(|| self.email.as_deref().is_some_and(|e| !e.trim().is_empty()))
    }

    pub fn into_record(self) -> Result<NewStudent, AppError> {
        let gender = parse_gender(&normalize_gender(&self.gender)).ok_or_else(|| {
            AppError::FieldValidation(format!(
                "gender: Value '{}' is not a valid choice",
                self.gender.trim()
            ))
        })?;

        Ok(NewStudent {
            first_name: self.first_name.trim().to_string(),
            middle_name: non_blank(self.middle_name),
            last_name: self.last_name.trim().to_string(),
            gender,
            date_of_birth: self.date_of_birth,
            phone: non_blank(self.phone),
            address: non_blank(self.address),
            email: non_blank(self.email),
            national_id_number: non_blank(self.national_id_number),
            admission_date: self
                .admission_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateStudentResponse {
    pub student: StudentResponse,
    pub account_id: Option<Uuid>,
    pub generated_password: Option<String>,
}
