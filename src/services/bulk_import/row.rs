//! One data row: extraction, normalization and field validation.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::{
    normalize_employment_status, normalize_gender, normalize_qualification, parse_date,
    parse_employment_status, parse_gender, parse_qualification,
};
use super::spreadsheet::SheetRow;
use crate::entities::sea_orm_active_enums::EmploymentStatus;
use crate::error::AppError;
use crate::repositories::NewTeacher;
use crate::services::account_provisioner::normalize_email;

pub const REQUIRED_COLUMNS: [&str; 10] = [
    "first_name",
    "last_name",
    "gender",
    "date_of_birth",
    "email",
    "phone",
    "qualification",
    "specialization",
    "employment_status",
    "hire_date",
];

pub const OPTIONAL_COLUMNS: [&str; 3] = ["middle_name", "address", "national_id_number"];

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+\d{9,14}|\d{9,15})$").expect("phone pattern is valid"));
static NATIONAL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}-\d{9}-\d$").expect("national id pattern is valid"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Required columns absent from the header row, in declaration order.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect()
}

/// Trimmed and normalized values of one row, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherRowValues {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub national_id_number: Option<String>,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub employment_status: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

impl TeacherRowValues {
    pub fn from_row(row: &SheetRow) -> Result<Self, AppError> {
        let text = |column: &str| row.get(column).as_text();

        Ok(Self {
            first_name: text("first_name"),
            middle_name: text("middle_name"),
            last_name: text("last_name"),
            gender: text("gender").map(|g| normalize_gender(&g)),
            date_of_birth: parse_date(row.get("date_of_birth"), "date_of_birth")?,
            email: text("email").map(|e| normalize_email(&e).unwrap_or(e)),
            phone: text("phone"),
            address: text("address"),
            national_id_number: text("national_id_number"),
            qualification: text("qualification").map(|q| normalize_qualification(&q)),
            specialization: text("specialization"),
            employment_status: text("employment_status")
                .map(|s| normalize_employment_status(&s)),
            hire_date: parse_date(row.get("hire_date"), "hire_date")?,
        })
    }

    /// Collects every field problem; the row is rejected if there is any.
    pub fn validate(
        self,
        today: NaiveDate,
        national_id_taken: bool,
    ) -> Result<NewTeacher, AppError> {
        let mut problems = Vec::new();

        check_name("first_name", self.first_name.as_deref(), &mut problems);
        check_name("last_name", self.last_name.as_deref(), &mut problems);
        check_max_len("middle_name", self.middle_name.as_deref(), 100, &mut problems);

        let gender = match self.gender.as_deref() {
            None => {
                problems.push(required("gender"));
                None
            }
            Some(value) => {
                let parsed = parse_gender(value);
                if parsed.is_none() {
                    problems.push(invalid_choice("gender", value));
                }
                parsed
            }
        };

        match self.date_of_birth {
            None => problems.push(required("date_of_birth")),
            Some(dob) if dob > today => problems
                .push("date_of_birth: Date of birth cannot be in the future".to_string()),
            Some(_) => {}
        }

        if let Some(phone) = self.phone.as_deref() {
            if !PHONE_RE.is_match(phone) {
                problems.push(
                    "phone: Enter a valid phone number (9 to 15 characters, digits with optional leading +)"
                        .to_string(),
                );
            }
        }

        if let Some(email) = self.email.as_deref() {
            if !EMAIL_RE.is_match(email) {
                problems.push("email: Enter a valid email address".to_string());
            }
            check_max_len("email", Some(email), 128, &mut problems);
        }

        check_max_len("address", self.address.as_deref(), 255, &mut problems);

        if let Some(national_id) = self.national_id_number.as_deref() {
            if !NATIONAL_ID_RE.is_match(national_id) {
                problems.push(
                    "national_id_number: Enter a valid national ID number (e.g. GHA-123456789-0)"
                        .to_string(),
                );
            }
            if national_id_taken {
                problems.push(
                    "national_id_number: Teacher with this national ID number already exists"
                        .to_string(),
                );
            }
        }

        let qualification = match self.qualification.as_deref() {
            None => {
                problems.push(required("qualification"));
                None
            }
            Some(value) => {
                let parsed = parse_qualification(value);
                if parsed.is_none() {
                    problems.push(invalid_choice("qualification", value));
                }
                parsed
            }
        };

        match self.specialization.as_deref() {
            None => problems.push(required("specialization")),
            Some(value) => check_max_len("specialization", Some(value), 100, &mut problems),
        }

        let employment_status = match self.employment_status.as_deref() {
            None => Some(EmploymentStatus::default()),
            Some(value) => {
                let parsed = parse_employment_status(value);
                if parsed.is_none() {
                    problems.push(invalid_choice("employment_status", value));
                }
                parsed
            }
        };

        if self.hire_date.is_none() {
            problems.push(required("hire_date"));
        }

        match (
            problems.is_empty(),
            self.first_name,
            self.last_name,
            gender,
            self.date_of_birth,
            qualification,
            self.specialization,
            employment_status,
            self.hire_date,
        ) {
            (
                true,
                Some(first_name),
                Some(last_name),
                Some(gender),
                Some(date_of_birth),
                Some(qualification),
                Some(specialization),
                Some(employment_status),
                Some(hire_date),
            ) => Ok(NewTeacher {
                first_name,
                middle_name: self.middle_name,
                last_name,
                gender,
                date_of_birth,
                phone: self.phone,
                address: self.address,
                email: self.email,
                national_id_number: self.national_id_number,
                qualification,
                specialization,
                employment_status,
                hire_date,
            }),
            _ => Err(AppError::FieldValidation(problems.join("; "))),
        }
    }
}

fn required(field: &str) -> String {
    format!("{field}: This field is required")
}

fn invalid_choice(field: &str, value: &str) -> String {
    format!("{field}: Value '{value}' is not a valid choice")
}

fn check_name(field: &str, value: Option<&str>, problems: &mut Vec<String>) {
    match value {
        None => problems.push(required(field)),
        Some(name) => {
            let len = name.chars().count();
            if len < 2 {
                problems.push(format!(
                    "{field}: Ensure this value has at least 2 characters (it has {len})"
                ));
            }
            check_max_len(field, Some(name), 100, problems);
        }
    }
}

fn check_max_len(field: &str, value: Option<&str>, max: usize, problems: &mut Vec<String>) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len > max {
            problems.push(format!(
                "{field}: Ensure this value has at most {max} characters (it has {len})"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{Gender, Qualification};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn complete() -> TeacherRowValues {
        TeacherRowValues {
            first_name: Some("John".into()),
            middle_name: Some("Michael".into()),
            last_name: Some("Doe".into()),
            gender: Some("M".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 5, 15),
            email: Some("john.doe@example.com".into()),
            phone: Some("0241234567".into()),
            address: Some("123 Main St, Accra".into()),
            national_id_number: Some("GHA-123456789-0".into()),
            qualification: Some("bachelor".into()),
            specialization: Some("Mathematics".into()),
            employment_status: Some("permanent".into()),
            hire_date: NaiveDate::from_ymd_opt(2020, 9, 1),
        }
    }

    fn problems(values: TeacherRowValues) -> String {
        match values.validate(today(), false) {
            Err(AppError::FieldValidation(msg)) => msg,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn complete_row_becomes_new_teacher() {
        let teacher = complete().validate(today(), false).unwrap();
        assert_eq!(teacher.gender, Gender::Male);
        assert_eq!(teacher.qualification, Qualification::Bachelor);
        assert_eq!(teacher.email.as_deref(), Some("john.doe@example.com"));
    }

    #[test]
    fn employment_status_defaults_to_permanent() {
        let values = TeacherRowValues {
            employment_status: None,
            ..complete()
        };
        let teacher = values.validate(today(), false).unwrap();
        assert_eq!(teacher.employment_status, EmploymentStatus::Permanent);
    }

    #[test]
    fn optional_contact_fields_may_be_absent() {
        let values = TeacherRowValues {
            email: None,
            phone: None,
            address: None,
            national_id_number: None,
            middle_name: None,
            ..complete()
        };
        assert!(values.validate(today(), false).is_ok());
    }

    #[test]
    fn reports_every_problem_at_once() {
        let msg = problems(TeacherRowValues {
            first_name: Some("J".into()),
            gender: Some("X".into()),
            phone: Some("12ab".into()),
            ..complete()
        });
        assert!(msg.contains("first_name: Ensure this value has at least 2 characters"));
        assert!(msg.contains("gender: Value 'X' is not a valid choice"));
        assert!(msg.contains("phone: Enter a valid phone number"));
        assert_eq!(msg.matches("; ").count(), 2);
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let msg = problems(TeacherRowValues {
            date_of_birth: NaiveDate::from_ymd_opt(2030, 1, 1),
            ..complete()
        });
        assert_eq!(msg, "date_of_birth: Date of birth cannot be in the future");
    }

    #[test]
    fn missing_required_values() {
        let msg = problems(TeacherRowValues {
            hire_date: None,
            specialization: None,
            ..complete()
        });
        assert!(msg.contains("specialization: This field is required"));
        assert!(msg.contains("hire_date: This field is required"));
    }

    #[test]
    fn national_id_format_and_uniqueness() {
        let msg = problems(TeacherRowValues {
            national_id_number: Some("GHA-1234-0".into()),
            ..complete()
        });
        assert!(msg.starts_with("national_id_number: Enter a valid national ID number"));

        match complete().validate(today(), true) {
            Err(AppError::FieldValidation(msg)) => assert!(msg.contains("already exists")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_qualification_is_rejected() {
        let msg = problems(TeacherRowValues {
            qualification: Some("certificate".into()),
            ..complete()
        });
        assert_eq!(msg, "qualification: Value 'certificate' is not a valid choice");
    }

    #[test]
    fn phone_fits_the_stored_column() {
        let accepted = TeacherRowValues {
            phone: Some("+23324123456789".into()),
            ..complete()
        };
        assert!(accepted.validate(today(), false).is_ok());

        let msg = problems(TeacherRowValues {
            phone: Some("+233241234567890".into()),
            ..complete()
        });
        assert!(msg.starts_with("phone: Enter a valid phone number"));
    }

    #[test]
    fn email_domain_is_lowercased_on_extraction() {
        use crate::services::bulk_import::spreadsheet::{FileFormat, parse};

        let sheet = parse(
            b"first_name,email\nKofi,Kofi.Mensah@School.Test\nAma,not-an-email\n",
            FileFormat::Csv,
        )
        .unwrap();

        let first = TeacherRowValues::from_row(&sheet.rows[0]).unwrap();
        assert_eq!(first.email.as_deref(), Some("Kofi.Mensah@school.test"));
        let second = TeacherRowValues::from_row(&sheet.rows[1]).unwrap();
        assert_eq!(second.email.as_deref(), Some("not-an-email"));
    }

    #[test]
    fn reports_missing_columns_in_order() {
        let headers = vec!["first_name".to_string(), "email".to_string()];
        let missing = missing_columns(&headers);
        assert_eq!(missing.first().map(String::as_str), Some("last_name"));
        assert!(!missing.contains(&"email".to_string()));
        assert_eq!(missing.len(), 8);
    }
}
