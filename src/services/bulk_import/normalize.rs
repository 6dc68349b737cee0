//! Cell value normalization. Unrecognized values pass through unchanged so
//! validation can report them.

use chrono::NaiveDate;

use super::spreadsheet::Cell;
use crate::entities::sea_orm_active_enums::{EmploymentStatus, Gender, Qualification};
use crate::error::AppError;

pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

pub fn normalize_gender(value: &str) -> String {
    let value = value.trim();
    match value.to_lowercase().as_str() {
        "m" | "male" => "M".to_string(),
        "f" | "female" => "F".to_string(),
        _ => value.to_string(),
    }
}

pub fn normalize_qualification(value: &str) -> String {
    normalize_choice(value, &["diploma", "bachelor", "master", "phd"])
}

pub fn normalize_employment_status(value: &str) -> String {
    normalize_choice(value, &["permanent", "contract", "temporary"])
}

fn normalize_choice(value: &str, choices: &[&str]) -> String {
    let value = value.trim();
    let lower = value.to_lowercase();
    if choices.contains(&lower.as_str()) {
        lower
    } else {
        value.to_string()
    }
}

pub fn parse_gender(value: &str) -> Option<Gender> {
    match value {
        "M" => Some(Gender::Male),
        "F" => Some(Gender::Female),
        _ => None,
    }
}

pub fn parse_qualification(value: &str) -> Option<Qualification> {
    match value {
        "diploma" => Some(Qualification::Diploma),
        "bachelor" => Some(Qualification::Bachelor),
        "master" => Some(Qualification::Master),
        "phd" => Some(Qualification::Phd),
        _ => None,
    }
}

pub fn parse_employment_status(value: &str) -> Option<EmploymentStatus> {
    match value {
        "permanent" => Some(EmploymentStatus::Permanent),
        "contract" => Some(EmploymentStatus::Contract),
        "temporary" => Some(EmploymentStatus::Temporary),
        _ => None,
    }
}

/// Native spreadsheet dates are taken as-is; text is tried against
/// [`DATE_FORMATS`] in order.
pub fn parse_date(cell: &Cell, column: &str) -> Result<Option<NaiveDate>, AppError> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Date(date) => Ok(Some(*date)),
        Cell::Text(text) => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate {
                column: column.to_string(),
                value: text.clone(),
            }),
    }
}
