//! Downloadable import templates with two example rows.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::AppError;

pub const TEMPLATE_SHEET_NAME: &str = "Teachers";
pub const XLSX_TEMPLATE_FILE_NAME: &str = "teacher_template.xlsx";
pub const CSV_TEMPLATE_FILE_NAME: &str = "teacher_template.csv";

pub const TEMPLATE_COLUMNS: [&str; 13] = [
    "first_name",
    "middle_name",
    "last_name",
    "gender",
    "date_of_birth",
    "email",
    "phone",
    "address",
    "national_id_number",
    "qualification",
    "specialization",
    "employment_status",
    "hire_date",
];

const EXAMPLE_ROWS: [[&str; 13]; 2] = [
    [
        "John",
        "Michael",
        "Doe",
        "M",
        "1985-05-15",
        "john.doe@example.com",
        "0241234567",
        "123 Main St, Accra",
        "GHA-123456789-0",
        "bachelor",
        "Mathematics",
        "permanent",
        "2020-09-01",
    ],
    [
        "Jane",
        "Ann",
        "Smith",
        "F",
        "1990-08-20",
        "jane.smith@example.com",
        "0551234567",
        "456 Oak Ave, Kumasi",
        "GHA-987654321-1",
        "master",
        "English Language",
        "contract",
        "2021-01-15",
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Xlsx,
    Csv,
}

impl TemplateFormat {
    /// `xlsx` when absent.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("xlsx") => Ok(TemplateFormat::Xlsx),
            Some("csv") => Ok(TemplateFormat::Csv),
            Some(other) => Err(AppError::FieldValidation(format!(
                "format: Value '{other}' is not a valid choice"
            ))),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            TemplateFormat::Xlsx => XLSX_TEMPLATE_FILE_NAME,
            TemplateFormat::Csv => CSV_TEMPLATE_FILE_NAME,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            TemplateFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            TemplateFormat::Csv => "text/csv",
        }
    }

    pub fn render(self) -> Result<Vec<u8>, AppError> {
        match self {
            TemplateFormat::Xlsx => xlsx_template(),
            TemplateFormat::Csv => csv_template(),
        }
    }
}

pub fn xlsx_template() -> Result<Vec<u8>, AppError> {
    build_workbook().map_err(|e| AppError::Internal(format!("Failed to build template: {e}")))
}

fn build_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET_NAME)?;

    for (col, header) in TEMPLATE_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, 20)?;
    }

    for (row, values) in EXAMPLE_ROWS.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, *value)?;
        }
    }

    workbook.save_to_buffer()
}

pub fn csv_template() -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_internal = |e: csv::Error| AppError::Internal(format!("Failed to build template: {e}"));

    writer.write_record(TEMPLATE_COLUMNS).map_err(to_internal)?;
    for values in EXAMPLE_ROWS {
        writer.write_record(values).map_err(to_internal)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to build template: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::bulk_import::row::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS, missing_columns};
    use crate::services::bulk_import::spreadsheet::{Cell, FileFormat, parse};

    #[test]
    fn template_lists_every_known_column() {
        for column in REQUIRED_COLUMNS.iter().chain(OPTIONAL_COLUMNS.iter()) {
            assert!(TEMPLATE_COLUMNS.contains(column), "{column}");
        }
    }

    #[test]
    fn format_query_defaults_to_xlsx() {
        assert_eq!(TemplateFormat::parse(None).unwrap(), TemplateFormat::Xlsx);
        assert_eq!(TemplateFormat::parse(Some("CSV")).unwrap(), TemplateFormat::Csv);
        assert!(matches!(
            TemplateFormat::parse(Some("pdf")),
            Err(AppError::FieldValidation(_))
        ));
    }

    #[test]
    fn csv_template_parses_back() {
        let bytes = csv_template().unwrap();
        let sheet = parse(&bytes, FileFormat::Csv).unwrap();
        assert!(missing_columns(&sheet.headers).is_empty());
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[1].get("address"),
            &Cell::Text("456 Oak Ave, Kumasi".into())
        );
    }

    #[test]
    fn xlsx_template_parses_back() {
        let bytes = xlsx_template().unwrap();
        let sheet = parse(&bytes, FileFormat::Xlsx).unwrap();
        assert_eq!(sheet.headers, TEMPLATE_COLUMNS.map(String::from).to_vec());
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("phone"), &Cell::Text("0241234567".into()));
        assert_eq!(sheet.rows[0].line, 2);
    }

    #[test]
    fn template_file_names() {
        assert_eq!(TemplateFormat::Xlsx.file_name(), "teacher_template.xlsx");
        assert_eq!(TemplateFormat::Csv.content_type(), "text/csv");
    }
}
