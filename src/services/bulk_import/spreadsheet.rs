//! Reads uploaded `.xlsx` / `.csv` files into header-keyed rows.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook_from_rs};
use chrono::NaiveDate;

use crate::error::AppError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Csv,
}

impl FileFormat {
    /// Case-insensitive match on the file extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let lower = file_name.trim().to_lowercase();
        if lower.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else {
            Err(AppError::UnsupportedFormat)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SheetRow {
    /// Position in the file, counting the header as line 1.
    pub line: usize,
    values: HashMap<String, Cell>,
}

impl SheetRow {
    pub fn get(&self, column: &str) -> &Cell {
        self.values.get(column).unwrap_or(&Cell::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    fn from_grid(headers: Vec<String>, grid: Vec<Vec<Cell>>) -> Self {
        let rows = grid
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|c| !c.is_empty()))
            .map(|(index, cells)| SheetRow {
                line: index + 2,
                values: headers
                    .iter()
                    .cloned()
                    .zip(cells.into_iter().chain(std::iter::repeat(Cell::Empty)))
                    .collect(),
            })
            .collect();

        Sheet { headers, rows }
    }
}

pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Sheet, AppError> {
    match format {
        FileFormat::Xlsx => parse_xlsx(bytes),
        FileFormat::Csv => parse_csv(bytes),
    }
}

fn parse_xlsx(bytes: &[u8]) -> Result<Sheet, AppError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
        AppError::FieldValidation(format!("Error processing file: failed to open Excel file: {e}"))
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names.first().ok_or_else(|| {
        AppError::FieldValidation("Error processing file: Excel file has no sheets".to_string())
    })?;

    let range = workbook.worksheet_range(first_sheet).map_err(|e| {
        AppError::FieldValidation(format!("Error processing file: failed to read sheet: {e}"))
    })?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| xlsx_cell(cell).as_text().unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let grid = rows
        .map(|row| row.iter().map(xlsx_cell).collect())
        .collect();

    Ok(Sheet::from_grid(headers, grid))
}

fn xlsx_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Text(format_number(*f)),
        Data::Int(i) => Cell::Text(i.to_string()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => value
            .as_date()
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::from_text(&value.to_string())),
        other => Cell::from_text(&other.to_string()),
    }
}

/// Whole numbers lose the `.0` a spreadsheet adds to numeric cells.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Sheet, AppError> {
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| AppError::FieldValidation(format!("Error processing file: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut grid = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::FieldValidation(format!("Error processing file: {e}")))?;
        grid.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Sheet::from_grid(headers, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(FileFormat::from_file_name("t.XLSX").unwrap(), FileFormat::Xlsx);
        assert_eq!(FileFormat::from_file_name("t.Csv").unwrap(), FileFormat::Csv);
        assert!(matches!(
            FileFormat::from_file_name("teachers.xls"),
            Err(AppError::UnsupportedFormat)
        ));
        assert!(matches!(
            FileFormat::from_file_name("teachers.pdf"),
            Err(AppError::UnsupportedFormat)
        ));
    }

    #[test]
    fn csv_headers_are_trimmed_and_bom_ignored() {
        let data = b"\xEF\xBB\xBF first_name , last_name\nJohn,Doe\n";
        let sheet = parse(data, FileFormat::Csv).unwrap();
        assert_eq!(sheet.headers, vec!["first_name", "last_name"]);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].get("first_name"), &Cell::Text("John".into()));
    }

    #[test]
    fn blank_rows_are_skipped_but_keep_line_numbers() {
        let data = b"first_name,last_name\nJohn,Doe\n , \nJane,Smith\n";
        let sheet = parse(data, FileFormat::Csv).unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].line, 2);
        assert_eq!(sheet.rows[1].line, 4);
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let data = b"first_name,last_name,address\nJohn,Doe\n";
        let sheet = parse(data, FileFormat::Csv).unwrap();
        assert_eq!(sheet.rows[0].get("address"), &Cell::Empty);
        assert_eq!(sheet.rows[0].get("unknown"), &Cell::Empty);
    }

    #[test]
    fn whole_numbers_drop_trailing_zero() {
        assert_eq!(format_number(241234567.0), "241234567");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn invalid_workbook_is_rejected() {
        let err = parse(b"not a zip archive", FileFormat::Xlsx).unwrap_err();
        assert!(matches!(err, AppError::FieldValidation(_)));
    }
}
