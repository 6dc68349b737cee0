//! Bulk teacher import from uploaded spreadsheets.

pub mod normalize;
pub mod processor;
pub mod row;
pub mod spreadsheet;
pub mod template;

pub use processor::{
    BulkTeacherImporter, ImportOptions, ImportOutcome, IssuedCredential, UploadedFile,
};
pub use template::TemplateFormat;
