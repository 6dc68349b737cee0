pub mod account_repository;
pub mod id_sequence_repository;
pub mod student_repository;
pub mod teacher_repository;
pub mod tenant_repository;

pub use account_repository::{AccountRepository, NewAccountRecord};
pub use id_sequence_repository::IdSequenceRepository;
pub use student_repository::{NewStudent, StudentRepository};
pub use teacher_repository::{NewTeacher, TeacherRepository, TeacherUpdate};
pub use tenant_repository::{NewTenant, TenantRepository};

use sea_orm::{DbErr, SqlErr};

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
