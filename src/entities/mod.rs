pub mod account;
pub mod id_sequence;
pub mod sea_orm_active_enums;
pub mod student;
pub mod teacher;
pub mod tenant;
