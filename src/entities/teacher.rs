//! `SeaORM` Entity for teacher table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EmploymentStatus, Gender, Qualification};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "teacher"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub teacher_id: Uuid,
    pub employee_id: String,
    pub account_id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub national_id_number: Option<String>,
    pub qualification: Qualification,
    pub specialization: String,
    pub employment_status: EmploymentStatus,
    pub hire_date: Date,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    TeacherId,
    EmployeeId,
    AccountId,
    FirstName,
    MiddleName,
    LastName,
    Gender,
    DateOfBirth,
    Phone,
    Address,
    Email,
    NationalIdNumber,
    Qualification,
    Specialization,
    EmploymentStatus,
    HireDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    TeacherId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::TeacherId => ColumnType::Uuid.def(),
            Self::EmployeeId => ColumnType::String(StringLen::N(20)).def().unique(),
            Self::AccountId => ColumnType::Uuid.def().null().unique(),
            Self::FirstName => ColumnType::String(StringLen::N(100)).def(),
            Self::MiddleName => ColumnType::String(StringLen::N(100)).def().null(),
            Self::LastName => ColumnType::String(StringLen::N(100)).def(),
            Self::Gender => ColumnType::String(StringLen::N(1)).def(),
            Self::DateOfBirth => ColumnType::Date.def(),
            Self::Phone => ColumnType::String(StringLen::N(15)).def().null(),
            Self::Address => ColumnType::String(StringLen::N(255)).def().null(),
            Self::Email => ColumnType::String(StringLen::N(128)).def().null().unique(),
            Self::NationalIdNumber => ColumnType::String(StringLen::N(15)).def().null().unique(),
            Self::Qualification => ColumnType::String(StringLen::N(20)).def(),
            Self::Specialization => ColumnType::String(StringLen::N(100)).def(),
            Self::EmploymentStatus => ColumnType::String(StringLen::N(20)).def(),
            Self::HireDate => ColumnType::Date.def(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Account => Entity::belongs_to(super::account::Entity)
                .from(Column::AccountId)
                .to(super::account::Column::AccountId)
                .into(),
        }
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
