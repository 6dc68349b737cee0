//! `SeaORM` Entity for student table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::Gender;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: Uuid,
    pub student_code: String,
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
    pub admission_date: Date,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    StudentCode,
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
    AdmissionDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
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
            Self::StudentId => ColumnType::Uuid.def(),
            Self::StudentCode => ColumnType::String(StringLen::N(20)).def().unique(),
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
            Self::AdmissionDate => ColumnType::Date.def(),
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
