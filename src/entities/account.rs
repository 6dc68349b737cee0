//! `SeaORM` Entity for account table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RoleEnum;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "account"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub account_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: RoleEnum,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_active_portal: bool,
    pub last_login: Option<DateTime>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    /// Both the global flag and the portal flag must be set.
    pub fn can_login(&self) -> bool {
        self.is_active && self.is_active_portal
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    AccountId,
    Email,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    IsActive,
    IsActivePortal,
    LastLogin,
    LastLoginIp,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    AccountId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Teacher,
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::AccountId => ColumnType::Uuid.def(),
            Self::Email => ColumnType::String(StringLen::N(254)).def().unique(),
            Self::PasswordHash => ColumnType::String(StringLen::None).def(),
            Self::Role => ColumnType::String(StringLen::N(16)).def(),
            Self::FirstName => ColumnType::String(StringLen::N(150)).def(),
            Self::LastName => ColumnType::String(StringLen::N(150)).def(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::IsActivePortal => ColumnType::Boolean.def(),
            Self::LastLogin => ColumnType::DateTime.def().null(),
            Self::LastLoginIp => ColumnType::String(StringLen::N(45)).def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Teacher => Entity::has_one(super::teacher::Entity).into(),
            Self::Student => Entity::has_one(super::student::Entity).into(),
        }
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
