//! `SeaORM` Entity for tenant table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Ownership, TenantType};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "tenant"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub tenant_id: Uuid,
    pub name: String,
    pub code: String,
    pub tenant_type: TenantType,
    pub ownership: Ownership,
    pub digital_address: Option<String>,
    pub physical_address: Option<String>,
    pub headmaster_name: String,
    pub email: String,
    pub phone: String,
    pub motto: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    TenantId,
    Name,
    Code,
    TenantType,
    Ownership,
    DigitalAddress,
    PhysicalAddress,
    HeadmasterName,
    Email,
    Phone,
    Motto,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    TenantId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::TenantId => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::N(255)).def(),
            Self::Code => ColumnType::String(StringLen::N(10)).def().unique(),
            Self::TenantType => ColumnType::String(StringLen::N(20)).def(),
            Self::Ownership => ColumnType::String(StringLen::N(20)).def(),
            Self::DigitalAddress => ColumnType::String(StringLen::N(50)).def().null(),
            Self::PhysicalAddress => ColumnType::String(StringLen::N(255)).def().null(),
            Self::HeadmasterName => ColumnType::String(StringLen::N(255)).def(),
            Self::Email => ColumnType::String(StringLen::N(254)).def(),
            Self::Phone => ColumnType::String(StringLen::N(20)).def(),
            Self::Motto => ColumnType::String(StringLen::N(255)).def().null(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}
