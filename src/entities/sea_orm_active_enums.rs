//! `SeaORM` active enums shared by the entities

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RoleEnum {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "student")]
    Student,
}

impl RoleEnum {
    /// Teacher and student accounts may receive a generated password.
    pub fn allows_generated_password(self) -> bool {
        !matches!(self, RoleEnum::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoleEnum::Admin => "admin",
            RoleEnum::Teacher => "teacher",
            RoleEnum::Student => "student",
        }
    }
}

impl fmt::Display for RoleEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Gender {
    #[sea_orm(string_value = "M")]
    #[serde(rename = "M")]
    Male,
    #[sea_orm(string_value = "F")]
    #[serde(rename = "F")]
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Qualification {
    #[sea_orm(string_value = "diploma")]
    Diploma,
    #[sea_orm(string_value = "bachelor")]
    Bachelor,
    #[sea_orm(string_value = "master")]
    Master,
    #[sea_orm(string_value = "phd")]
    Phd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    #[default]
    #[sea_orm(string_value = "permanent")]
    Permanent,
    #[sea_orm(string_value = "contract")]
    Contract,
    #[sea_orm(string_value = "temporary")]
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum TenantType {
    #[sea_orm(string_value = "basic")]
    Basic,
    #[sea_orm(string_value = "shs")]
    Shs,
    #[sea_orm(string_value = "technical")]
    Technical,
    #[sea_orm(string_value = "combined")]
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    #[sea_orm(string_value = "public")]
    Public,
    #[sea_orm(string_value = "private")]
    Private,
    #[sea_orm(string_value = "mission")]
    Mission,
    #[sea_orm(string_value = "international")]
    International,
}
