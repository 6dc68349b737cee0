use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::account;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::services::profile::{HasProfile, Profile, ProfileKind};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "teacher@school.edu")]
    pub email: String,

    pub role: RoleEnum,

    /// Required for admins. Teachers and students get a generated one when omitted.
    #[schema(example = "password123")]
    pub password: Option<String>,

    #[schema(example = "Ama")]
    pub first_name: String,

    #[schema(example = "Mensah")]
    pub last_name: String,

    /// Teacher or student record to link, matching `role`.
    pub profile_id: Option<Uuid>,

    #[serde(default = "default_true")]
    pub send_credentials_email: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub account: AccountResponse,
    pub display_name: String,
    /// Only present when the password was generated.
    pub generated_password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "user@example.com")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account_id: Uuid,
    pub email: String,
    pub role: RoleEnum,
    pub display_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub account: AccountResponse,
    pub display_name: String,
    pub profile: Option<ProfileSummary>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PortalAccessRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub account_id: Uuid,
    pub email: String,
    pub role: RoleEnum,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_active_portal: bool,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<account::Model> for AccountResponse {
    fn from(account: account::Model) -> Self {
        Self {
            account_id: account.account_id,
            email: account.email,
            role: account.role,
            first_name: account.first_name,
            last_name: account.last_name,
            is_active: account.is_active,
            is_active_portal: account.is_active_portal,
            last_login: account.last_login,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileSummary {
    pub kind: ProfileKind,
    pub id: Uuid,
    /// Employee id for teachers, student code for students.
    pub identifier: String,
    pub full_name: String,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        let reference = profile.reference();
        Self {
            kind: reference.kind,
            id: reference.id,
            identifier: profile.identifier().to_string(),
            full_name: profile.full_name(),
        }
    }
}
