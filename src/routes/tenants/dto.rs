use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{Ownership, TenantType};
use crate::entities::tenant;
use crate::error::AppError;
use crate::repositories::NewTenant;
use crate::services::account_provisioner::normalize_email;

#[derive(Debug, Serialize, ToSchema)]
pub struct TenantResponse {
    pub tenant_id: Uuid,
    pub name: String,
    #[schema(example = "ACCRA-SHS")]
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
    pub created_at: NaiveDateTime,
}

impl From<tenant::Model> for TenantResponse {
    fn from(tenant: tenant::Model) -> Self {
        Self {
            tenant_id: tenant.tenant_id,
            name: tenant.name,
            code: tenant.code,
            tenant_type: tenant.tenant_type,
            ownership: tenant.ownership,
            digital_address: tenant.digital_address,
            physical_address: tenant.physical_address,
            headmaster_name: tenant.headmaster_name,
            email: tenant.email,
            phone: tenant.phone,
            motto: tenant.motto,
            is_active: tenant.is_active,
            created_at: tenant.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTenantRequest {
    #[schema(example = "Accra Senior High School")]
    pub name: String,
    /// Stored uppercase.
    #[schema(example = "accra-shs")]
    pub code: String,
    pub tenant_type: TenantType,
    pub ownership: Ownership,
    pub digital_address: Option<String>,
    pub physical_address: Option<String>,
    pub headmaster_name: String,
    pub email: String,
    pub phone: String,
    pub motto: Option<String>,
}

impl CreateTenantRequest {
    /// Every problem is reported at once; limits follow the column sizes.
    pub fn into_record(self) -> Result<NewTenant, AppError> {
        let mut problems = Vec::new();
        for (field, value, max) in [
            ("name", &self.name, 255),
            ("code", &self.code, 10),
            ("headmaster_name", &self.headmaster_name, 255),
            ("phone", &self.phone, 20),
        ] {
            let len = value.trim().chars().count();
            if len == 0 {
                problems.push(format!("{field}: This field is required"));
            } else if len > max {
                problems.push(too_long(field, max, len));
            }
        }
        for (field, value, max) in [
            ("digital_address", &self.digital_address, 50),
            ("physical_address", &self.physical_address, 255),
            ("motto", &self.motto, 255),
        ] {
            let len = value.as_deref().map_or(0, |v| v.trim().chars().count());
            if len > max {
                problems.push(too_long(field, max, len));
            }
        }

        let email = match normalize_email(&self.email) {
            Ok(email) if email.chars().count() > 254 => {
                problems.push(too_long("email", 254, email.chars().count()));
                None
            }
            Ok(email) => Some(email),
            Err(_) => {
                problems.push("email: Enter a valid email address".to_string());
                None
            }
        };

        match email {
            Some(email) if problems.is_empty() => Ok(NewTenant {
                name: self.name.trim().to_string(),
                code: self.code.trim().to_uppercase(),
                tenant_type: self.tenant_type,
                ownership: self.ownership,
                digital_address: non_blank(self.digital_address),
                physical_address: non_blank(self.physical_address),
                headmaster_name: self.headmaster_name.trim().to_string(),
                email,
                phone: self.phone.trim().to_string(),
                motto: non_blank(self.motto),
            }),
            _ => Err(AppError::FieldValidation(problems.join("; "))),
        }
    }
}

fn too_long(field: &str, max: usize, len: usize) -> String {
    format!("{field}: Ensure this value has at most {max} characters (it has {len})")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTenantRequest {
        CreateTenantRequest {
            name: "Accra Senior High School".to_string(),
            code: " accra-shs ".to_string(),
            tenant_type: TenantType::Shs,
            ownership: Ownership::Public,
            digital_address: Some("GA-123-4567".to_string()),
            physical_address: None,
            headmaster_name: "Ama Owusu".to_string(),
            email: "office@AccraSHS.edu.gh".to_string(),
            phone: "+233302123456".to_string(),
            motto: Some("  ".to_string()),
        }
    }

    fn problems(request: CreateTenantRequest) -> String {
        match request.into_record() {
            Err(AppError::FieldValidation(msg)) => msg,
            Err(other) => panic!("expected validation failure, got {other:?}"),
            Ok(_) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn valid_request_is_normalized() {
        let record = request().into_record().unwrap();
        assert_eq!(record.code, "ACCRA-SHS");
        assert_eq!(record.email, "office@accrashs.edu.gh");
        assert_eq!(record.motto, None);
    }

    #[test]
    fn code_longer_than_ten_characters_is_rejected() {
        let msg = problems(CreateTenantRequest {
            code: "ACCRA-SENIOR-HIGH-SCHOOL".to_string(),
            ..request()
        });
        assert_eq!(
            msg,
            "code: Ensure this value has at most 10 characters (it has 24)"
        );
    }

    #[test]
    fn reports_every_problem_at_once() {
        let msg = problems(CreateTenantRequest {
            name: " ".to_string(),
            phone: "0".repeat(21),
            digital_address: Some("x".repeat(51)),
            email: "not-an-email".to_string(),
            ..request()
        });
        assert!(msg.contains("name: This field is required"));
        assert!(msg.contains("phone: Ensure this value has at most 20 characters"));
        assert!(msg.contains("digital_address: Ensure this value has at most 50 characters"));
        assert!(msg.contains("email: Enter a valid email address"));
        assert_eq!(msg.matches("; ").count(), 3);
    }
}
