//! Teacher and student profiles behind one tagged union.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{account, student, teacher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Teacher,
    Student,
}

impl ProfileKind {
    pub fn role(self) -> RoleEnum {
        match self {
            ProfileKind::Teacher => RoleEnum::Teacher,
            ProfileKind::Student => RoleEnum::Student,
        }
    }

    pub fn for_role(role: RoleEnum) -> Option<Self> {
        match role {
            RoleEnum::Teacher => Some(ProfileKind::Teacher),
            RoleEnum::Student => Some(ProfileKind::Student),
            RoleEnum::Admin => None,
        }
    }

    /// Portal name used in notification subjects.
    pub fn label(self) -> &'static str {
        match self {
            ProfileKind::Teacher => "Teacher",
            ProfileKind::Student => "Student",
        }
    }

    /// Label of the generated identifier in credential messages.
    pub fn identifier_label(self) -> &'static str {
        match self {
            ProfileKind::Teacher => "Employee ID",
            ProfileKind::Student => "Student ID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProfileRef {
    pub kind: ProfileKind,
    pub id: Uuid,
}

pub trait HasProfile {
    fn full_name(&self) -> String;
    fn identifier(&self) -> &str;
}

fn join_names(first: &str, middle: Option<&str>, last: &str) -> String {
    [Some(first), middle, Some(last)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl HasProfile for teacher::Model {
    fn full_name(&self) -> String {
        join_names(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }

    fn identifier(&self) -> &str {
        &self.employee_id
    }
}

impl HasProfile for student::Model {
    fn full_name(&self) -> String {
        join_names(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }

    fn identifier(&self) -> &str {
        &self.student_code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "profile", rename_all = "lowercase")]
pub enum Profile {
    Teacher(teacher::Model),
    Student(student::Model),
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        match self {
            Profile::Teacher(_) => ProfileKind::Teacher,
            Profile::Student(_) => ProfileKind::Student,
        }
    }

    pub fn reference(&self) -> ProfileRef {
        match self {
            Profile::Teacher(t) => ProfileRef {
                kind: ProfileKind::Teacher,
                id: t.teacher_id,
            },
            Profile::Student(s) => ProfileRef {
                kind: ProfileKind::Student,
                id: s.student_id,
            },
        }
    }

    pub fn account_id(&self) -> Option<Uuid> {
        match self {
            Profile::Teacher(t) => t.account_id,
            Profile::Student(s) => s.account_id,
        }
    }
}

impl HasProfile for Profile {
    fn full_name(&self) -> String {
        match self {
            Profile::Teacher(t) => t.full_name(),
            Profile::Student(s) => s.full_name(),
        }
    }

    fn identifier(&self) -> &str {
        match self {
            Profile::Teacher(t) => t.identifier(),
            Profile::Student(s) => s.identifier(),
        }
    }
}

/// Linked profile name first, then the account's own name, then the email.
/// Admins get an `(Admin)` suffix.
pub fn display_name(account: &account::Model, profile: Option<&Profile>) -> String {
    if let Some(profile) = profile {
        let name = profile.full_name();
        if !name.is_empty() {
            return name;
        }
    }

    let own_name = join_names(&account.first_name, None, &account.last_name);
    let base = if own_name.is_empty() {
        account.email.clone()
    } else {
        own_name
    };

    match account.role {
        RoleEnum::Admin => format!("{base} (Admin)"),
        RoleEnum::Teacher | RoleEnum::Student => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{EmploymentStatus, Gender, Qualification};
    use chrono::NaiveDate;

    fn sample_teacher() -> teacher::Model {
        let now = chrono::Utc::now().naive_utc();
        teacher::Model {
            teacher_id: Uuid::new_v4(),
            employee_id: "TCH00007".into(),
            account_id: None,
            first_name: "Ama".into(),
            middle_name: Some("Serwaa".into()),
            last_name: "Mensah".into(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1988, 3, 2).unwrap(),
            phone: None,
            address: None,
            email: Some("ama@example.com".into()),
            national_id_number: None,
            qualification: Qualification::Master,
            specialization: "Physics".into(),
            employment_status: EmploymentStatus::Permanent,
            hire_date: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_account(role: RoleEnum, first: &str, last: &str) -> account::Model {
        let now = chrono::Utc::now().naive_utc();
        account::Model {
            account_id: Uuid::new_v4(),
            email: "someone@example.com".into(),
            password_hash: String::new(),
            role,
            first_name: first.into(),
            last_name: last.into(),
            is_active: true,
            is_active_portal: true,
            last_login: None,
            last_login_ip: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn teacher_profile_exposes_name_and_employee_id() {
        let profile = Profile::Teacher(sample_teacher());
        assert_eq!(profile.full_name(), "Ama Serwaa Mensah");
        assert_eq!(profile.identifier(), "TCH00007");
        assert_eq!(profile.kind(), ProfileKind::Teacher);
    }

    #[test]
    fn display_name_prefers_profile() {
        let account = sample_account(RoleEnum::Teacher, "Other", "Name");
        let profile = Profile::Teacher(sample_teacher());
        assert_eq!(display_name(&account, Some(&profile)), "Ama Serwaa Mensah");
    }

    #[test]
    fn display_name_marks_admins() {
        let account = sample_account(RoleEnum::Admin, "System", "Administrator");
        assert_eq!(display_name(&account, None), "System Administrator (Admin)");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let account = sample_account(RoleEnum::Student, "", "");
        assert_eq!(display_name(&account, None), "someone@example.com");
    }

    #[test]
    fn admin_has_no_profile_kind() {
        assert_eq!(ProfileKind::for_role(RoleEnum::Admin), None);
        assert_eq!(
            ProfileKind::for_role(RoleEnum::Student),
            Some(ProfileKind::Student)
        );
    }
}
