use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::services::profile::{HasProfile, Profile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsEmail {
    pub subject: String,
    pub body: String,
}

/// Message for an account linked to a teacher or student profile.
pub fn profile_credentials(
    profile: &Profile,
    email: &str,
    password: &str,
    login_url: &str,
) -> CredentialsEmail {
    let kind = profile.kind();
    let subject = format!("Your {} Portal Login Credentials", kind.label());
    let body = format!(
        "Hello {name},\n\n\
         Your {portal} portal account has been created successfully.\n\n\
         Login Credentials:\n\
         ------------------\n\
         Email: {email}\n\
         Password: {password}\n\
         {id_label}: {identifier}\n\n\
         Please login at: {login_url}\n\n\
         For security reasons, please change your password after first login.\n\n\
         Best regards,\n\
         School Management Team\n",
        name = profile.full_name(),
        portal = kind.label().to_lowercase(),
        id_label = kind.identifier_label(),
        identifier = profile.identifier(),
    );

    CredentialsEmail { subject, body }
}

/// Message for an account without a linked profile.
pub fn account_credentials(
    role: RoleEnum,
    display_name: &str,
    email: &str,
    password: &str,
    login_url: &str,
) -> CredentialsEmail {
    let role_label = match role {
        RoleEnum::Admin => "Admin",
        RoleEnum::Teacher => "Teacher",
        RoleEnum::Student => "Student",
    };
    let subject = format!("Your {role_label} Account - School Management System");
    let body = format!(
        "Hello {display_name},\n\n\
         Your {role} account has been created successfully.\n\n\
         Login Credentials:\n\
         ------------------\n\
         Email: {email}\n\
         Password: {password}\n\n\
         Please login at: {login_url}\n\n\
         For security reasons, please change your password after first login.\n\n\
         Best regards,\n\
         School Management Team\n",
        role = role.as_str(),
    );

    CredentialsEmail { subject, body }
}
