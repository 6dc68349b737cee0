//! Account creation, credential issuing and portal access.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::config::ServiceSettings;
use crate::entities::account;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::repositories::{
    AccountRepository, NewAccountRecord, StudentRepository, TeacherRepository,
    is_unique_violation,
};
use crate::services::credentials_email::{account_credentials, profile_credentials};
use crate::services::notification::{NotificationError, SharedEmailSender};
use crate::services::password_generator::PasswordGenerator;
use crate::services::profile::{Profile, ProfileKind, display_name};

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub role: RoleEnum,
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone)]
pub struct ProvisionedAccount {
    pub account: account::Model,
    /// The profile after linking, when one was supplied.
    pub profile: Option<Profile>,
    /// Set only when the password was generated; handed out once and never stored.
    pub generated_password: Option<String>,
}

pub struct AccountProvisioner {
    accounts: AccountRepository,
    teachers: TeacherRepository,
    students: StudentRepository,
    email_sender: SharedEmailSender,
    settings: ServiceSettings,
    generator: PasswordGenerator,
}

impl AccountProvisioner {
    pub fn new(
        db: DatabaseConnection,
        email_sender: SharedEmailSender,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            teachers: TeacherRepository::new(db.clone()),
            students: StudentRepository::new(db),
            email_sender,
            settings,
            generator: PasswordGenerator::default(),
        }
    }

    pub async fn create_account(
        &self,
        new_account: NewAccount,
        profile: Option<Profile>,
        notify: bool,
    ) -> Result<ProvisionedAccount, AppError> {
        let email = normalize_email(&new_account.email)?;

        if self.accounts.exists_by_email(&email).await? {
            return Err(duplicate_account(&email));
        }

        if let Some(profile) = &profile {
            if profile.kind().role() != new_account.role {
                return Err(AppError::FieldValidation(format!(
                    "A {} profile cannot be linked to a {} account",
                    profile.kind().label().to_lowercase(),
                    new_account.role
                )));
            }
            if profile.account_id().is_some() {
                return Err(AppError::FieldValidation(
                    "Profile is already linked to an account".to_string(),
                ));
            }
        }

        let supplied = new_account.password.filter(|p| !p.is_empty());
        let (password, generated) = match supplied {
            Some(password) => (password, false),
            None if new_account.role.allows_generated_password() => {
                (self.generator.generate(), true)
            }
            None => {
                return Err(AppError::MissingCredential(
                    new_account.role.as_str().to_string(),
                ));
            }
        };

        let password_hash = bcrypt::hash(&password, self.settings.hash_cost)?;

        let account = self
            .accounts
            .create(NewAccountRecord {
                email: email.clone(),
                password_hash,
                role: new_account.role,
                first_name: new_account.first_name,
                last_name: new_account.last_name,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate_account(&email)
                } else {
                    AppError::Database(e)
                }
            })?;

        let profile = match profile {
            Some(Profile::Teacher(teacher)) => Some(Profile::Teacher(
                self.teachers.link_account(teacher, account.account_id).await?,
            )),
            Some(Profile::Student(student)) => Some(Profile::Student(
                self.students.link_account(student, account.account_id).await?,
            )),
            None => None,
        };

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            generated_password = generated,
            "Account created"
        );

        if notify {
            self.send_credentials(&account, profile.as_ref(), &password)
                .await;
        }

        Ok(ProvisionedAccount {
            account,
            profile,
            generated_password: generated.then_some(password),
        })
    }

    /// Issues a fresh password for a teacher or student account.
    pub async fn reset_password(&self, account_id: Uuid) -> Result<String, AppError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        if !account.role.allows_generated_password() {
            return Err(AppError::UnsupportedOperation(
                "Password reset is only available for teacher and student accounts".to_string(),
            ));
        }

        let password = self.generator.generate();
        let password_hash = bcrypt::hash(&password, self.settings.hash_cost)?;
        self.accounts
            .update_password_hash(account, password_hash)
            .await?;

        tracing::info!(account_id = %account_id, "Portal password reset");

        Ok(password)
    }

    /// Checks the password and login flags, then stamps the login time.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        ip_address: Option<String>,
    ) -> Result<account::Model, AppError> {
        let email = normalize_email(email)?;
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let password_valid = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;
        if !password_valid {
            return Err(invalid_credentials());
        }

        if !account.can_login() {
            return Err(AppError::Forbidden(
                "Your account has been deactivated. Please contact the administrator.".to_string(),
            ));
        }

        Ok(self.accounts.record_login(account, ip_address).await?)
    }

    pub async fn resolve_profile(
        &self,
        account: &account::Model,
    ) -> Result<Option<Profile>, AppError> {
        let profile = match ProfileKind::for_role(account.role) {
            Some(ProfileKind::Teacher) => self
                .teachers
                .find_by_account_id(account.account_id)
                .await?
                .map(Profile::Teacher),
            Some(ProfileKind::Student) => self
                .students
                .find_by_account_id(account.account_id)
                .await?
                .map(Profile::Student),
            None => None,
        };
        Ok(profile)
    }

    pub async fn set_portal_access(
        &self,
        account_id: Uuid,
        enabled: bool,
    ) -> Result<account::Model, AppError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        Ok(self.accounts.set_portal_access(account, enabled).await?)
    }

    pub async fn find_account(&self, account_id: Uuid) -> Result<account::Model, AppError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account".to_string()))
    }

    /// Best effort: a delivery failure is logged and the account stays.
    async fn send_credentials(
        &self,
        account: &account::Model,
        profile: Option<&Profile>,
        password: &str,
    ) {
        let message = match profile {
            Some(profile) => {
                profile_credentials(profile, &account.email, password, &self.settings.login_url)
            }
            None => account_credentials(
                account.role,
                &display_name(account, None),
                &account.email,
                password,
                &self.settings.login_url,
            ),
        };

        match self
            .email_sender
            .send(&account.email, &message.subject, &message.body)
            .await
        {
            Ok(()) => {
                tracing::info!(recipient = %account.email, "Credentials email sent");
            }
            Err(NotificationError::Delivery(reason)) => {
                tracing::warn!(
                    recipient = %account.email,
                    error = %reason,
                    "Failed to send credentials email"
                );
            }
        }
    }
}

/// Trims the address and lowercases its domain part.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::FieldValidation("Email is required".to_string()));
    }

    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(format!("{local}@{}", domain.to_lowercase()))
        }
        _ => Err(AppError::FieldValidation(
            "Enter a valid email address".to_string(),
        )),
    }
}

fn duplicate_account(email: &str) -> AppError {
    AppError::DuplicateIdentity(format!("An account with email {email} already exists"))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_only_the_domain() {
        assert_eq!(
            normalize_email("  John.Doe@Example.COM ").unwrap(),
            "John.Doe@example.com"
        );
    }

    #[test]
    fn rejects_empty_email() {
        assert!(matches!(
            normalize_email("   "),
            Err(AppError::FieldValidation(_))
        ));
    }

    #[test]
    fn rejects_address_without_domain() {
        assert!(matches!(
            normalize_email("john@"),
            Err(AppError::FieldValidation(_))
        ));
        assert!(matches!(
            normalize_email("john"),
            Err(AppError::FieldValidation(_))
        ));
    }
}
