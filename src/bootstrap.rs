use anyhow::{Context, Result};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::repositories::AccountRepository;
use crate::services::NewAccount;
use crate::services::account_provisioner::normalize_email;
use crate::state::AppState;

/// Creates the configured admin account on first start.
pub async fn initialize_admin_user(state: &AppState, email: &str, password: &str) -> Result<()> {
    let email = normalize_email(email).context("Invalid admin email")?;

    let existing_admin = AccountRepository::new(state.db.clone())
        .find_by_email(&email)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin account already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!(email = %email, "Creating default admin account...");

    state
        .provisioner()
        .create_account(
            NewAccount {
                email,
                role: RoleEnum::Admin,
                password: Some(password.to_string()),
                first_name: "System".to_string(),
                last_name: "Administrator".to_string(),
            },
            None,
            false,
        )
        .await
        .context("Failed to create admin account")?;

    tracing::info!("Default admin account created");
    Ok(())
}
