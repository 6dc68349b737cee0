mod common;

use std::sync::Arc;

use common::{FailingEmailSender, memory_sender, test_db, test_settings};
use school_manager::entities::sea_orm_active_enums::RoleEnum;
use school_manager::error::AppError;
use school_manager::repositories::AccountRepository;
use school_manager::services::password_generator::meets_composition_rules;
use school_manager::services::{AccountProvisioner, NewAccount};

fn new_account(email: &str, role: RoleEnum, password: Option<&str>) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        role,
        password: password.map(str::to_string),
        first_name: "Ama".to_string(),
        last_name: "Mensah".to_string(),
    }
}

#[tokio::test]
async fn teacher_without_password_gets_generated_credentials_by_email() {
    let db = test_db().await;
    let (sender, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db, shared, test_settings());

    let provisioned = provisioner
        .create_account(new_account("ama@school.test", RoleEnum::Teacher, None), None, true)
        .await
        .unwrap();

    let password = provisioned.generated_password.expect("password generated");
    assert_eq!(password.len(), 12);
    assert!(meets_composition_rules(&password));
    assert_ne!(provisioned.account.password_hash, password);
    assert!(bcrypt::verify(&password, &provisioned.account.password_hash).unwrap());

    let sent = sender.sent_emails().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ama@school.test");
    assert!(sent[0].body.contains(&password));
}

#[tokio::test]
async fn supplied_password_is_not_reported_as_generated() {
    let db = test_db().await;
    let (sender, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db, shared, test_settings());

    let provisioned = provisioner
        .create_account(
            new_account("kofi@school.test", RoleEnum::Student, Some("Chosen123")),
            None,
            false,
        )
        .await
        .unwrap();

    assert!(provisioned.generated_password.is_none());
    assert!(bcrypt::verify("Chosen123", &provisioned.account.password_hash).unwrap());
    assert!(sender.sent_emails().await.is_empty());
}

#[tokio::test]
async fn admin_requires_password() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db.clone(), shared, test_settings());

    let err = provisioner
        .create_account(new_account("root@school.test", RoleEnum::Admin, None), None, false)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingCredential(ref role) if role == "admin"));
    assert_eq!(AccountRepository::new(db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_second_account() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db.clone(), shared, test_settings());

    provisioner
        .create_account(new_account("dup@school.test", RoleEnum::Teacher, None), None, false)
        .await
        .unwrap();

    let err = provisioner
        .create_account(new_account(" dup@School.TEST ", RoleEnum::Student, None), None, false)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateIdentity(_)));
    assert_eq!(AccountRepository::new(db).count().await.unwrap(), 1);
}

#[tokio::test]
async fn delivery_failure_does_not_undo_the_account() {
    let db = test_db().await;
    let provisioner =
        AccountProvisioner::new(db.clone(), Arc::new(FailingEmailSender), test_settings());

    let provisioned = provisioner
        .create_account(new_account("yaw@school.test", RoleEnum::Teacher, None), None, true)
        .await
        .unwrap();

    assert!(provisioned.generated_password.is_some());
    let stored = AccountRepository::new(db)
        .find_by_email("yaw@school.test")
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn reset_password_replaces_the_old_one() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db, shared, test_settings());

    let provisioned = provisioner
        .create_account(
            new_account("abena@school.test", RoleEnum::Teacher, Some("Original1")),
            None,
            false,
        )
        .await
        .unwrap();

    let new_password = provisioner
        .reset_password(provisioned.account.account_id)
        .await
        .unwrap();
    assert!(meets_composition_rules(&new_password));

    let err = provisioner
        .authenticate("abena@school.test", "Original1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let account = provisioner
        .authenticate("abena@school.test", &new_password, Some("10.0.0.1".to_string()))
        .await
        .unwrap();
    assert!(account.last_login.is_some());
    assert_eq!(account.last_login_ip.as_deref(), Some("10.0.0.1"));
}

#[tokio::test]
async fn reset_password_is_refused_for_admins() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db, shared, test_settings());

    let admin = provisioner
        .create_account(
            new_account("admin@school.test", RoleEnum::Admin, Some("AdminPass1")),
            None,
            false,
        )
        .await
        .unwrap();

    let err = provisioner
        .reset_password(admin.account.account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedOperation(_)));

    provisioner
        .authenticate("admin@school.test", "AdminPass1", None)
        .await
        .expect("admin password unchanged");
}

#[tokio::test]
async fn disabled_portal_blocks_login() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let provisioner = AccountProvisioner::new(db, shared, test_settings());

    let provisioned = provisioner
        .create_account(
            new_account("efua@school.test", RoleEnum::Student, Some("Portal123")),
            None,
            false,
        )
        .await
        .unwrap();
    provisioner
        .set_portal_access(provisioned.account.account_id, false)
        .await
        .unwrap();

    let err = provisioner
        .authenticate("efua@school.test", "Portal123", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
