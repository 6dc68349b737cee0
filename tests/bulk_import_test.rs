mod common;

use std::sync::Arc;

use common::{
    FailingEmailSender, memory_sender, teacher_csv, teacher_csv_row, test_db, test_settings,
};
use school_manager::config::ServiceSettings;
use school_manager::entities::sea_orm_active_enums::RoleEnum;
use school_manager::error::AppError;
use school_manager::repositories::{AccountRepository, TeacherRepository};
use school_manager::services::bulk_import::{
    BulkTeacherImporter, ImportOptions, TemplateFormat, UploadedFile,
};
use school_manager::services::{AccountProvisioner, NewAccount};

fn csv_file(bytes: Vec<u8>) -> UploadedFile {
    UploadedFile {
        file_name: "teachers.csv".to_string(),
        bytes,
    }
}

#[tokio::test]
async fn imports_rows_with_sequential_employee_ids_and_credentials() {
    let db = test_db().await;
    let (sender, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db.clone(), shared, test_settings());

    let rows: Vec<String> = (1..=3).map(teacher_csv_row).collect();
    let outcome = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 3);
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);

    let ids: Vec<&str> = outcome
        .created_profiles
        .iter()
        .map(|t| t.employee_id.as_str())
        .collect();
    assert_eq!(ids, ["TCH00001", "TCH00002", "TCH00003"]);
    assert!(outcome.created_profiles.iter().all(|t| t.account_id.is_some()));

    assert_eq!(outcome.issued_credentials.len(), 3);
    assert_eq!(outcome.issued_credentials[0].employee_id, "TCH00001");
    assert_eq!(outcome.issued_credentials[0].email, "teacher1@school.test");

    let sent = sender.sent_emails().await;
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].subject, "Your Teacher Portal Login Credentials");
    assert!(sent[0].body.contains("TCH00001"));
    assert!(sent[0].body.contains(&outcome.issued_credentials[0].password));

    let teachers = AccountRepository::new(db)
        .find_by_role(RoleEnum::Teacher)
        .await
        .unwrap();
    assert_eq!(teachers.len(), 3);
}

#[tokio::test]
async fn missing_required_column_rejects_the_whole_file() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db.clone(), shared, test_settings());

    let csv = "first_name,last_name,gender,date_of_birth,email,phone,qualification,specialization,employment_status\n\
               Kwame,Mensah,M,1985-05-15,kwame@school.test,0241234567,bachelor,Mathematics,permanent\n";
    let err = importer
        .process(&csv_file(csv.as_bytes().to_vec()), ImportOptions::default())
        .await
        .unwrap_err();

    match err {
        AppError::MissingColumns(columns) => assert_eq!(columns, ["hire_date"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(TeacherRepository::new(db.clone()).count().await.unwrap(), 0);
    assert_eq!(AccountRepository::new(db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn bad_date_rejects_only_its_row() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db.clone(), shared, test_settings());

    let mut rows: Vec<String> = (1..=5).map(teacher_csv_row).collect();
    rows[3] = rows[3].replace("1985-05-15", "15th of May");

    let outcome = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 4);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Row 5:"), "{}", outcome.errors[0]);
    assert!(outcome.errors[0].contains("date_of_birth"));
    assert_eq!(TeacherRepository::new(db).count().await.unwrap(), 4);
}

#[tokio::test]
async fn field_problems_are_reported_together() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db, shared, test_settings());

    let row = "K,,Mensah,X,1985-05-15,kwame@school.test,12ab,,,bachelor,Mathematics,permanent,2020-09-01"
        .to_string();
    let outcome = importer
        .process(&csv_file(teacher_csv(&[row])), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 0);
    let error = &outcome.errors[0];
    assert!(error.starts_with("Row 2:"));
    assert!(error.contains("first_name:"));
    assert!(error.contains("gender: Value 'X' is not a valid choice"));
    assert!(error.contains("phone:"));
}

#[tokio::test]
async fn existing_account_keeps_profile_and_reports_row() {
    let db = test_db().await;
    let (_, shared) = memory_sender();

    AccountProvisioner::new(db.clone(), shared.clone(), test_settings())
        .create_account(
            NewAccount {
                email: "teacher2@school.test".to_string(),
                role: RoleEnum::Student,
                password: Some("Taken123".to_string()),
                first_name: "Someone".to_string(),
                last_name: "Else".to_string(),
            },
            None,
            false,
        )
        .await
        .unwrap();

    let importer = BulkTeacherImporter::new(db.clone(), shared, test_settings());
    let rows: Vec<String> = (1..=3).map(teacher_csv_row).collect();
    let outcome = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 3);
    assert_eq!(outcome.created_profiles.len(), 3);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Row 3:"));
    assert!(outcome.errors[0].contains("already exists"));

    let orphan = &outcome.created_profiles[1];
    assert_eq!(orphan.email.as_deref(), Some("teacher2@school.test"));
    assert!(orphan.account_id.is_none());

    assert_eq!(outcome.issued_credentials.len(), 2);
    assert_eq!(AccountRepository::new(db).count().await.unwrap(), 3);
}

#[tokio::test]
async fn repeated_email_in_file_is_rejected() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db, shared, test_settings());

    let rows = vec![teacher_csv_row(1), teacher_csv_row(1).replace("Teacher1", "Other")];
    let outcome = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 1);
    assert_eq!(
        outcome.errors,
        ["Row 3: Teacher with email teacher1@school.test already exists"]
    );
}

#[tokio::test]
async fn repeated_email_with_different_domain_case_is_rejected() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db.clone(), shared, test_settings());

    let rows = vec![
        teacher_csv_row(1),
        teacher_csv_row(2).replace("teacher2@school.test", "teacher1@School.TEST"),
    ];
    let outcome = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 1);
    assert_eq!(
        outcome.errors,
        ["Row 3: Teacher with email teacher1@school.test already exists"]
    );
    assert_eq!(TeacherRepository::new(db).count().await.unwrap(), 1);
}

#[tokio::test]
async fn profiles_only_when_accounts_are_disabled() {
    let db = test_db().await;
    let (sender, shared) = memory_sender();
    let importer = BulkTeacherImporter::new(db.clone(), shared, test_settings());

    let rows: Vec<String> = (1..=2).map(teacher_csv_row).collect();
    let outcome = importer
        .process(
            &csv_file(teacher_csv(&rows)),
            ImportOptions {
                create_accounts: false,
                send_emails: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert!(outcome.issued_credentials.is_empty());
    assert!(sender.sent_emails().await.is_empty());
    assert_eq!(AccountRepository::new(db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn delivery_failures_do_not_fail_the_import() {
    let db = test_db().await;
    let importer =
        BulkTeacherImporter::new(db.clone(), Arc::new(FailingEmailSender), test_settings());

    let rows: Vec<String> = (1..=2).map(teacher_csv_row).collect();
    let outcome = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.issued_credentials.len(), 2);
    assert_eq!(AccountRepository::new(db).count().await.unwrap(), 2);
}

#[tokio::test]
async fn downloaded_templates_import_cleanly() {
    for format in [TemplateFormat::Xlsx, TemplateFormat::Csv] {
        let db = test_db().await;
        let (_, shared) = memory_sender();
        let importer = BulkTeacherImporter::new(db, shared, test_settings());

        let file = UploadedFile {
            file_name: format.file_name().to_string(),
            bytes: format.render().unwrap(),
        };
        let outcome = importer.process(&file, ImportOptions::default()).await.unwrap();

        assert!(outcome.errors.is_empty(), "{format:?}: {:?}", outcome.errors);
        assert_eq!(outcome.success_count, 2, "{format:?}");
    }
}

#[tokio::test]
async fn oversized_and_unknown_files_are_refused() {
    let db = test_db().await;
    let (_, shared) = memory_sender();
    let settings = ServiceSettings {
        max_upload_bytes: 64,
        ..test_settings()
    };
    let importer = BulkTeacherImporter::new(db, shared, settings);

    let rows: Vec<String> = (1..=2).map(teacher_csv_row).collect();
    let err = importer
        .process(&csv_file(teacher_csv(&rows)), ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SizeLimitExceeded { .. }));

    let err = importer
        .process(
            &UploadedFile {
                file_name: "teachers.pdf".to_string(),
                bytes: b"%PDF".to_vec(),
            },
            ImportOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedFormat));
}
