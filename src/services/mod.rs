pub mod account_provisioner;
pub mod bulk_import;
pub mod credentials_email;
pub mod notification;
pub mod password_generator;
pub mod profile;
pub mod student_service;
pub mod teacher_service;

pub use account_provisioner::{AccountProvisioner, NewAccount, ProvisionedAccount};
pub use bulk_import::BulkTeacherImporter;
pub use notification::{EmailSender, NotificationError, SharedEmailSender};
pub use password_generator::PasswordGenerator;
pub use profile::{HasProfile, Profile, ProfileKind, ProfileRef};
pub use student_service::StudentService;
pub use teacher_service::TeacherService;
