use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use school_manager::config::ServiceSettings;
use school_manager::database::get_database_connection;
use school_manager::services::TeacherService;
use school_manager::services::bulk_import::row::TeacherRowValues;
use school_manager::services::notification::LogEmailSender;
use school_manager::utils::random::random_string_from;
use school_manager::utils::tracing::init_standard_tracing;

const FIRST_NAMES: [&str; 6] = ["Kwame", "Ama", "Kofi", "Abena", "Yaw", "Akosua"];
const LAST_NAMES: [&str; 6] = ["Mensah", "Owusu", "Boateng", "Asante", "Osei", "Adjei"];
const SPECIALIZATIONS: [&str; 4] = ["Mathematics", "English", "Integrated Science", "History"];
const QUALIFICATIONS: [&str; 4] = ["diploma", "bachelor", "master", "phd"];

/// Creates sample teachers for local development.
#[derive(Debug, Parser)]
struct Args {
    #[clap(long, env)]
    database_url: String,

    #[clap(long, default_value_t = 10)]
    count: usize,

    /// Also create portal accounts and print their credentials.
    #[clap(long)]
    with_portal: bool,

    #[clap(long, env, default_value = "info")]
    log_level: String,

    #[clap(long, env, default_value = "http://localhost:3000/login")]
    login_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &args.log_level);

    let db = get_database_connection(&args.database_url).await?;
    let settings = ServiceSettings {
        login_url: args.login_url.clone(),
        ..ServiceSettings::default()
    };
    let service = TeacherService::new(db, Arc::new(LogEmailSender), settings);

    // Keeps emails unique across repeated runs.
    let batch = random_string_from(b"abcdefghijklmnopqrstuvwxyz0123456789", 6);

    let mut created = 0;
    for n in 0..args.count {
        let values = sample_teacher(n, &batch);
        let email = values.email.clone().unwrap_or_default();

        match service.register(values, args.with_portal, false).await {
            Ok(registration) => {
                created += 1;
                match registration.generated_password {
                    Some(password) => println!(
                        "{}\t{}\t{}",
                        registration.teacher.employee_id, email, password
                    ),
                    None => println!("{}\t{}", registration.teacher.employee_id, email),
                }
            }
            Err(e) => tracing::error!(email = %email, error = %e, "Failed to seed teacher"),
        }
    }

    tracing::info!(created, requested = args.count, "Seeding finished");
    Ok(())
}

fn sample_teacher(n: usize, batch: &str) -> TeacherRowValues {
    let first_name = FIRST_NAMES[n % FIRST_NAMES.len()];
    let last_name = LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()];

    TeacherRowValues {
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        gender: Some(if n % 2 == 0 { "M" } else { "F" }.to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1980 + (n % 15) as i32, 1 + (n % 12) as u32, 10),
        email: Some(format!(
            "{}.{}.{n}.{batch}@school.test",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        )),
        phone: Some(format!("+23324{:07}", n)),
        qualification: Some(QUALIFICATIONS[n % QUALIFICATIONS.len()].to_string()),
        specialization: Some(SPECIALIZATIONS[n % SPECIALIZATIONS.len()].to_string()),
        employment_status: Some("permanent".to_string()),
        hire_date: NaiveDate::from_ymd_opt(2015 + (n % 8) as i32, 9, 1),
        ..TeacherRowValues::default()
    }
}
