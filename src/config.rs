use clap::Parser;
use once_cell::sync::Lazy;

pub const JWT_EXPIRED_TIME: i64 = 86400i64;

// Bulk import
pub const MAX_UPLOAD_SIZE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

pub const MAIL_QUEUE: &str = "mail_service";

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub openapi_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = JWT_EXPIRED_TIME)]
    pub jwt_expires_in: i64,

    /// Leave unset to log credential emails instead of queueing them.
    #[clap(long, env)]
    pub rabbitmq_uri: Option<String>,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "http://localhost:3000/login")]
    pub login_url: String,

    #[clap(long, env, default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

/// Plain values the services need, detached from the process-wide config.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub login_url: String,
    pub hash_cost: u32,
    pub max_upload_bytes: usize,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            login_url: config.login_url.clone(),
            hash_cost: config.bcrypt_cost,
            max_upload_bytes: MAX_UPLOAD_SIZE_BYTES,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            login_url: "http://localhost:3000/login".to_string(),
            hash_cost: bcrypt::DEFAULT_COST,
            max_upload_bytes: MAX_UPLOAD_SIZE_BYTES,
        }
    }
}
