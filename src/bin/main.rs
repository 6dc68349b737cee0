use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use school_manager::bootstrap::initialize_admin_user;
use school_manager::config::{APP_CONFIG, ServiceSettings};
use school_manager::database::get_database_connection;
use school_manager::rabbitmq_service::rabbitmq_service::RabbitMQService;
use school_manager::services::notification::{
    LogEmailSender, RabbitMqEmailSender, SharedEmailSender,
};
use school_manager::state::AppState;
use school_manager::utils::jwt::JwtManager;
use school_manager::{app, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    tracing::info!("Starting application...");

    let db_connection = get_database_connection(&APP_CONFIG.database_url).await?;
    let email_sender = build_email_sender().await;

    let state = AppState {
        db: db_connection,
        email_sender,
        settings: ServiceSettings::from_config(&APP_CONFIG),
        jwt: Arc::new(JwtManager::new(
            &APP_CONFIG.jwt_secret,
            APP_CONFIG.jwt_expires_in,
        )),
        app_env: APP_CONFIG.app_env.clone(),
    };

    tracing::info!("Checking admin account...");
    if let Err(e) =
        initialize_admin_user(&state, &APP_CONFIG.admin_email, &APP_CONFIG.admin_password).await
    {
        tracing::error!("Failed to initialize admin account: {:#}", e);
        tracing::warn!("Continuing without admin account initialization...");
    }

    let app = app::create_app(state, &APP_CONFIG);

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server error")?;

    Ok(())
}

/// Queue-backed sender when RabbitMQ is configured and reachable, log-only otherwise.
async fn build_email_sender() -> SharedEmailSender {
    let Some(uri) = APP_CONFIG.rabbitmq_uri.as_deref() else {
        tracing::warn!("RABBITMQ_URI not set, credential emails will only be logged");
        return Arc::new(LogEmailSender);
    };

    let connection = match RabbitMQService::new(uri).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!("{:#}", e);
            tracing::warn!("Continuing without RabbitMQ, credential emails will only be logged");
            return Arc::new(LogEmailSender);
        }
    };

    if let Ok(()) = RabbitMQService::create_mail_queue(&connection).await {
        tracing::info!("Create rabbitmq queue successfully");
    }

    Arc::new(RabbitMqEmailSender::new(Arc::new(connection)))
}
