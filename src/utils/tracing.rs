use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_standard_tracing(crate_name: &str, level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // The library crate logs under its own target, the binaries under theirs
                format!("{crate_name}={level},school_manager={level},tower_http={level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .init();
}
