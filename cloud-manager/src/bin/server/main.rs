use std::sync::Arc;

use auth::SigningKeyProvider;
use auth::SystemClock;
use cloud_manager::config;
use cloud_manager::config::Config;
use cloud_manager::domain::auth::service::AuthService;
use cloud_manager::inbound::http::router::create_router;
use cloud_manager::user_store::InMemoryUserStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloud_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "cloud-manager",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        run_mode = %config::run_mode(),
        http_port = config.server.http_port,
        development_mode = config.security.development_mode,
        instance_name = ?config.instance.name,
        users = config.users.len(),
        "Configuration loaded"
    );

    if config.security.development_mode {
        tracing::warn!(
            "Development mode is enabled: tokens are signed with a fixed, publicly known key"
        );
    }

    let key_provider = SigningKeyProvider::new(config.security.development_mode);

    let user_store = Arc::new(InMemoryUserStore::from_config(&config.users));
    if user_store.is_empty() {
        tracing::warn!("No users configured, credential logins will always fail");
    }

    let auth_service = Arc::new(AuthService::new(
        user_store,
        &key_provider,
        Arc::new(SystemClock),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, config.instance.name.clone());
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
