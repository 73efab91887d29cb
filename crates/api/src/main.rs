//! API server entry point.

use std::sync::Arc;

use api::config::Config;
use api::routes::restaurants::AppState;
use auth::{JwtGate, TokenGate};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{InMemoryStore, OrderStore, PostgresStore, RestaurantStore, UserStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

fn build_gate(config: &Config) -> Arc<dyn TokenGate> {
    let token = &config.token;
    match (&token.public_key_pem, &token.shared_secret) {
        (Some(pem), _) => Arc::new(
            JwtGate::rs256(pem, &token.issuer, &token.audience)
                .expect("AUTH_PUBLIC_KEY is not a valid RSA PEM"),
        ),
        (None, Some(secret)) => Arc::new(JwtGate::hs256(secret, &token.issuer, &token.audience)),
        (None, None) => {
            panic!("set AUTH_PUBLIC_KEY or AUTH_SHARED_SECRET to verify bearer tokens")
        }
    }
}

async fn serve<S>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle, config: &Config)
where
    S: RestaurantStore + OrderStore + UserStore + Clone + 'static,
{
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let config = Config::from_env();
    let gate = build_gate(&config);

    // 3. Pick a store: PostgreSQL when DATABASE_URL is set, in-memory otherwise
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PostgresStore::connect(&url)
                .await
                .expect("failed to connect to database");
            store.run_migrations().await.expect("migrations failed");
            serve(api::create_state(store, gate), metrics_handle, &config).await;
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let store = InMemoryStore::new();
            serve(api::create_state(store, gate), metrics_handle, &config).await;
        }
    }
}
