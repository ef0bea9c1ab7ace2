//! Stayvia booking service
//!
//! Apartment booking backend: reservation admission and payment
//! reconciliation. Reads configuration from a TOML file
//! (~/.config/stayvia-booking/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use stayvia_booking::application::services::{
    BookingService, PaymentReconciler, PricingService, ReconcilerConfig,
};
use stayvia_booking::domain::RepositoryProvider;
use stayvia_booking::infrastructure::database::migrator::Migrator;
use stayvia_booking::infrastructure::{HttpPaymentGateway, PaymentGatewayConfig};
use stayvia_booking::notifications::InvoiceNotifier;
use stayvia_booking::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use stayvia_booking::{
    create_api_router, create_event_bus, default_config_path, init_database, AppConfig,
    DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Stayvia booking service...");

    if app_cfg.payment.webhook_secret.is_empty() {
        warn!("payment.webhook_secret is empty; every webhook delivery will be rejected");
    }

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Initialize event bus for real-time notifications
    let event_bus = create_event_bus();
    info!("Event bus initialized for real-time notifications");

    // ── Services ───────────────────────────────────────────────
    let notifier = Arc::new(InvoiceNotifier::new(event_bus.clone()));
    let pricing = Arc::new(PricingService::new(repos.clone()));
    let bookings = Arc::new(BookingService::with_lock_timeout(
        repos,
        notifier,
        event_bus.clone(),
        Duration::from_millis(app_cfg.booking.lock_timeout_ms),
    ));

    let gateway = Arc::new(HttpPaymentGateway::new(PaymentGatewayConfig {
        base_url: app_cfg.payment.provider_base_url.clone(),
        secret_key: app_cfg.payment.secret_key.clone(),
    }));
    let reconciler = Arc::new(PaymentReconciler::new(
        bookings.clone(),
        gateway,
        event_bus,
        ReconcilerConfig {
            webhook_secret: app_cfg.payment.webhook_secret.clone(),
        },
    ));

    // Initialize shutdown coordination
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // Create REST API router
    let api_router = create_api_router(
        pricing,
        bookings,
        reconciler,
        db.clone(),
        prometheus_handle,
        &app_cfg.booking.currency,
    );

    // Start REST API server with graceful shutdown
    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    info!("Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Stayvia booking service shutdown complete");
    Ok(())
}
