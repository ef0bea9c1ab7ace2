//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{BookingService, PaymentReconciler, PricingService};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::bookings::{self, BookingAppState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{self, MetricsState};
use crate::interfaces::http::modules::payments::{self, PaymentAppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Bookings
        bookings::handlers::quote_stay,
        bookings::handlers::create_booking,
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::cancel_booking,
        bookings::handlers::list_unit_bookings,
        // Payments
        payments::handlers::verify_payment,
        payments::handlers::payment_webhook,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Bookings
            bookings::GuestDto,
            bookings::QuoteRequest,
            bookings::QuoteResponse,
            bookings::AppliedDiscountDto,
            bookings::CreateBookingRequest,
            bookings::BookingDto,
            // Payments
            payments::VerifyPaymentRequest,
            payments::WebhookAck,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Bookings", description = "Stay quotes, booking admission and cancellation"),
        (name = "Payments", description = "Payment verification and provider webhook intake"),
    ),
    info(
        title = "Stayvia Booking API",
        version = "1.0.0",
        description = "REST API for apartment booking admission and payment reconciliation",
        license(name = "MIT"),
        contact(name = "Stayvia", email = "support@stayvia.example")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    pricing: Arc<PricingService>,
    bookings: Arc<BookingService>,
    reconciler: Arc<PaymentReconciler>,
    db: DatabaseConnection,
    prometheus_handle: PrometheusHandle,
    currency: &str,
) -> Router {
    let booking_state = BookingAppState {
        pricing,
        bookings,
        currency: currency.to_string(),
    };

    let payment_state = PaymentAppState { reconciler };

    let health_state = HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = MetricsState {
        handle: prometheus_handle,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::handlers::list_bookings).post(bookings::handlers::create_booking),
        )
        .route("/quote", post(bookings::handlers::quote_stay))
        .route("/{booking_id}", get(bookings::handlers::get_booking))
        .route(
            "/{booking_id}/cancel",
            post(bookings::handlers::cancel_booking),
        )
        .with_state(booking_state.clone());

    let unit_routes = Router::new()
        .route(
            "/{unit_id}/bookings",
            get(bookings::handlers::list_unit_bookings),
        )
        .with_state(booking_state);

    let payment_routes = Router::new()
        .route("/verify", post(payments::handlers::verify_payment))
        .route("/webhook", post(payments::handlers::payment_webhook))
        .with_state(payment_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check).with_state(health_state))
        // Prometheus scrape endpoint
        .route(
            "/metrics",
            get(metrics::handlers::prometheus_metrics).with_state(metrics_state),
        )
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Units (read-only dashboard view)
        .nest("/api/v1/units", unit_routes)
        // Payments
        .nest("/api/v1/payments", payment_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
