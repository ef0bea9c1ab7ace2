//! Payment HTTP handlers
//!
//! Two entry points feed the reconciler: the synchronous client verify
//! call and the provider's webhook. The webhook handler passes the raw
//! body through untouched, since the HMAC covers the exact bytes on the
//! wire.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::application::services::{PaymentReconciler, WebhookOutcome};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::bookings::BookingDto;
use crate::shared::errors::DomainError;

use super::dto::*;

/// Header carrying the provider's HMAC-SHA-512 hex digest of the body
pub const SIGNATURE_HEADER: &str = "x-payment-signature";

/// Application state for payment handlers.
#[derive(Clone)]
pub struct PaymentAppState {
    pub reconciler: Arc<PaymentReconciler>,
}

fn outcome_label(outcome: WebhookOutcome) -> &'static str {
    match outcome {
        WebhookOutcome::Confirmed => "confirmed",
        WebhookOutcome::AlreadyConfirmed => "already_confirmed",
        WebhookOutcome::Unmatched => "unmatched",
        WebhookOutcome::Ignored => "ignored",
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/verify",
    tag = "Payments",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, booking confirmed", body = ApiResponse<BookingDto>),
        (status = 402, description = "Provider did not report a successful charge"),
        (status = 404, description = "No booking holds this reference"),
        (status = 409, description = "Booking already cancelled"),
        (status = 502, description = "Provider unreachable, retry")
    )
)]
pub async fn verify_payment(
    State(state): State<PaymentAppState>,
    ValidatedJson(request): ValidatedJson<VerifyPaymentRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .reconciler
        .verify_payment(&request.reference, &request.provider_reference)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/webhook",
    tag = "Payments",
    request_body = String,
    responses(
        (status = 200, description = "Delivery acknowledged (including duplicates and unmatched references)", body = ApiResponse<WebhookAck>),
        (status = 401, description = "Signature does not match the request body")
    )
)]
pub async fn payment_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<WebhookAck>>, (StatusCode, Json<ApiResponse<WebhookAck>>)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| error_response(DomainError::InvalidSignature))?;

    let outcome = state
        .reconciler
        .process_webhook(&body, signature)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(WebhookAck {
        outcome: outcome_label(outcome).to_string(),
    })))
}

// ── Tests ──────────────────────────────────────────────────────
