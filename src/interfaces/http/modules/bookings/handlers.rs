//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;

use crate::application::services::{AdmissionRequest, BookingService, PricingService};
use crate::domain::StayPeriod;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};
use crate::shared::errors::{DomainError, DomainResult};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub pricing: Arc<PricingService>,
    pub bookings: Arc<BookingService>,
    /// Currency all stays are charged in (ISO 4217)
    pub currency: String,
}

/// Parse the ISO dates of a request into a stay period.
fn parse_period(check_in: &str, check_out: &str) -> DomainResult<StayPeriod> {
    let parse = |label: &str, value: &str| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| DomainError::Validation(format!("invalid {}: {}", label, e)))
    };
    StayPeriod::new(parse("check_in", check_in)?, parse("check_out", check_out)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/quote",
    tag = "Bookings",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Priced stay", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Invalid interval or rate"),
        (status = 422, description = "Unknown or expired discount code")
    )
)]
pub async fn quote_stay(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<QuoteResponse>>)> {
    let period = parse_period(&request.check_in, &request.check_out).map_err(error_response)?;

    let quote = state
        .pricing
        .quote(
            request.nightly_rate,
            &period,
            request.discount_code.as_deref(),
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(QuoteResponse::from_quote(
        quote,
        &state.currency,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking admitted in pending state", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Unit unavailable for the requested dates"),
        (status = 422, description = "Unknown or expired discount code"),
        (status = 503, description = "Admission lock timed out, retry")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let period = parse_period(&request.check_in, &request.check_out).map_err(error_response)?;

    let quote = state
        .pricing
        .quote(
            request.nightly_rate,
            &period,
            request.discount_code.as_deref(),
        )
        .await
        .map_err(error_response)?;

    let booking = state
        .bookings
        .admit(AdmissionRequest {
            unit_id: request.unit_id,
            guest: request.guest.into(),
            period,
            total_amount: quote.total_amount,
            currency: state.currency.clone(),
            discount: quote.discount,
        })
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)>
{
    let bookings = state.bookings.list_all().await.map_err(error_response)?;
    let dtos: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .bookings
        .get(&booking_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            error_response(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.clone(),
            })
        })?;

    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/cancel",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Booking already confirmed")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .bookings
        .cancel(&booking_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/units/{unit_id}/bookings",
    tag = "Bookings",
    params(("unit_id" = String, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Holding (pending or confirmed) bookings occupying the unit's calendar", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_unit_bookings(
    State(state): State<BookingAppState>,
    Path(unit_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)>
{
    let bookings = state
        .bookings
        .holding_for_unit(&unit_id)
        .await
        .map_err(error_response)?;
    let dtos: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

// ── Tests ──────────────────────────────────────────────────────
