//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::Quote;
use crate::domain::{AppliedDiscount, Booking, Guest};

/// Guest contact captured with a booking
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GuestDto {
    /// Registered user id, when the guest was signed in
    pub user_id: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
}

impl From<GuestDto> for Guest {
    fn from(dto: GuestDto) -> Self {
        Guest {
            user_id: dto.user_id,
            full_name: dto.full_name,
            email: dto.email,
            phone: dto.phone,
        }
    }
}

/// Request to price a stay without booking it
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// Rate per night in minor currency units
    #[validate(range(min = 1))]
    pub nightly_rate: i64,
    /// First booked night (ISO date, e.g. "2024-03-01")
    pub check_in: String,
    /// Check-out day, exclusive (ISO date)
    pub check_out: String,
    pub discount_code: Option<String>,
}

/// Request to admit a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 64))]
    pub unit_id: String,
    /// Rate per night in minor currency units, from the unit's listing
    #[validate(range(min = 1))]
    pub nightly_rate: i64,
    /// First booked night (ISO date)
    pub check_in: String,
    /// Check-out day, exclusive (ISO date)
    pub check_out: String,
    #[validate(nested)]
    pub guest: GuestDto,
    pub discount_code: Option<String>,
}

/// Discount audit record in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedDiscountDto {
    pub code: String,
    pub kind: String,
    pub value: i64,
    pub amount_off: i64,
}

impl From<AppliedDiscount> for AppliedDiscountDto {
    fn from(d: AppliedDiscount) -> Self {
        Self {
            code: d.code,
            kind: d.kind.as_str().to_string(),
            value: d.value,
            amount_off: d.amount_off,
        }
    }
}

/// Priced stay in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub nights: i64,
    pub nightly_rate: i64,
    pub base_amount: i64,
    pub total_amount: i64,
    pub currency: String,
    pub discount: Option<AppliedDiscountDto>,
}

impl QuoteResponse {
    pub fn from_quote(quote: Quote, currency: &str) -> Self {
        Self {
            nights: quote.nights,
            nightly_rate: quote.nightly_rate,
            base_amount: quote.base_amount,
            total_amount: quote.total_amount,
            currency: currency.to_string(),
            discount: quote.discount.map(Into::into),
        }
    }
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub unit_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: i64,
    pub total_amount: i64,
    pub currency: String,
    pub discount: Option<AppliedDiscountDto>,
    /// Hand this to the payment provider to pay for the booking
    pub payment_reference: String,
    pub status: String,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            unit_id: b.unit_id,
            guest_name: b.guest.full_name,
            guest_email: b.guest.email,
            check_in: b.period.check_in().to_string(),
            check_out: b.period.check_out().to_string(),
            nights: b.period.nights(),
            total_amount: b.total_amount,
            currency: b.currency,
            discount: b.discount.map(Into::into),
            payment_reference: b.payment_reference,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.to_rfc3339(),
        }
    }
}
