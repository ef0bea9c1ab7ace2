//! Common HTTP types: response envelope, error mapping, extractors

pub mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::errors::DomainError;

/// Standard API response envelope.
///
/// Every REST endpoint answers in this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request was handled successfully
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a domain error.
///
/// Conflicts are distinguishable from validation failures so a caller can
/// pick different dates instead of retrying the same request.
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::UnitUnavailable { .. } => StatusCode::CONFLICT,
        DomainError::UnknownDiscountCode(_) | DomainError::ExpiredDiscountCode(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::InvalidSignature => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::StateFinal { .. } => StatusCode::CONFLICT,
        DomainError::PaymentUnconfirmed(_) => StatusCode::PAYMENT_REQUIRED,
        DomainError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
        DomainError::LockTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error into the standard error response shape.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(&err), Json(ApiResponse::error(err.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn conflict_is_not_a_validation_status() {
        let conflict = DomainError::UnitUnavailable {
            unit_id: "U1".into(),
            check_in: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        assert_eq!(error_status(&conflict), StatusCode::CONFLICT);
        assert_eq!(
            error_status(&DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn signature_failures_are_unauthorized() {
        assert_eq!(
            error_status(&DomainError::InvalidSignature),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn retryable_errors_use_gateway_statuses() {
        assert_eq!(
            error_status(&DomainError::ProviderUnavailable("down".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&DomainError::LockTimeout("U1".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn envelope_shapes() {
        let ok = ApiResponse::success(1);
        assert!(ok.success);
        assert_eq!(ok.data, Some(1));

        let err = ApiResponse::<()>::error("boom");
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("boom"));
    }
}
