use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unit {unit_id} is unavailable from {check_in} to {check_out}")]
    UnitUnavailable {
        unit_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Unknown discount code: {0}")]
    UnknownDiscountCode(String),

    #[error("Discount code {0} has expired")]
    ExpiredDiscountCode(String),

    #[error("Webhook signature does not match request body")]
    InvalidSignature,

    #[error("Booking {id} is already {status} and cannot change state")]
    StateFinal { id: String, status: String },

    #[error("Payment {0} has not succeeded at the provider")]
    PaymentUnconfirmed(String),

    #[error("Payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Timed out waiting for the booking lock on unit {0}")]
    LockTimeout(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost,
    /// provider timeout) and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::ProviderUnavailable(_)
                | DomainError::LockTimeout(_)
                | DomainError::Storage(_)
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_flagged() {
        assert!(DomainError::ProviderUnavailable("timeout".into()).is_transient());
        assert!(DomainError::LockTimeout("U1".into()).is_transient());
        assert!(DomainError::Storage("connection reset".into()).is_transient());
    }

    #[test]
    fn caller_fault_errors_are_not_transient() {
        assert!(!DomainError::Validation("bad dates".into()).is_transient());
        assert!(!DomainError::InvalidSignature.is_transient());
        assert!(!DomainError::UnknownDiscountCode("nope".into()).is_transient());
    }

    #[test]
    fn infra_error_maps_to_storage() {
        let infra = InfraError::Crypto("bad key length".into());
        let domain: DomainError = infra.into();
        assert!(matches!(domain, DomainError::Storage(_)));
    }
}
