//! Discount code repository interface

use async_trait::async_trait;

use super::model::DiscountCode;
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait DiscountCodeRepository: Send + Sync {
    /// Look up a code by its normalized form
    async fn find_by_code(&self, normalized_code: &str) -> DomainResult<Option<DiscountCode>>;

    /// Save a code (normalized on write); used by seeds and fixtures
    async fn save(&self, code: DiscountCode) -> DomainResult<()>;
}
