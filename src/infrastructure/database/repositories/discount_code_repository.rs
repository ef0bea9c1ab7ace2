//! SeaORM implementation of DiscountCodeRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{DiscountCode, DiscountCodeRepository, DiscountKind};
use crate::infrastructure::database::entities::discount_code;
use crate::shared::errors::{DomainError, DomainResult};

pub struct SeaOrmDiscountCodeRepository {
    db: DatabaseConnection,
}

impl SeaOrmDiscountCodeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: discount_code::Model) -> DiscountCode {
    DiscountCode {
        code: m.code,
        kind: DiscountKind::from_str(&m.kind),
        value: m.value,
        expires_at: m.expires_at,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl DiscountCodeRepository for SeaOrmDiscountCodeRepository {
    async fn find_by_code(&self, normalized_code: &str) -> DomainResult<Option<DiscountCode>> {
        let model = discount_code::Entity::find_by_id(normalized_code)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, code: DiscountCode) -> DomainResult<()> {
        let model = discount_code::ActiveModel {
            code: Set(DiscountCode::normalize(&code.code)),
            kind: Set(code.kind.as_str().to_string()),
            value: Set(code.value),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
