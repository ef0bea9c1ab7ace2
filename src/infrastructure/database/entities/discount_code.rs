//! Discount code entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discount_codes")]
pub struct Model {
    /// Normalized code (lowercase, trimmed)
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    /// Rule kind: Percentage or FlatAmount
    pub kind: String,

    /// Percentage points or minor currency units, depending on kind
    pub value: i64,

    pub expires_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
