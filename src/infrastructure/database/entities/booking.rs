//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub unit_id: String,

    #[sea_orm(nullable)]
    pub guest_user_id: Option<String>,
    pub guest_name: String,
    pub guest_email: String,
    #[sea_orm(nullable)]
    pub guest_phone: Option<String>,

    /// First booked night (inclusive)
    pub check_in: Date,
    /// Check-out day (exclusive, not a booked night)
    pub check_out: Date,

    /// Final chargeable amount in minor currency units
    pub total_amount: i64,
    pub currency: String,

    #[sea_orm(nullable)]
    pub discount_code: Option<String>,
    #[sea_orm(nullable)]
    pub discount_kind: Option<String>,
    #[sea_orm(nullable)]
    pub discount_value: Option<i64>,
    #[sea_orm(nullable)]
    pub discount_amount_off: Option<i64>,

    #[sea_orm(unique)]
    pub payment_reference: String,

    /// Booking status: Pending, Confirmed, Cancelled
    pub status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
