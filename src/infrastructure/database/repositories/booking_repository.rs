//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    AppliedDiscount, Booking, BookingRepository, BookingStatus, DiscountKind, Guest, StayPeriod,
};
use crate::infrastructure::database::entities::booking;
use crate::shared::errors::{DomainError, DomainResult};

/// Statuses that occupy a unit's calendar
const HOLDING_STATUSES: [&str; 2] = ["Pending", "Confirmed"];

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let period = StayPeriod::new(m.check_in, m.check_out).map_err(|_| {
        DomainError::Storage(format!(
            "booking {} has an invalid stored interval [{}, {})",
            m.id, m.check_in, m.check_out
        ))
    })?;

    let discount = m.discount_code.map(|code| AppliedDiscount {
        code,
        kind: DiscountKind::from_str(m.discount_kind.as_deref().unwrap_or_default()),
        value: m.discount_value.unwrap_or_default(),
        amount_off: m.discount_amount_off.unwrap_or_default(),
    });

    Ok(Booking {
        id: m.id,
        unit_id: m.unit_id,
        guest: Guest {
            user_id: m.guest_user_id,
            full_name: m.guest_name,
            email: m.guest_email,
            phone: m.guest_phone,
        },
        period,
        total_amount: m.total_amount,
        currency: m.currency,
        discount,
        payment_reference: m.payment_reference,
        status: BookingStatus::from_str(&m.status),
        created_at: m.created_at,
    })
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        unit_id: Set(b.unit_id),
        guest_user_id: Set(b.guest.user_id),
        guest_name: Set(b.guest.full_name),
        guest_email: Set(b.guest.email),
        guest_phone: Set(b.guest.phone),
        check_in: Set(b.period.check_in()),
        check_out: Set(b.period.check_out()),
        total_amount: Set(b.total_amount),
        currency: Set(b.currency),
        discount_code: Set(b.discount.as_ref().map(|d| d.code.clone())),
        discount_kind: Set(b.discount.as_ref().map(|d| d.kind.as_str().to_string())),
        discount_value: Set(b.discount.as_ref().map(|d| d.value)),
        discount_amount_off: Set(b.discount.as_ref().map(|d| d.amount_off)),
        payment_reference: Set(b.payment_reference),
        status: Set(b.status.as_str().to_string()),
        created_at: Set(b.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn collect(models: Vec<booking::Model>) -> DomainResult<Vec<Booking>> {
    models.into_iter().map(model_to_domain).collect()
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, b: Booking) -> DomainResult<()> {
        debug!("Inserting booking: {}", b.id);
        domain_to_active(b).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_reference(&self, reference: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::PaymentReference.eq(reference))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_overlapping(
        &self,
        unit_id: &str,
        period: &StayPeriod,
    ) -> DomainResult<Vec<Booking>> {
        // Closed-open intersection: existing.check_in < requested.check_out
        // AND existing.check_out > requested.check_in
        let models = booking::Entity::find()
            .filter(booking::Column::UnitId.eq(unit_id))
            .filter(booking::Column::Status.is_in(HOLDING_STATUSES))
            .filter(booking::Column::CheckIn.lt(period.check_out()))
            .filter(booking::Column::CheckOut.gt(period.check_in()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        collect(models)
    }

    async fn find_holding_for_unit(&self, unit_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UnitId.eq(unit_id))
            .filter(booking::Column::Status.is_in(HOLDING_STATUSES))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        collect(models)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        collect(models)
    }

    async fn compare_and_set_status(
        &self,
        reference: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool> {
        // Single filtered UPDATE: the row moves out of `from` exactly once
        // no matter how many callers race this transition.
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(to.as_str()))
            .filter(booking::Column::PaymentReference.eq(reference))
            .filter(booking::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            "CAS {} {}→{}: rows_affected={}",
            reference,
            from,
            to,
            result.rows_affected
        );
        Ok(result.rows_affected > 0)
    }
}
