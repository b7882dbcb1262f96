use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use deskhive_domain::repository::{ReservationRepository, StoreError};
use deskhive_domain::reservation::{Reservation, ReservationStatus};

use crate::error::classify;

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    desk_id: Uuid,
    guest_id: Option<Uuid>,
    reservation_date: NaiveDate,
    status: i16,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = StoreError;

    fn try_from(row: ReservationRow) -> Result<Self, StoreError> {
        let status = ReservationStatus::from_i16(row.status).ok_or_else(|| {
            StoreError::Storage(format!("invalid reservation status {}", row.status).into())
        })?;

        Ok(Reservation {
            id: row.id,
            desk_id: row.desk_id,
            guest_id: row.guest_id,
            reservation_date: row.reservation_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn has_active_reservation(
        &self,
        desk_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        // Single indexed lookup on the DATE column; status <> CANCELLED
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reservations
                WHERE desk_id = $1 AND reservation_date = $2 AND status <> $3
            )
            "#,
        )
        .bind(desk_id)
        .bind(date)
        .bind(ReservationStatus::Cancelled.as_i16())
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(exists)
    }

    async fn create(&self, reservation: &Reservation) -> Result<Reservation, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO reservations (id, desk_id, guest_id, reservation_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation.id)
        .bind(reservation.desk_id)
        .bind(reservation.guest_id)
        .bind(reservation.reservation_date)
        .bind(reservation.status.as_i16())
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(reservation.clone()),
            Err(err) => {
                let mapped = classify(err);
                if matches!(mapped, StoreError::Conflict) {
                    warn!(
                        desk_id = %reservation.desk_id,
                        date = %reservation.reservation_date,
                        "reservation lost the commit race"
                    );
                }
                Err(mapped)
            }
        }
    }

    async fn find_reservation(&self, id: Uuid) -> Result<Option<Reservation>, StoreError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, desk_id, guest_id, reservation_date, status, created_at, updated_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE reservations SET status = $1, updated_at = now() WHERE id = $2
            "#,
        )
        .bind(status.as_i16())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("reservation"));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query(r#"DELETE FROM reservations WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("reservation"));
        }
        Ok(())
    }

    async fn list_for_guest(&self, guest_id: Uuid) -> Result<Vec<Reservation>, StoreError> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, desk_id, guest_id, reservation_date, status, created_at, updated_at
            FROM reservations
            WHERE guest_id = $1
            ORDER BY reservation_date
            "#,
        )
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Reservation>, StoreError> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, desk_id, guest_id, reservation_date, status, created_at, updated_at
            FROM reservations
            ORDER BY reservation_date
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}
