use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use deskhive_domain::repository::{DeskRepository, StoreError};
use deskhive_domain::space::Desk;

use crate::error::classify;

pub struct PgDeskRepository {
    pool: PgPool,
}

impl PgDeskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DeskRow {
    id: Uuid,
    space_id: Uuid,
    name: String,
    price_cents: i32,
    capacity: i32,
    is_available: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DeskRow> for Desk {
    fn from(row: DeskRow) -> Self {
        Desk {
            id: row.id,
            space_id: row.space_id,
            name: row.name,
            price_cents: row.price_cents,
            capacity: row.capacity,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl DeskRepository for PgDeskRepository {
    async fn find_desk(&self, id: Uuid) -> Result<Option<Desk>, StoreError> {
        let row = sqlx::query_as::<_, DeskRow>(
            r#"
            SELECT id, space_id, name, price_cents, capacity, is_available, created_at, updated_at
            FROM desks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Desk::from))
    }

    async fn list_for_space(&self, space_id: Uuid) -> Result<Vec<Desk>, StoreError> {
        let rows = sqlx::query_as::<_, DeskRow>(
            r#"
            SELECT id, space_id, name, price_cents, capacity, is_available, created_at, updated_at
            FROM desks
            WHERE space_id = $1
            ORDER BY name
            "#,
        )
        .bind(space_id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Desk::from).collect())
    }

    async fn set_availability(&self, id: Uuid, available: bool) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE desks SET is_available = $1, updated_at = now() WHERE id = $2
            "#,
        )
        .bind(available)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("desk"));
        }
        Ok(())
    }
}
