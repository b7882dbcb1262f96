use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use deskhive_domain::repository::{ScheduleRepository, SpaceRepository, StoreError};
use deskhive_domain::schedule::WeeklySchedule;
use deskhive_domain::space::Space;

use crate::error::classify;

pub struct PgSpaceRepository {
    pool: PgPool,
}

impl PgSpaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct SpaceRow {
    id: Uuid,
    host_id: Uuid,
    name: String,
    address: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<SpaceRow> for Space {
    fn from(row: SpaceRow) -> Self {
        Space {
            id: row.id,
            host_id: row.host_id,
            name: row.name,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    monday: bool,
    tuesday: bool,
    wednesday: bool,
    thursday: bool,
    friday: bool,
    saturday: bool,
    sunday: bool,
}

impl From<ScheduleRow> for WeeklySchedule {
    fn from(row: ScheduleRow) -> Self {
        WeeklySchedule {
            monday: row.monday,
            tuesday: row.tuesday,
            wednesday: row.wednesday,
            thursday: row.thursday,
            friday: row.friday,
            saturday: row.saturday,
            sunday: row.sunday,
        }
    }
}

#[async_trait]
impl SpaceRepository for PgSpaceRepository {
    async fn list_spaces(&self) -> Result<Vec<Space>, StoreError> {
        let rows = sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT id, host_id, name, address, created_at, updated_at
            FROM spaces
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        Ok(rows.into_iter().map(Space::from).collect())
    }

    async fn upsert_schedule(
        &self,
        space_id: Uuid,
        schedule: &WeeklySchedule,
    ) -> Result<(), StoreError> {
        // One schedule row per space, enforced by the unique constraint
        sqlx::query(
            r#"
            INSERT INTO schedules (id, space_id, monday, tuesday, wednesday, thursday, friday, saturday, sunday)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (space_id) DO UPDATE SET
                monday = EXCLUDED.monday,
                tuesday = EXCLUDED.tuesday,
                wednesday = EXCLUDED.wednesday,
                thursday = EXCLUDED.thursday,
                friday = EXCLUDED.friday,
                saturday = EXCLUDED.saturday,
                sunday = EXCLUDED.sunday
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(space_id)
        .bind(schedule.monday)
        .bind(schedule.tuesday)
        .bind(schedule.wednesday)
        .bind(schedule.thursday)
        .bind(schedule.friday)
        .bind(schedule.saturday)
        .bind(schedule.sunday)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            // An unknown space surfaces as a foreign key violation
            if let sqlx::Error::Database(ref db_err) = err {
                if db_err.code().as_deref() == Some("23503") {
                    return StoreError::NotFound("space");
                }
            }
            classify(err)
        })?;

        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for PgSpaceRepository {
    async fn find_space_schedule(
        &self,
        space_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT monday, tuesday, wednesday, thursday, friday, saturday, sunday
            FROM schedules
            WHERE space_id = $1
            "#,
        )
        .bind(space_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(WeeklySchedule::from))
    }
}
