use deskhive_domain::repository::StoreError;

// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx failure onto the domain store error. A unique violation is
/// the partial index on (desk_id, reservation_date) rejecting a second
/// active reservation; everything else is an infrastructure fault.
pub(crate) fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict;
        }
    }
    StoreError::Storage(Box::new(err))
}
