use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use deskhive_domain::reservation::{Reservation, ReservationStatus};
use deskhive_domain::schedule::WeeklySchedule;

use crate::auth::{admin_actor, admin_auth_middleware, AdminClaims};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SetDeskAvailabilityRequest {
    is_available: bool,
}

#[derive(Debug, Serialize)]
struct ReservationView {
    reservation_id: Uuid,
    desk_id: Uuid,
    guest_id: Option<Uuid>,
    reservation_date: NaiveDate,
    status: ReservationStatus,
}

impl From<Reservation> for ReservationView {
    fn from(reservation: Reservation) -> Self {
        Self {
            reservation_id: reservation.id,
            desk_id: reservation.desk_id,
            guest_id: reservation.guest_id,
            reservation_date: reservation.reservation_date,
            status: reservation.status,
        }
    }
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/admin/desks/{id}/availability", put(set_desk_availability))
        .route("/v1/admin/spaces/{id}/schedule", put(upsert_space_schedule))
        .route("/v1/admin/reservations", get(list_all_reservations))
        .route("/v1/admin/reservations/{id}/confirm", post(confirm_reservation))
        .route("/v1/admin/reservations/{id}", delete(delete_reservation))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            admin_auth_middleware,
        ))
}

/// The host's master switch, independent of the weekly schedule
async fn set_desk_availability(
    State(state): State<AppState>,
    Path(desk_id): Path<Uuid>,
    Json(req): Json<SetDeskAvailabilityRequest>,
) -> Result<StatusCode, AppError> {
    state
        .desks
        .set_availability(desk_id, req.is_available)
        .await?;

    info!(%desk_id, available = req.is_available, "Desk availability updated");

    Ok(StatusCode::NO_CONTENT)
}

async fn upsert_space_schedule(
    State(state): State<AppState>,
    Path(space_id): Path<Uuid>,
    Json(schedule): Json<WeeklySchedule>,
) -> Result<StatusCode, AppError> {
    state.spaces.upsert_schedule(space_id, &schedule).await?;

    info!(%space_id, "Weekly schedule updated");

    Ok(StatusCode::NO_CONTENT)
}

async fn list_all_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationView>>, AppError> {
    let reservations = state.reservations.list_all().await?;
    Ok(Json(
        reservations.into_iter().map(ReservationView::from).collect(),
    ))
}

async fn confirm_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ReservationView>, AppError> {
    let actor = admin_actor(&claims)?;

    let reservation = state.workflow.confirm(reservation_id, &actor).await?;

    info!(reservation_id = %reservation.id, "Reservation confirmed");

    Ok(Json(reservation.into()))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Path(reservation_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let actor = admin_actor(&claims)?;

    state.workflow.delete(reservation_id, &actor).await?;

    info!(%reservation_id, "Reservation deleted by admin");

    Ok(StatusCode::NO_CONTENT)
}
