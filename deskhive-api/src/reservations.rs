use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use deskhive_domain::reservation::{Reservation, ReservationStatus};

use crate::auth::{guest_actor, guest_auth_middleware, GuestClaims};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateReservationRequest {
    desk_id: Uuid,
    date: String,
}

#[derive(Debug, Serialize)]
struct ReservationResponse {
    reservation_id: Uuid,
    desk_id: Uuid,
    reservation_date: NaiveDate,
    status: ReservationStatus,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            reservation_id: reservation.id,
            desk_id: reservation.desk_id,
            reservation_date: reservation.reservation_date,
            status: reservation.status,
        }
    }
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/v1/reservations",
            post(submit_reservation).get(list_my_reservations),
        )
        .route("/v1/reservations/{id}/cancel", post(cancel_reservation))
        .route("/v1/reservations/{id}", delete(delete_reservation))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            guest_auth_middleware,
        ))
}

async fn submit_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<GuestClaims>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let actor = guest_actor(&claims)?;

    let reservation = state.workflow.submit(req.desk_id, &actor, &req.date).await?;

    info!(
        reservation_id = %reservation.id,
        desk_id = %reservation.desk_id,
        date = %reservation.reservation_date,
        "Reservation created"
    );

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

async fn list_my_reservations(
    State(state): State<AppState>,
    Extension(claims): Extension<GuestClaims>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let actor = guest_actor(&claims)?;

    let reservations = state.reservations.list_for_guest(actor.id).await?;
    Ok(Json(
        reservations.into_iter().map(ReservationResponse::from).collect(),
    ))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<GuestClaims>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, AppError> {
    let actor = guest_actor(&claims)?;

    let reservation = state.workflow.cancel(reservation_id, &actor).await?;

    info!(reservation_id = %reservation.id, "Reservation cancelled");

    Ok(Json(reservation.into()))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Extension(claims): Extension<GuestClaims>,
    Path(reservation_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let actor = guest_actor(&claims)?;

    state.workflow.delete(reservation_id, &actor).await?;

    info!(%reservation_id, "Reservation deleted");

    Ok(StatusCode::NO_CONTENT)
}
