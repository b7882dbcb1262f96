use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deskhive_booking::DenyReason;
use deskhive_domain::calendar;
use deskhive_domain::space::{Desk, Space};

use crate::auth::guest_auth_middleware;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct SpaceWithDesks {
    #[serde(flatten)]
    space: Space,
    desks: Vec<Desk>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    date: String,
}

#[derive(Debug, Serialize)]
struct AvailabilityResponse {
    allowed: bool,
    reason: Option<DenyReason>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/spaces", get(list_spaces))
        .route("/v1/desks/{id}/availability", get(check_availability))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            guest_auth_middleware,
        ))
}

async fn list_spaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpaceWithDesks>>, AppError> {
    let spaces = state.spaces.list_spaces().await?;

    let mut listing = Vec::with_capacity(spaces.len());
    for space in spaces {
        let desks = state.desks.list_for_space(space.id).await?;
        listing.push(SpaceWithDesks { space, desks });
    }

    Ok(Json(listing))
}

/// Engine probe: reports whether the desk is bookable for a date and, if
/// not, the first failing reason in check order.
async fn check_availability(
    State(state): State<AppState>,
    Path(desk_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = calendar::parse_reservation_date(&query.date)
        .map_err(|err| AppError::ValidationError(err.to_string()))?;

    let desk = state
        .desks
        .find_desk(desk_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("desk not found".to_string()))?;

    let decision = state
        .engine
        .can_book(&desk, date)
        .await
        .map_err(AppError::from)?;

    Ok(Json(AvailabilityResponse {
        allowed: decision.is_allowed(),
        reason: decision.reason(),
    }))
}
