use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use common::types::StatusBody;
use models::{EntityId, Reservation};
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::state::{ServerState, UserEmail};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[serde(default)]
    pub slot_id: String,
}

/// POST /reservations
pub async fn book(
    State(state): State<ServerState>,
    UserEmail(email): UserEmail,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Reservation>, JsonApiError> {
    let Json(input) = body?;
    let slot_id = EntityId::from(input.slot_id);
    let reservation = state.engine.book(&slot_id, &email).await?;
    Ok(Json(reservation))
}

/// GET /reservations/me
pub async fn my_reservations(
    State(state): State<ServerState>,
    UserEmail(email): UserEmail,
) -> Result<Json<Vec<Reservation>>, JsonApiError> {
    Ok(Json(state.engine.my_reservations(&email).await?))
}

/// DELETE /reservations/:id
pub async fn cancel(
    State(state): State<ServerState>,
    UserEmail(email): UserEmail,
    Path(reservation_id): Path<EntityId>,
) -> Result<Json<StatusBody>, JsonApiError> {
    state.engine.cancel(&reservation_id, &email).await?;
    Ok(Json(StatusBody { status: "deleted" }))
}
