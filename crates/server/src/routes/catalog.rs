use axum::{extract::{Path, State}, Json};
use models::{EntityId, Service, Slot};
use tracing::debug;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// GET /services
pub async fn list_services(State(state): State<ServerState>) -> Result<Json<Vec<Service>>, JsonApiError> {
    let list = state.engine.list_services().await?;
    debug!(count = list.len(), "list services");
    Ok(Json(list))
}

/// GET /services/:id/slots
pub async fn list_slots(
    State(state): State<ServerState>,
    Path(service_id): Path<EntityId>,
) -> Result<Json<Vec<Slot>>, JsonApiError> {
    let slots = state.engine.list_slots_by_service(&service_id).await?;
    Ok(Json(slots))
}
