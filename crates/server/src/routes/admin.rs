use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use models::{EntityId, Service, Slot};
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::{ServerState, UserEmail};

#[derive(Debug, Deserialize)]
pub struct CreateServiceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSlotInput {
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub capacity: i64,
}

/// POST /admin/services
pub async fn create_service(
    State(state): State<ServerState>,
    UserEmail(email): UserEmail,
    body: Result<Json<CreateServiceInput>, JsonRejection>,
) -> Result<Json<Service>, JsonApiError> {
    state.engine.authorize_admin(&email)?;
    let Json(input) = body?;
    info!(name = %input.name, admin = %email, "service_create_request");
    let svc = state
        .engine
        .create_service(&input.name, &input.description, input.duration)
        .await?;
    Ok(Json(svc))
}

/// POST /admin/services/:id/slots
pub async fn add_slot(
    State(state): State<ServerState>,
    UserEmail(email): UserEmail,
    Path(service_id): Path<EntityId>,
    body: Result<Json<CreateSlotInput>, JsonRejection>,
) -> Result<Json<Slot>, JsonApiError> {
    state.engine.authorize_admin(&email)?;
    let Json(input) = body?;
    let slot = state
        .engine
        .add_slot(&service_id, &input.datetime, input.capacity)
        .await?;
    Ok(Json(slot))
}
