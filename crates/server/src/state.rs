use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service::booking::{AdminEmailPolicy, BookingRepository, BookingService};

/// Engine over whichever store the configuration selected.
pub type Engine = BookingService<dyn BookingRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn BookingRepository>, admin_emails: &[String]) -> Self {
        let policy = Arc::new(AdminEmailPolicy::new(admin_emails.iter().cloned()));
        Self { engine: Arc::new(BookingService::new(repo, policy)) }
    }
}

pub const USER_EMAIL_HEADER: &str = "X-User-Email";

/// Caller identity as forwarded by the front end. Missing or non-UTF-8
/// header yields an empty email, which the engine rejects where it matters.
#[derive(Debug, Clone)]
pub struct UserEmail(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for UserEmail {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_default();
        Ok(UserEmail(email))
    }
}
