use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity kind, used as the identifier prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdPrefix {
    Service,
    Slot,
    Reservation,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Service => "svc",
            IdPrefix::Slot => "slt",
            IdPrefix::Reservation => "res",
        }
    }
}

/// Opaque `<prefix>_<suffix>` identifier, unique within its collection.
///
/// Callers only ever receive ids from the store; any string is accepted when
/// parsing request input so unknown ids surface as "not found" rather than
/// as a format error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Fresh collision-resistant id, e.g. `svc_4f0c1e...`.
    pub fn generate(prefix: IdPrefix) -> Self {
        Self(format!("{}_{}", prefix.as_str(), Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
