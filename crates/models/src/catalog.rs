use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::id::EntityId;

/// A bookable service offering, e.g. "Haircut".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Length in minutes, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Service fields before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub duration: Option<u32>,
}

impl NewService {
    pub fn new(name: &str, description: &str, duration: Option<u32>) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            duration: duration.filter(|d| *d > 0),
        })
    }

    pub fn with_id(self, id: EntityId) -> Service {
        Service { id, name: self.name, description: self.description, duration: self.duration }
    }
}
