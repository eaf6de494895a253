use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::id::EntityId;

/// A bookable instant for a service with a maximum occupancy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: EntityId,
    pub service_id: EntityId,
    /// Keeps the offset it was published with.
    pub datetime: DateTime<FixedOffset>,
    pub capacity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSlot {
    pub service_id: EntityId,
    pub datetime: DateTime<FixedOffset>,
    pub capacity: u32,
}

impl NewSlot {
    /// Parse the RFC3339 timestamp and coerce non-positive capacity to 1.
    pub fn new(service_id: EntityId, iso_datetime: &str, capacity: i64) -> Result<Self, ModelError> {
        Ok(Self {
            service_id,
            datetime: parse_datetime(iso_datetime)?,
            capacity: normalize_capacity(capacity),
        })
    }

    pub fn with_id(self, id: EntityId) -> Slot {
        Slot { id, service_id: self.service_id, datetime: self.datetime, capacity: self.capacity }
    }
}

/// Date, time and offset must all be present, e.g. `2030-01-01T10:00:00Z`.
pub fn parse_datetime(raw: &str) -> Result<DateTime<FixedOffset>, ModelError> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|_| ModelError::Validation("invalid datetime (use RFC3339)".into()))
}

pub fn normalize_capacity(capacity: i64) -> u32 {
    if capacity <= 0 {
        1
    } else {
        u32::try_from(capacity).unwrap_or(u32::MAX)
    }
}
