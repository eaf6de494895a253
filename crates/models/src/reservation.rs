use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A live binding of one user to one slot. Deleting it is cancelling it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: EntityId,
    pub slot_id: EntityId,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReservation {
    pub slot_id: EntityId,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl NewReservation {
    pub fn with_id(self, id: EntityId) -> Reservation {
        Reservation {
            id,
            slot_id: self.slot_id,
            user_email: self.user_email,
            created_at: self.created_at,
        }
    }
}

impl Reservation {
    /// Ownership is an exact, case-sensitive email match.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.user_email == email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wire_shape_uses_camel_case() {
        let r = NewReservation {
            slot_id: "slt_1".into(),
            user_email: "a@x.com".into(),
            created_at: Utc.with_ymd_and_hms(2029, 6, 1, 8, 0, 0).unwrap(),
        }
        .with_id("res_1".into());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "res_1",
                "slotId": "slt_1",
                "userEmail": "a@x.com",
                "createdAt": "2029-06-01T08:00:00Z"
            })
        );
    }

    #[test]
    fn ownership_is_case_sensitive() {
        let r = Reservation {
            id: "res_1".into(),
            slot_id: "slt_1".into(),
            user_email: "a@x.com".into(),
            created_at: Utc::now(),
        };
        assert!(r.is_owned_by("a@x.com"));
        assert!(!r.is_owned_by("A@x.com"));
    }
}
