//! Domain types shared by the booking store and engine.
//!
//! Entities serialize with the camelCase field names used on disk and on the
//! wire; timestamps are RFC3339.

pub mod errors;
pub mod id;
pub mod catalog;
pub mod slot;
pub mod reservation;

pub use catalog::{NewService, Service};
pub use id::{EntityId, IdPrefix};
pub use reservation::{NewReservation, Reservation};
pub use slot::{NewSlot, Slot};
