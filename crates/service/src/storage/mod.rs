//! Storage building blocks for the booking store.
//!
//! `booking_db` holds the three collections and the pure query/mutation
//! logic; `memory` and `crate::file` wrap it with locking (and persistence).

pub mod json_collection;
pub mod booking_db;
pub mod memory;
