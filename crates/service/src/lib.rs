//! Booking engine and its persistence.
//! - `booking`: the store contract, the business rules on top of it, access policy and clock.
//! - `storage` / `file`: in-memory and JSON-file implementations of the store contract.
//! - Errors are a single taxonomy (`ServiceError`) shared by both layers.

pub mod errors;
pub mod booking;
pub mod storage;
pub mod file;
pub mod observability;
pub mod runtime;

pub use booking::{BookingRepository, BookingService};
