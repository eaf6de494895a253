//! File-backed store implementations.

pub mod booking_store;

pub use booking_store::JsonBookingStore;
