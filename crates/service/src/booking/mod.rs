//! Booking module: store contract (repository), business rules (service),
//! plus the injectable access policy and clock the rules depend on.

pub mod repository;
pub mod policy;
pub mod clock;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use policy::{AccessPolicy, AdminEmailPolicy};
pub use repository::BookingRepository;
pub use service::BookingService;
