use async_trait::async_trait;
use models::{EntityId, NewReservation, NewService, NewSlot, Reservation, Service, Slot};

use crate::errors::ServiceError;

/// Persistence contract for services, slots and reservations.
///
/// Implementations assign ids, keep insertion order, return independent
/// copies and serialize each call internally. They enforce no business rule
/// beyond "does this id exist"; lookups of a missing id fail with
/// `ServiceError::NotFound`, I/O failures with `ServiceError::Storage`.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>, ServiceError>;
    async fn create_service(&self, service: NewService) -> Result<Service, ServiceError>;

    async fn add_slot(&self, slot: NewSlot) -> Result<Slot, ServiceError>;
    async fn list_slots_by_service(&self, service_id: &EntityId) -> Result<Vec<Slot>, ServiceError>;
    async fn get_slot(&self, slot_id: &EntityId) -> Result<Slot, ServiceError>;

    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation, ServiceError>;
    async fn list_reservations_by_email(&self, email: &str) -> Result<Vec<Reservation>, ServiceError>;
    async fn list_reservations_by_slot(&self, slot_id: &EntityId) -> Result<Vec<Reservation>, ServiceError>;
    async fn get_reservation(&self, id: &EntityId) -> Result<Reservation, ServiceError>;
    async fn delete_reservation(&self, id: &EntityId) -> Result<(), ServiceError>;
}
