use std::sync::Arc;

use async_trait::async_trait;
use models::{EntityId, NewReservation, NewService, NewSlot, Reservation, Service, Slot};
use tokio::sync::RwLock;

use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;
use crate::storage::booking_db::BookingDb;

/// Non-durable store: same contract and semantics as the JSON store, minus the files.
#[derive(Default)]
pub struct MemoryBookingStore {
    db: RwLock<BookingDb>,
}

impl MemoryBookingStore {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    /// Start from an existing snapshot.
    #[cfg(test)]
    pub fn with_snapshot(db: BookingDb) -> Arc<Self> { Arc::new(Self { db: RwLock::new(db) }) }
}

#[async_trait]
impl BookingRepository for MemoryBookingStore {
    async fn list_services(&self) -> Result<Vec<Service>, ServiceError> {
        Ok(self.db.read().await.services.clone())
    }

    async fn create_service(&self, service: NewService) -> Result<Service, ServiceError> {
        Ok(self.db.write().await.insert_service(service))
    }

    async fn add_slot(&self, slot: NewSlot) -> Result<Slot, ServiceError> {
        Ok(self.db.write().await.insert_slot(slot))
    }

    async fn list_slots_by_service(&self, service_id: &EntityId) -> Result<Vec<Slot>, ServiceError> {
        Ok(self.db.read().await.slots_by_service(service_id))
    }

    async fn get_slot(&self, slot_id: &EntityId) -> Result<Slot, ServiceError> {
        self.db.read().await.slot(slot_id).ok_or_else(|| ServiceError::not_found("slot"))
    }

    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation, ServiceError> {
        Ok(self.db.write().await.insert_reservation(reservation))
    }

    async fn list_reservations_by_email(&self, email: &str) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.db.read().await.reservations_by_email(email))
    }

    async fn list_reservations_by_slot(&self, slot_id: &EntityId) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.db.read().await.reservations_by_slot(slot_id))
    }

    async fn get_reservation(&self, id: &EntityId) -> Result<Reservation, ServiceError> {
        self.db.read().await.reservation(id).ok_or_else(|| ServiceError::not_found("reservation"))
    }

    async fn delete_reservation(&self, id: &EntityId) -> Result<(), ServiceError> {
        self.db
            .write()
            .await
            .remove_reservation(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("reservation"))
    }
}
