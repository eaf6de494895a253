use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use models::{EntityId, NewReservation, NewService, NewSlot, Reservation, Service, Slot};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;
use crate::observability::STORE_FLUSHES_TOTAL;
use crate::storage::booking_db::BookingDb;
use crate::storage::json_collection::{
    commit_staged, discard_staged, ensure_seeded, read_collection, stage_collection,
};

pub const SERVICES_FILE: &str = "services.json";
pub const SLOTS_FILE: &str = "slots.json";
pub const RESERVATIONS_FILE: &str = "reservations.json";

/// File-backed booking store: one JSON array per collection in `root`.
///
/// All three files are rewritten after every mutation. A mutation is applied
/// to a working copy, flushed, and only then published to readers, all while
/// holding the write lock; a failed flush leaves memory untouched.
pub struct JsonBookingStore {
    inner: RwLock<BookingDb>,
    root: PathBuf,
}

impl JsonBookingStore {
    /// Open the store in `root`, creating the directory and any missing file as `[]`.
    pub async fn open<P: Into<PathBuf>>(root: P) -> Result<Arc<Self>, ServiceError> {
        let root = root.into();
        for name in [SERVICES_FILE, SLOTS_FILE, RESERVATIONS_FILE] {
            ensure_seeded(&root.join(name)).await?;
        }
        let db = BookingDb {
            services: read_collection(&root.join(SERVICES_FILE)).await?,
            slots: read_collection(&root.join(SLOTS_FILE)).await?,
            reservations: read_collection(&root.join(RESERVATIONS_FILE)).await?,
        };
        info!(
            root = %root.display(),
            services = db.services.len(),
            slots = db.slots.len(),
            reservations = db.reservations.len(),
            "json booking store loaded"
        );
        Ok(Arc::new(Self { inner: RwLock::new(db), root }))
    }

    /// Stage all three files, then rename them into place. Nothing on disk
    /// changes unless every file was staged.
    async fn persist(&self, db: &BookingDb) -> Result<(), ServiceError> {
        let targets = [
            self.root.join(SERVICES_FILE),
            self.root.join(SLOTS_FILE),
            self.root.join(RESERVATIONS_FILE),
        ];
        let staged = async {
            stage_collection(&targets[0], &db.services).await?;
            stage_collection(&targets[1], &db.slots).await?;
            stage_collection(&targets[2], &db.reservations).await
        }
        .await;
        if let Err(e) = staged {
            for target in &targets {
                discard_staged(target).await;
            }
            return Err(e);
        }
        for target in &targets {
            commit_staged(target).await?;
        }
        STORE_FLUSHES_TOTAL.inc();
        Ok(())
    }

    /// Apply a mutation to a copy of the collections, persist it, then commit.
    async fn update_db<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut BookingDb) -> Result<T, ServiceError>,
    {
        let mut guard = self.inner.write().await;
        let mut working = guard.clone();
        let out = f(&mut working)?;
        if let Err(e) = self.persist(&working).await {
            warn!(root = %self.root.display(), error = %e, "flush failed; mutation discarded");
            return Err(e);
        }
        *guard = working;
        Ok(out)
    }
}

#[async_trait]
impl BookingRepository for JsonBookingStore {
    async fn list_services(&self) -> Result<Vec<Service>, ServiceError> {
        Ok(self.inner.read().await.services.clone())
    }

    async fn create_service(&self, service: NewService) -> Result<Service, ServiceError> {
        let svc = self.update_db(|db| Ok(db.insert_service(service))).await?;
        debug!(service_id = %svc.id, "service stored");
        Ok(svc)
    }

    async fn add_slot(&self, slot: NewSlot) -> Result<Slot, ServiceError> {
        let slot = self.update_db(|db| Ok(db.insert_slot(slot))).await?;
        debug!(slot_id = %slot.id, service_id = %slot.service_id, "slot stored");
        Ok(slot)
    }

    async fn list_slots_by_service(&self, service_id: &EntityId) -> Result<Vec<Slot>, ServiceError> {
        Ok(self.inner.read().await.slots_by_service(service_id))
    }

    async fn get_slot(&self, slot_id: &EntityId) -> Result<Slot, ServiceError> {
        self.inner.read().await.slot(slot_id).ok_or_else(|| ServiceError::not_found("slot"))
    }

    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation, ServiceError> {
        let res = self.update_db(|db| Ok(db.insert_reservation(reservation))).await?;
        debug!(reservation_id = %res.id, slot_id = %res.slot_id, "reservation stored");
        Ok(res)
    }

    async fn list_reservations_by_email(&self, email: &str) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.inner.read().await.reservations_by_email(email))
    }

    async fn list_reservations_by_slot(&self, slot_id: &EntityId) -> Result<Vec<Reservation>, ServiceError> {
        Ok(self.inner.read().await.reservations_by_slot(slot_id))
    }

    async fn get_reservation(&self, id: &EntityId) -> Result<Reservation, ServiceError> {
        self.inner.read().await.reservation(id).ok_or_else(|| ServiceError::not_found("reservation"))
    }

    async fn delete_reservation(&self, id: &EntityId) -> Result<(), ServiceError> {
        self.update_db(|db| {
            db.remove_reservation(id)
                .map(|_| ())
                .ok_or_else(|| ServiceError::not_found("reservation"))
        })
        .await?;
        debug!(reservation_id = %id, "reservation removed");
        Ok(())
    }
}
