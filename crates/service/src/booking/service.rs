use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use models::{EntityId, NewReservation, NewService, NewSlot, Reservation, Service, Slot};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::booking::clock::{Clock, SystemClock};
use crate::booking::policy::AccessPolicy;
use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;
use crate::observability::{self, Rejection, CANCELLATIONS_TOTAL, RESERVATIONS_CREATED_TOTAL};

/// One async mutex per slot id. Slots are never deleted, so entries are only
/// created for slots that resolved.
#[derive(Default)]
struct SlotLocks {
    locks: DashMap<EntityId, Arc<Mutex<()>>>,
}

impl SlotLocks {
    async fn acquire(&self, slot_id: &EntityId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(slot_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

/// Booking business rules on top of a [`BookingRepository`].
///
/// Holds no entity state of its own apart from the per-slot locks that make
/// the check-then-insert in [`BookingService::book`] atomic per slot.
pub struct BookingService<R: BookingRepository + ?Sized> {
    repo: Arc<R>,
    policy: Arc<dyn AccessPolicy>,
    clock: Arc<dyn Clock>,
    slot_locks: SlotLocks,
}

impl<R: BookingRepository + ?Sized> BookingService<R> {
    pub fn new(repo: Arc<R>, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { repo, policy, clock: Arc::new(SystemClock), slot_locks: SlotLocks::default() }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Gate for service/slot publication.
    pub fn authorize_admin(&self, email: &str) -> Result<(), ServiceError> {
        if self.policy.is_privileged(email) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("admin only".into()))
        }
    }

    #[instrument(skip(self, description))]
    pub async fn create_service(
        &self,
        name: &str,
        description: &str,
        duration: Option<u32>,
    ) -> Result<Service, ServiceError> {
        let new = NewService::new(name, description, duration)?;
        let svc = self.repo.create_service(new).await?;
        info!(service_id = %svc.id, name = %svc.name, "service_created");
        Ok(svc)
    }

    /// Publish a slot. The service id is not checked against the catalog.
    #[instrument(skip(self))]
    pub async fn add_slot(
        &self,
        service_id: &EntityId,
        iso_datetime: &str,
        capacity: i64,
    ) -> Result<Slot, ServiceError> {
        let new = NewSlot::new(service_id.clone(), iso_datetime, capacity)?;
        let slot = self.repo.add_slot(new).await?;
        info!(slot_id = %slot.id, service_id = %slot.service_id, capacity = slot.capacity, "slot_added");
        Ok(slot)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, ServiceError> {
        self.repo.list_services().await
    }

    pub async fn list_slots_by_service(&self, service_id: &EntityId) -> Result<Vec<Slot>, ServiceError> {
        self.repo.list_slots_by_service(service_id).await
    }

    /// Reserve a place on a slot for `user_email`.
    ///
    /// The duplicate check, the capacity check and the insert run under the
    /// slot's lock, so concurrent calls for one slot never oversell it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::booking::{AdminEmailPolicy, BookingService};
    /// use service::storage::memory::MemoryBookingStore;
    ///
    /// let engine = BookingService::new(
    ///     MemoryBookingStore::new(),
    ///     Arc::new(AdminEmailPolicy::new(["admin@example.com"])),
    /// );
    /// let svc = tokio_test::block_on(engine.create_service("Haircut", "", Some(30))).unwrap();
    /// let slot = tokio_test::block_on(engine.add_slot(&svc.id, "2030-01-01T10:00:00Z", 1)).unwrap();
    /// let res = tokio_test::block_on(engine.book(&slot.id, "a@x.com")).unwrap();
    /// assert_eq!(res.slot_id, slot.id);
    /// assert!(tokio_test::block_on(engine.book(&slot.id, "b@x.com")).is_err());
    /// ```
    #[instrument(skip(self, slot_id), fields(slot_id = %slot_id))]
    pub async fn book(&self, slot_id: &EntityId, user_email: &str) -> Result<Reservation, ServiceError> {
        if user_email.is_empty() {
            observability::record_rejection(Rejection::MissingEmail);
            return Err(ServiceError::Validation("missing user email".into()));
        }

        let slot = match self.repo.get_slot(slot_id).await {
            Ok(slot) => slot,
            Err(e) if e.is_not_found() => {
                observability::record_rejection(Rejection::UnknownSlot);
                return Err(ServiceError::NotFound("slot not found".into()));
            }
            Err(e) => return Err(e),
        };

        let _guard = self.slot_locks.acquire(&slot.id).await;

        let existing = self.repo.list_reservations_by_slot(&slot.id).await?;
        if existing.iter().any(|r| r.is_owned_by(user_email)) {
            observability::record_rejection(Rejection::AlreadyBooked);
            debug!(user_email, "duplicate booking rejected");
            return Err(ServiceError::Conflict("already booked this slot".into()));
        }
        if existing.len() >= slot.capacity as usize {
            observability::record_rejection(Rejection::SlotFull);
            debug!(capacity = slot.capacity, taken = existing.len(), "slot full");
            return Err(ServiceError::Conflict("slot is full".into()));
        }

        let reservation = self
            .repo
            .create_reservation(NewReservation {
                slot_id: slot.id.clone(),
                user_email: user_email.to_string(),
                created_at: self.clock.now(),
            })
            .await?;
        RESERVATIONS_CREATED_TOTAL.inc();
        info!(reservation_id = %reservation.id, user_email, "reservation_created");
        Ok(reservation)
    }

    pub async fn my_reservations(&self, user_email: &str) -> Result<Vec<Reservation>, ServiceError> {
        self.repo.list_reservations_by_email(user_email).await
    }

    /// Cancel a reservation owned by `user_email` whose slot is still ahead.
    ///
    /// A reservation whose slot no longer resolves may always be cancelled by
    /// its owner.
    #[instrument(skip(self, reservation_id), fields(reservation_id = %reservation_id))]
    pub async fn cancel(&self, reservation_id: &EntityId, user_email: &str) -> Result<(), ServiceError> {
        let reservation = match self.repo.get_reservation(reservation_id).await {
            Ok(r) => r,
            Err(e) if e.is_not_found() => {
                return Err(ServiceError::NotFound("reservation not found".into()))
            }
            Err(e) => return Err(e),
        };

        if !reservation.is_owned_by(user_email) {
            return Err(ServiceError::Forbidden("not your reservation".into()));
        }

        match self.repo.get_slot(&reservation.slot_id).await {
            Ok(slot) => {
                if slot.datetime.with_timezone(&Utc) <= self.clock.now() {
                    return Err(ServiceError::Validation("cannot cancel past reservations".into()));
                }
            }
            Err(e) if e.is_not_found() => {
                warn!(slot_id = %reservation.slot_id, "slot missing; allowing cancellation");
            }
            Err(e) => return Err(e),
        }

        self.repo.delete_reservation(reservation_id).await?;
        CANCELLATIONS_TOTAL.inc();
        info!(user_email, "reservation_cancelled");
        Ok(())
    }
}
