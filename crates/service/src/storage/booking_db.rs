use models::{
    EntityId, IdPrefix, NewReservation, NewService, NewSlot, Reservation, Service, Slot,
};

/// The three booking collections, in insertion order.
///
/// Purely mechanical: no capacity or ownership rules live here. Every
/// accessor that returns records hands out clones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingDb {
    pub services: Vec<Service>,
    pub slots: Vec<Slot>,
    pub reservations: Vec<Reservation>,
}

impl BookingDb {
    pub fn insert_service(&mut self, new: NewService) -> Service {
        let id = fresh_id(IdPrefix::Service, |id| self.services.iter().any(|s| &s.id == id));
        let svc = new.with_id(id);
        self.services.push(svc.clone());
        svc
    }

    pub fn insert_slot(&mut self, new: NewSlot) -> Slot {
        let id = fresh_id(IdPrefix::Slot, |id| self.slots.iter().any(|s| &s.id == id));
        let slot = new.with_id(id);
        self.slots.push(slot.clone());
        slot
    }

    pub fn insert_reservation(&mut self, new: NewReservation) -> Reservation {
        let id = fresh_id(IdPrefix::Reservation, |id| self.reservations.iter().any(|r| &r.id == id));
        let res = new.with_id(id);
        self.reservations.push(res.clone());
        res
    }

    pub fn slots_by_service(&self, service_id: &EntityId) -> Vec<Slot> {
        self.slots.iter().filter(|s| &s.service_id == service_id).cloned().collect()
    }

    pub fn slot(&self, slot_id: &EntityId) -> Option<Slot> {
        self.slots.iter().find(|s| &s.id == slot_id).cloned()
    }

    pub fn reservations_by_email(&self, email: &str) -> Vec<Reservation> {
        self.reservations.iter().filter(|r| r.user_email == email).cloned().collect()
    }

    pub fn reservations_by_slot(&self, slot_id: &EntityId) -> Vec<Reservation> {
        self.reservations.iter().filter(|r| &r.slot_id == slot_id).cloned().collect()
    }

    pub fn reservation(&self, id: &EntityId) -> Option<Reservation> {
        self.reservations.iter().find(|r| &r.id == id).cloned()
    }

    /// Remove by id, preserving the order of the remaining records.
    pub fn remove_reservation(&mut self, id: &EntityId) -> Option<Reservation> {
        let idx = self.reservations.iter().position(|r| &r.id == id)?;
        Some(self.reservations.remove(idx))
    }
}

fn fresh_id(prefix: IdPrefix, taken: impl Fn(&EntityId) -> bool) -> EntityId {
    loop {
        let id = EntityId::generate(prefix);
        if !taken(&id) {
            return id;
        }
    }
}
