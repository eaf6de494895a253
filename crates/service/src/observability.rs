use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

// Prometheus metrics (default registry)
pub static RESERVATIONS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "booking_reservations_created_total",
        "Total reservations successfully created"
    )
    .expect("register reservations_created_total")
});

pub static BOOKING_REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "booking_rejections_total",
        "Booking attempts rejected by a business rule",
        &["reason"]
    )
    .expect("register booking_rejections_total")
});

pub static CANCELLATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "booking_cancellations_total",
        "Total reservations cancelled"
    )
    .expect("register cancellations_total")
});

pub static STORE_FLUSHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "booking_store_flushes_total",
        "Full snapshot writes performed by the JSON store"
    )
    .expect("register store_flushes_total")
});

/// Why a booking was turned away; used as the `reason` label.
#[derive(Clone, Copy, Debug)]
pub enum Rejection {
    MissingEmail,
    UnknownSlot,
    AlreadyBooked,
    SlotFull,
}

impl Rejection {
    pub fn label(self) -> &'static str {
        match self {
            Rejection::MissingEmail => "missing_email",
            Rejection::UnknownSlot => "unknown_slot",
            Rejection::AlreadyBooked => "already_booked",
            Rejection::SlotFull => "slot_full",
        }
    }
}

pub fn record_rejection(reason: Rejection) {
    BOOKING_REJECTIONS_TOTAL.with_label_values(&[reason.label()]).inc();
}

/// Force registration of every booking metric with the default registry.
pub fn register_all() {
    Lazy::force(&RESERVATIONS_CREATED_TOTAL);
    Lazy::force(&BOOKING_REJECTIONS_TOTAL);
    Lazy::force(&CANCELLATIONS_TOTAL);
    Lazy::force(&STORE_FLUSHES_TOTAL);
}
