// Shared test data for the integration suites

#![allow(dead_code)]

use chrono::NaiveTime;

use clinic_agenda::models::booking::{
    Booking, BookingCategory, BookingId, BookingStatus, PaymentStatus,
};
use clinic_agenda::models::resource::{default_roster, ResourceId};
use clinic_agenda::services::booking::BookingStore;
use clinic_agenda::services::geometry::TimeGeometry;
use clinic_agenda::ui_egui::interaction::InteractionController;

pub const ANA: ResourceId = ResourceId(1);
pub const CARLOS: ResourceId = ResourceId(2);
pub const LASER_ROOM: ResourceId = ResourceId(3);

/// Column indexes of the default roster
pub mod columns {
    pub const ANA: usize = 0;
    pub const CARLOS: usize = 1;
    pub const LASER_ROOM: usize = 2;
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn booking(
    id: u64,
    subject: &str,
    start: NaiveTime,
    duration: u32,
    resource: ResourceId,
) -> Booking {
    Booking {
        id: BookingId(id),
        subject: subject.to_string(),
        procedure: "Consultation".to_string(),
        start,
        duration_minutes: duration,
        status: BookingStatus::Confirmed,
        payment: PaymentStatus::Pending,
        category: BookingCategory::Consultation,
        resource,
        notes: None,
    }
}

/// Ana: 09:00-10:00 and 10:00-11:00. Carlos: 09:30-10:00.
pub fn morning_store() -> BookingStore {
    BookingStore::with_bookings(
        default_roster(),
        vec![
            booking(1, "Mariana Costa", t(9, 0), 60, ANA),
            booking(2, "Juliana Alves", t(10, 0), 60, ANA),
            booking(3, "Roberto Santos", t(9, 30), 30, CARLOS),
        ],
    )
}

/// Controller over the default 08:00-20:00 grid at 120px/hour.
pub fn controller() -> InteractionController {
    InteractionController::new(TimeGeometry::default(), default_roster())
}

/// Canvas offset of a wall-clock time on the default grid.
pub fn offset(h: u32, m: u32) -> f32 {
    TimeGeometry::default().time_to_offset(t(h, m))
}
