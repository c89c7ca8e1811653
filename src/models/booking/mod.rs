// Booking module
// A patient appointment occupying a time interval on one resource

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::resource::ResourceId;
use crate::utils::time::{self, format_minutes, minutes_since_midnight, MINUTES_PER_DAY};

/// Shortest booking the agenda accepts.
pub const MIN_DURATION_MINUTES: u32 = 15;

/// Opaque booking identifier, assigned by the store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Completed,
    Canceled,
    CheckedIn,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::CheckedIn,
        BookingStatus::Completed,
        BookingStatus::Canceled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Pending => "Pending",
            BookingStatus::Completed => "Completed",
            BookingStatus::Canceled => "Canceled",
            BookingStatus::CheckedIn => "Checked in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
    Insurance,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Unpaid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Insurance => "Insurance",
        }
    }
}

/// Presentation tag that picks the card ribbon color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingCategory {
    Consultation,
    Aesthetic,
    Return,
}

impl BookingCategory {
    pub const ALL: [BookingCategory; 3] = [
        BookingCategory::Consultation,
        BookingCategory::Aesthetic,
        BookingCategory::Return,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingCategory::Consultation => "Consultation",
            BookingCategory::Aesthetic => "Aesthetic",
            BookingCategory::Return => "Return",
        }
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    /// Patient name
    pub subject: String,
    pub procedure: String,
    #[serde(with = "time::hhmm")]
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub payment: PaymentStatus,
    pub category: BookingCategory,
    pub resource: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Booking {
    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start)
    }

    /// Exclusive end of the booking, in minutes since midnight.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes().saturating_add(self.duration_minutes)
    }

    /// `HH:MM–HH:MM` label used on cards and in messages.
    pub fn time_range_label(&self) -> String {
        format!(
            "{}–{}",
            format_minutes(self.start_minutes()),
            format_minutes(self.end_minutes())
        )
    }

    pub fn is_canceled(&self) -> bool {
        self.status == BookingStatus::Canceled
    }

    /// Canceled bookings are shown but cannot be dragged or resized.
    pub fn is_interactive(&self) -> bool {
        !self.is_canceled()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("Patient name cannot be empty".to_string());
        }
        if self.duration_minutes < MIN_DURATION_MINUTES {
            return Err(format!(
                "Duration must be at least {} minutes",
                MIN_DURATION_MINUTES
            ));
        }
        let end = self.start_minutes().checked_add(self.duration_minutes);
        if end.map_or(true, |end| end > MINUTES_PER_DAY) {
            return Err(format!(
                "{} min from {} runs past midnight",
                self.duration_minutes,
                format_minutes(self.start_minutes())
            ));
        }
        Ok(())
    }
}

/// Partial booking produced by the creation flow. The store assigns the id
/// and fills the fields left empty here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub subject: String,
    pub procedure: String,
    pub start: NaiveTime,
    pub resource: ResourceId,
    pub duration_minutes: Option<u32>,
    pub category: Option<BookingCategory>,
    pub status: Option<BookingStatus>,
    pub payment: Option<PaymentStatus>,
    pub notes: Option<String>,
}

impl NewBooking {
    pub fn new(
        subject: impl Into<String>,
        procedure: impl Into<String>,
        start: NaiveTime,
        resource: ResourceId,
    ) -> Self {
        Self {
            subject: subject.into(),
            procedure: procedure.into(),
            start,
            resource,
            duration_minutes: None,
            category: None,
            status: None,
            payment: None,
            notes: None,
        }
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn category(mut self, category: BookingCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn payment(mut self, payment: PaymentStatus) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Materialize the booking with the given id and default duration.
    pub fn into_booking(self, id: BookingId, default_duration: u32) -> Result<Booking, String> {
        let booking = Booking {
            id,
            subject: self.subject.trim().to_string(),
            procedure: self.procedure.trim().to_string(),
            start: self.start,
            duration_minutes: self.duration_minutes.unwrap_or(default_duration),
            status: self.status.unwrap_or(BookingStatus::Pending),
            payment: self.payment.unwrap_or(PaymentStatus::Pending),
            category: self.category.unwrap_or(BookingCategory::Consultation),
            resource: self.resource,
            notes: self.notes,
        };
        booking.validate()?;
        Ok(booking)
    }
}
