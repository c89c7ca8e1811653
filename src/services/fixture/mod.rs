//! JSON agenda files and the built-in demo day.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::models::booking::{
    Booking, BookingCategory, BookingId, BookingStatus, NewBooking, PaymentStatus,
};
use crate::models::resource::{default_roster, Resource, ResourceId};

/// On-disk shape of an agenda: `{ "resources": [...], "bookings": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaFixture {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

pub fn load_agenda(path: &Path) -> Result<AgendaFixture> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read agenda from {}", path.display()))?;
    let fixture: AgendaFixture =
        serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;

    let mut seen = HashSet::new();
    for booking in &fixture.bookings {
        if !seen.insert(booking.id) {
            anyhow::bail!("duplicate booking id {} in {}", booking.id, path.display());
        }
        booking.validate().map_err(|message| {
            anyhow::anyhow!(
                "invalid booking {} in {}: {}",
                booking.id,
                path.display(),
                message
            )
        })?;
    }

    log::info!(
        "Loaded {} bookings and {} resources from {}",
        fixture.bookings.len(),
        fixture.resources.len(),
        path.display()
    );
    Ok(fixture)
}

pub fn save_agenda(path: &Path, fixture: &AgendaFixture) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(fixture)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write agenda to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize agenda from {}",
        path.display()
    ))
}

/// The sample clinic day shown when no agenda file is configured.
pub fn demo_agenda() -> AgendaFixture {
    let ana = ResourceId(1);
    let carlos = ResourceId(2);

    let drafts = [
        demo_draft("Mariana Costa", "Botox", (9, 0), ana).map(|d| {
            d.duration(60)
                .status(BookingStatus::Confirmed)
                .payment(PaymentStatus::Paid)
                .category(BookingCategory::Aesthetic)
        }),
        demo_draft("Juliana Alves", "Evaluation", (9, 30), carlos).map(|d| {
            d.duration(30)
                .status(BookingStatus::CheckedIn)
                .payment(PaymentStatus::Insurance)
                .category(BookingCategory::Consultation)
        }),
        demo_draft("Fernanda Lima", "Hyaluronic filler", (10, 30), ana).map(|d| {
            d.duration(90)
                .status(BookingStatus::Pending)
                .payment(PaymentStatus::Partial)
                .category(BookingCategory::Aesthetic)
        }),
        demo_draft("Roberto Santos", "Follow-up", (11, 0), carlos).map(|d| {
            d.duration(30)
                .status(BookingStatus::Confirmed)
                .payment(PaymentStatus::Pending)
                .category(BookingCategory::Return)
        }),
        demo_draft("Patricia Souza", "Chemical peel", (13, 0), ana).map(|d| {
            d.duration(45)
                .status(BookingStatus::Completed)
                .payment(PaymentStatus::Paid)
                .category(BookingCategory::Aesthetic)
        }),
        demo_draft("Camila Rocha", "Consultation", (14, 0), carlos).map(|d| {
            d.duration(60)
                .status(BookingStatus::Pending)
                .payment(PaymentStatus::Pending)
                .category(BookingCategory::Consultation)
        }),
        demo_draft("Beatriz Nunes", "Bioremodeling", (15, 30), ana).map(|d| {
            d.duration(60)
                .status(BookingStatus::Canceled)
                .payment(PaymentStatus::Pending)
                .category(BookingCategory::Aesthetic)
        }),
        demo_draft("Lucas Pereira", "Botox review", (16, 15), carlos).map(|d| {
            d.duration(30)
                .status(BookingStatus::Confirmed)
                .payment(PaymentStatus::Paid)
                .category(BookingCategory::Return)
        }),
    ];

    let bookings = drafts
        .into_iter()
        .zip(1..)
        .filter_map(|(draft, id)| draft?.into_booking(BookingId(id), 30).ok())
        .collect();

    AgendaFixture {
        resources: default_roster(),
        bookings,
    }
}

fn demo_draft(
    subject: &str,
    procedure: &str,
    (hour, minute): (u32, u32),
    resource: ResourceId,
) -> Option<NewBooking> {
    let start = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(NewBooking::new(subject, procedure, start, resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::conflict::overlapping_pairs;
    use tempfile::TempDir;

    #[test]
    fn test_demo_agenda_is_consistent() {
        let demo = demo_agenda();
        assert_eq!(demo.bookings.len(), 8);
        assert!(overlapping_pairs(&demo.bookings).is_empty());
        assert!(demo.bookings.iter().all(|b| b.validate().is_ok()));
        assert!(demo
            .bookings
            .iter()
            .all(|b| demo.resources.iter().any(|r| r.id == b.resource && r.bookable)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("agenda.json");

        save_agenda(&path, &demo_agenda()).unwrap();
        let loaded = load_agenda(&path).unwrap();
        assert_eq!(loaded, demo_agenda());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = load_agenda(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read agenda"));
    }

    #[test]
    fn test_load_rejects_short_booking() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(
            &path,
            r#"{"bookings":[{"id":1,"subject":"Ana","procedure":"Botox","start":"09:00",
            "duration_minutes":5,"status":"confirmed","payment":"paid",
            "category":"aesthetic","resource":1}]}"#,
        )
        .unwrap();

        let err = load_agenda(&path).unwrap_err();
        assert!(err.to_string().contains("invalid booking 1"));
    }

    #[test]
    fn test_load_rejects_repeated_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        let mut fixture = demo_agenda();
        fixture.bookings[1].id = BookingId(1);
        save_agenda(&path, &fixture).unwrap();

        let err = load_agenda(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate booking id 1"));
    }

    #[test]
    fn test_load_rejects_booking_past_midnight() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(
            &path,
            r#"{"bookings":[{"id":1,"subject":"Ana","procedure":"Botox","start":"09:00",
            "duration_minutes":4294967295,"status":"confirmed","payment":"paid",
            "category":"aesthetic","resource":1}]}"#,
        )
        .unwrap();

        let err = load_agenda(&path).unwrap_err();
        assert!(err.to_string().contains("past midnight"), "got {err}");
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_agenda(&path).unwrap_err();
        assert!(err.to_string().contains("failed to deserialize agenda"));
    }
}
