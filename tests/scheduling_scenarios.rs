// End-to-end gestures: controller intents applied to the store

mod fixtures;

use fixtures::*;
use pretty_assertions::assert_eq;

use clinic_agenda::models::booking::{BookingId, NewBooking};
use clinic_agenda::services::booking::BookingIntent;
use clinic_agenda::services::error::{AgendaError, ConflictError};

#[test]
fn test_drag_rejected_then_moved_then_resized() {
    let mut store = morning_store();
    let mut ctl = controller();
    let first = store.get(BookingId(1)).unwrap().clone();

    // Grab 10px below the card top and pull it half an hour down
    assert!(ctl.begin_drag(&first, offset(9, 0) + 10.0));
    ctl.drag_to(offset(9, 30) + 10.0, columns::ANA, true, store.bookings());
    assert!(ctl.drag().unwrap().conflict);

    let err = ctl.release_pointer(store.bookings()).unwrap_err();
    match err {
        ConflictError::Overlap { conflicting, .. } => {
            assert_eq!(conflicting, vec![BookingId(2)])
        }
        other => panic!("expected overlap, got {other:?}"),
    }
    assert!(!ctl.is_busy());
    assert_eq!(store.get(BookingId(1)).unwrap().start, t(9, 0));

    // Second try lands after the 10:00 appointment
    assert!(ctl.begin_drag(&first, offset(9, 0) + 10.0));
    ctl.drag_to(offset(11, 30) + 10.0, columns::ANA, true, store.bookings());
    let intent = ctl.release_pointer(store.bookings()).unwrap().unwrap();
    assert_eq!(
        intent,
        BookingIntent::Move {
            id: BookingId(1),
            start: t(11, 30),
            resource: ANA,
        }
    );
    store.apply(&intent).unwrap();

    // Stretch the 10:00 appointment by 30 minutes; it now touches 11:30
    let second = store.get(BookingId(2)).unwrap().clone();
    let bottom = offset(11, 0) - 2.0;
    assert!(ctl.begin_resize(&second, bottom));
    ctl.resize_to(bottom + 60.0, store.bookings());
    assert_eq!(ctl.resize_grip().unwrap().current_duration(), 90);
    assert!(!ctl.resize_grip().unwrap().conflict());

    let intent = ctl.release_pointer(store.bookings()).unwrap().unwrap();
    let resized = store.apply(&intent).unwrap();
    assert_eq!(resized.time_range_label(), "10:00–11:30");
}

#[test]
fn test_drag_across_columns_reassigns_professional() {
    let mut store = morning_store();
    let mut ctl = controller();
    let first = store.get(BookingId(1)).unwrap().clone();

    ctl.begin_drag(&first, offset(9, 0));
    ctl.drag_to(offset(14, 0), columns::CARLOS, true, store.bookings());
    let intent = ctl.release_pointer(store.bookings()).unwrap().unwrap();
    let moved = store.apply(&intent).unwrap();

    assert_eq!(moved.resource, CARLOS);
    assert_eq!(moved.start, t(14, 0));
    assert_eq!(store.for_resource(ANA).len(), 1);
}

#[test]
fn test_drop_on_room_column_is_refused() {
    let store = morning_store();
    let mut ctl = controller();
    let first = store.get(BookingId(1)).unwrap().clone();

    ctl.begin_drag(&first, offset(9, 0));
    ctl.drag_to(offset(13, 0), columns::LASER_ROOM, true, store.bookings());
    assert!(!ctl.drag().unwrap().droppable);

    assert_eq!(
        ctl.release_pointer(store.bookings()),
        Err(ConflictError::NotBookable {
            resource: LASER_ROOM
        })
    );
}

#[test]
fn test_release_above_grid_leaves_store_untouched() {
    let store = morning_store();
    let mut ctl = controller();
    let third = store.get(BookingId(3)).unwrap().clone();
    let before = store.bookings().to_vec();

    ctl.begin_drag(&third, offset(9, 30));
    ctl.drag_to(offset(15, 0), columns::CARLOS, true, store.bookings());
    ctl.drag_to(-400.0, columns::CARLOS, false, store.bookings());

    assert_eq!(ctl.release_pointer(store.bookings()), Ok(None));
    assert!(!ctl.is_busy());
    assert_eq!(store.bookings(), before.as_slice());
}

#[test]
fn test_store_rechecks_stale_intent() {
    let mut store = morning_store();

    // An intent computed before someone else booked 13:00
    let intent = BookingIntent::Move {
        id: BookingId(3),
        start: t(13, 0),
        resource: CARLOS,
    };
    store
        .create(NewBooking::new("Camila Rocha", "Peel", t(13, 0), CARLOS).duration(60))
        .unwrap();

    assert!(matches!(
        store.apply(&intent),
        Err(AgendaError::Conflict(ConflictError::Overlap { .. }))
    ));
    assert_eq!(store.get(BookingId(3)).unwrap().start, t(9, 30));
}

#[test]
fn test_canceled_booking_frees_its_slot() {
    let mut store = morning_store();
    let draft = || NewBooking::new("Lucas Pereira", "Review", t(10, 15), ANA);

    assert!(store.create(draft()).is_err());
    store.cancel(BookingId(2)).unwrap();

    let created = store.create(draft()).unwrap();
    assert_eq!(created.duration_minutes, 30);
    assert_eq!(created.id, BookingId(4));
}

#[test]
fn test_ghost_click_feeds_creation() {
    let mut store = morning_store();
    let mut ctl = controller();

    // Over a card there is no ghost
    ctl.hover(offset(10, 15), columns::ANA, store.bookings());
    assert!(ctl.hover_preview().is_none());

    ctl.hover(offset(12, 5), columns::ANA, store.bookings());
    let ghost = *ctl.hover_preview().unwrap();
    assert_eq!(ghost.start, t(12, 0));
    assert_eq!(ghost.resource, ANA);

    let slot = ctl.click().unwrap();
    let created = store
        .create(
            NewBooking::new("Camila Rocha", "Consultation", slot.start, slot.resource)
                .duration(slot.duration_minutes),
        )
        .unwrap();
    assert_eq!(created.time_range_label(), "12:00–12:30");
    assert!(ctl.hover_preview().is_none());
}

#[test]
fn test_resize_overlap_allowed_when_check_disabled() {
    let mut store = morning_store();
    let mut ctl = controller();
    let first = store.get(BookingId(1)).unwrap().clone();
    let bottom = offset(10, 0) - 2.0;

    ctl.begin_resize(&first, bottom);
    ctl.resize_to(bottom + 60.0, store.bookings());
    assert!(ctl.release_pointer(store.bookings()).is_err());

    ctl.set_resize_conflict_check(false);
    store.set_resize_conflict_check(false);

    ctl.begin_resize(&first, bottom);
    ctl.resize_to(bottom + 60.0, store.bookings());
    let intent = ctl.release_pointer(store.bookings()).unwrap().unwrap();
    assert_eq!(store.apply(&intent).unwrap().duration_minutes, 90);
}
