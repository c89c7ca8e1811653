use super::BookingStore;
use crate::models::booking::{Booking, BookingId, BookingStatus, NewBooking, PaymentStatus};
use crate::services::conflict::{self, Candidate};
use crate::services::error::{AgendaError, ConflictError};

impl BookingStore {
    /// Create a booking from the creation form, assigning the next id and
    /// the default status, payment, category and duration.
    pub fn create(&mut self, draft: NewBooking) -> Result<Booking, AgendaError> {
        let resource = self
            .resource(draft.resource)
            .ok_or(AgendaError::UnknownResource(draft.resource))?;
        if !resource.bookable {
            return Err(ConflictError::NotBookable {
                resource: draft.resource,
            }
            .into());
        }

        let id = BookingId(self.next_id);
        let booking = draft
            .into_booking(id, self.default_duration)
            .map_err(AgendaError::Validation)?;

        if !booking.is_canceled() {
            conflict::ensure_free(&Candidate::from_booking(&booking), &self.bookings, None)?;
        }

        self.next_id += 1;
        log::info!(
            "Created booking {} for '{}' at {} on {}",
            booking.id,
            booking.subject,
            booking.time_range_label(),
            booking.resource
        );
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Retrieve a booking by id.
    pub fn get(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: BookingId) -> Result<&mut Booking, AgendaError> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AgendaError::NotFound(id))
    }

    /// Remove a booking entirely.
    pub fn delete(&mut self, id: BookingId) -> Result<Booking, AgendaError> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(AgendaError::NotFound(id))?;
        let removed = self.bookings.remove(index);
        log::info!("Deleted booking {} ('{}')", removed.id, removed.subject);
        Ok(removed)
    }

    pub fn set_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, AgendaError> {
        let booking = self.get_mut(id)?;
        log::info!(
            "Booking {} status {} -> {}",
            id,
            booking.status.label(),
            status.label()
        );
        booking.status = status;
        Ok(booking.clone())
    }

    pub fn set_payment(
        &mut self,
        id: BookingId,
        payment: PaymentStatus,
    ) -> Result<Booking, AgendaError> {
        let booking = self.get_mut(id)?;
        log::info!(
            "Booking {} payment {} -> {}",
            id,
            booking.payment.label(),
            payment.label()
        );
        booking.payment = payment;
        Ok(booking.clone())
    }

    pub fn check_in(&mut self, id: BookingId) -> Result<Booking, AgendaError> {
        self.set_status(id, BookingStatus::CheckedIn)
    }

    pub fn mark_paid(&mut self, id: BookingId) -> Result<Booking, AgendaError> {
        self.set_payment(id, PaymentStatus::Paid)
    }

    /// Cancel keeps the booking on the agenda, muted, and frees its slot.
    pub fn cancel(&mut self, id: BookingId) -> Result<Booking, AgendaError> {
        self.set_status(id, BookingStatus::Canceled)
    }
}
