//! Appointment dialog: a creation form pre-filled from the grid, and a
//! read-only detail view with the same actions as the card menu.

use chrono::NaiveTime;
use egui::{Color32, RichText};

use crate::models::booking::{
    Booking, BookingCategory, BookingId, BookingStatus, NewBooking, PaymentStatus,
    MIN_DURATION_MINUTES,
};
use crate::models::resource::{Resource, ResourceId};
use crate::ui_egui::interaction::SlotPreview;
use crate::ui_egui::views::booking_card::{payment_badge, status_pill};
use crate::ui_egui::views::ContextAction;
use crate::utils::time::{format_hhmm, parse_hhmm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    View(BookingId),
}

pub struct BookingDialogState {
    pub mode: DialogMode,
    pub subject: String,
    pub procedure: String,
    /// Start time as typed, `HH:MM`
    pub start_text: String,
    pub duration_minutes: u32,
    pub resource: ResourceId,
    pub category: BookingCategory,
    pub status: BookingStatus,
    pub payment: PaymentStatus,
    pub notes: String,
    pub error_message: Option<String>,
}

/// What the owner should do after the dialog was drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogAction {
    None,
    Submit(NewBooking),
    Apply(BookingId, ContextAction),
    Close,
}

impl BookingDialogState {
    pub fn new_booking(start: NaiveTime, resource: ResourceId, duration_minutes: u32) -> Self {
        Self {
            mode: DialogMode::Create,
            subject: String::new(),
            procedure: String::new(),
            start_text: format_hhmm(start),
            duration_minutes,
            resource,
            category: BookingCategory::Consultation,
            status: BookingStatus::Pending,
            payment: PaymentStatus::Pending,
            notes: String::new(),
            error_message: None,
        }
    }

    /// Creation form for a clicked ghost slot.
    pub fn for_slot(preview: &SlotPreview) -> Self {
        Self::new_booking(preview.start, preview.resource, preview.duration_minutes)
    }

    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            mode: DialogMode::View(booking.id),
            subject: booking.subject.clone(),
            procedure: booking.procedure.clone(),
            start_text: format_hhmm(booking.start),
            duration_minutes: booking.duration_minutes,
            resource: booking.resource,
            category: booking.category,
            status: booking.status,
            payment: booking.payment,
            notes: booking.notes.clone().unwrap_or_default(),
            error_message: None,
        }
    }

    /// Build the partial booking handed to the store.
    pub fn to_new_booking(&self) -> Result<NewBooking, String> {
        if self.subject.trim().is_empty() {
            return Err("Patient name cannot be empty".to_string());
        }
        let start = parse_hhmm(&self.start_text)?;
        Ok(NewBooking::new(&self.subject, &self.procedure, start, self.resource)
            .duration(self.duration_minutes)
            .category(self.category)
            .status(self.status)
            .payment(self.payment)
            .notes(&self.notes))
    }
}

pub fn render_booking_dialog(
    ctx: &egui::Context,
    state: &mut BookingDialogState,
    resources: &[Resource],
    current: Option<&Booking>,
) -> DialogAction {
    let mut action = DialogAction::None;
    let mut open = true;

    let title = match state.mode {
        DialogMode::Create => "New appointment",
        DialogMode::View(_) => "Appointment",
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref error) = state.error_message {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(6.0);
            }

            match (state.mode, current) {
                (DialogMode::Create, _) => {
                    action = render_create_form(ui, state, resources);
                }
                (DialogMode::View(_), Some(booking)) => {
                    action = render_details(ui, booking, resources);
                }
                (DialogMode::View(id), None) => {
                    ui.label(format!("Appointment {} no longer exists.", id));
                    if ui.button("Close").clicked() {
                        action = DialogAction::Close;
                    }
                }
            }
        });

    if !open {
        action = DialogAction::Close;
    }
    action
}

fn render_create_form(
    ui: &mut egui::Ui,
    state: &mut BookingDialogState,
    resources: &[Resource],
) -> DialogAction {
    let mut action = DialogAction::None;

    egui::Grid::new("booking_dialog_fields")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Patient:");
            ui.text_edit_singleline(&mut state.subject);
            ui.end_row();

            ui.label("Procedure:");
            ui.text_edit_singleline(&mut state.procedure);
            ui.end_row();

            ui.label("Start (HH:MM):");
            ui.add(egui::TextEdit::singleline(&mut state.start_text).desired_width(60.0));
            ui.end_row();

            ui.label("Duration:");
            ui.add(
                egui::DragValue::new(&mut state.duration_minutes)
                    .range(MIN_DURATION_MINUTES..=600)
                    .speed(15.0)
                    .suffix(" min"),
            );
            ui.end_row();

            ui.label("Professional:");
            let selected = resources
                .iter()
                .find(|r| r.id == state.resource)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| state.resource.to_string());
            egui::ComboBox::from_id_source("booking_dialog_resource")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for resource in resources.iter().filter(|r| r.bookable) {
                        let name = resource.name.as_str();
                        ui.selectable_value(&mut state.resource, resource.id, name);
                    }
                });
            ui.end_row();

            ui.label("Category:");
            egui::ComboBox::from_id_source("booking_dialog_category")
                .selected_text(state.category.label())
                .show_ui(ui, |ui| {
                    for category in BookingCategory::ALL {
                        ui.selectable_value(&mut state.category, category, category.label());
                    }
                });
            ui.end_row();

            ui.label("Status:");
            egui::ComboBox::from_id_source("booking_dialog_status")
                .selected_text(state.status.label())
                .show_ui(ui, |ui| {
                    for status in BookingStatus::ALL {
                        ui.selectable_value(&mut state.status, status, status.label());
                    }
                });
            ui.end_row();
        });

    ui.label("Notes:");
    ui.text_edit_multiline(&mut state.notes);
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            match state.to_new_booking() {
                Ok(draft) => action = DialogAction::Submit(draft),
                Err(message) => state.error_message = Some(message),
            }
        }
        if ui.button("Cancel").clicked() {
            action = DialogAction::Close;
        }
    });

    action
}

fn render_details(ui: &mut egui::Ui, booking: &Booking, resources: &[Resource]) -> DialogAction {
    let mut action = DialogAction::None;
    let resource_name = resources
        .iter()
        .find(|r| r.id == booking.resource)
        .map(|r| r.name.as_str())
        .unwrap_or("Unknown");

    ui.heading(booking.subject.as_str());
    ui.label(booking.procedure.as_str());
    ui.add_space(4.0);
    ui.label(format!(
        "{} ({} min) · {}",
        booking.time_range_label(),
        booking.duration_minutes,
        resource_name
    ));

    ui.horizontal(|ui| {
        let (status, status_color) = status_pill(booking.status);
        let (payment, payment_color) = payment_badge(booking.payment);
        ui.label(RichText::new(booking.category.label()).weak());
        ui.label(RichText::new(status).color(status_color).strong());
        ui.label(RichText::new(payment).color(payment_color));
    });

    if let Some(notes) = booking.notes.as_deref() {
        ui.add_space(4.0);
        ui.label(RichText::new(notes).italics());
    }

    ui.add_space(8.0);
    ui.separator();
    ui.horizontal(|ui| {
        for candidate in [ContextAction::CheckIn, ContextAction::MarkPaid, ContextAction::Cancel] {
            if ui
                .add_enabled(candidate.available_for(booking), egui::Button::new(candidate.label()))
                .clicked()
            {
                action = DialogAction::Apply(booking.id, candidate);
            }
        }
        if ui.button("Close").clicked() {
            action = DialogAction::Close;
        }
    });

    action
}
