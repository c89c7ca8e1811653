mod lifecycle;
mod toast;

use self::toast::ToastManager;
use crate::models::booking::{Booking, BookingId};
use crate::models::settings::AgendaSettings;
use crate::services::booking::{BookingIntent, BookingStore};
use crate::services::error::AgendaError;
use crate::services::settings::SettingsService;
use crate::ui_egui::booking_dialog::{
    render_booking_dialog, BookingDialogState, DialogAction, DialogMode,
};
use crate::ui_egui::interaction::InteractionController;
use crate::ui_egui::views::{AgendaDayView, ContextAction, DayInteractionResult};
use crate::utils::time::format_hhmm;

pub struct AgendaApp {
    settings: AgendaSettings,
    settings_service: SettingsService,
    /// Owner of the day's bookings; the grid only proposes changes
    store: BookingStore,
    /// Gesture state of the day grid, kept across frames
    controller: InteractionController,
    toasts: ToastManager,
    dialog: Option<BookingDialogState>,
}

impl eframe::App for AgendaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_header(ctx);

        let result = egui::CentralPanel::default()
            .show(ctx, |ui| {
                AgendaDayView::show(ui, &mut self.controller, self.store.bookings())
            })
            .inner;
        self.handle_day_result(result);

        self.render_dialog(ctx);
        self.toasts.render(ctx, self.settings.is_dark());
    }
}

impl AgendaApp {
    fn render_header(&mut self, ctx: &egui::Context) {
        let summary = self.store.summary();

        egui::TopBottomPanel::top("agenda_header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Clinic Agenda");
                ui.separator();
                ui.label(format!("{} appointments", summary.total));
                ui.label(format!("{} checked in", summary.checked_in));
                ui.label(format!("{} pending", summary.pending));
                ui.label(format!("{} paid", summary.paid));
                if summary.canceled > 0 {
                    ui.weak(format!("{} canceled", summary.canceled));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("➕ New appointment").clicked() {
                        self.open_new_booking_dialog();
                    }

                    let (theme_label, next_theme) = if self.settings.is_dark() {
                        ("☀ Light", "light")
                    } else {
                        ("🌙 Dark", "dark")
                    };
                    if ui.button(theme_label).clicked() {
                        self.settings.theme = next_theme.to_string();
                        self.apply_theme(ctx);
                        self.persist_settings();
                    }

                    let mut check = self.settings.resize_conflict_check;
                    if ui
                        .checkbox(&mut check, "Block overlapping resizes")
                        .on_hover_text("When off, resizing may overlap the next appointment")
                        .changed()
                    {
                        self.set_resize_conflict_check(check);
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn set_resize_conflict_check(&mut self, enabled: bool) {
        self.settings.resize_conflict_check = enabled;
        self.store.set_resize_conflict_check(enabled);
        self.controller.set_resize_conflict_check(enabled);
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        if let Err(err) = self.settings_service.save(&self.settings) {
            log::error!("Failed to save settings: {:#}", err);
            self.toasts.error("Could not save settings");
        }
    }

    /// Open the creation form at the first free slot of the first bookable
    /// column.
    fn open_new_booking_dialog(&mut self) {
        let duration = self.settings.default_duration_minutes;
        let geometry = *self.controller.geometry();
        let slot = self
            .controller
            .columns()
            .iter()
            .filter(|r| r.bookable)
            .find_map(|r| {
                self.store
                    .first_free_slot(r.id, duration, &geometry)
                    .map(|start| (start, r.id))
            });

        match slot {
            Some((start, resource)) => {
                self.dialog = Some(BookingDialogState::new_booking(start, resource, duration));
            }
            None => self.toasts.info("No free slot left today"),
        }
    }

    fn handle_day_result(&mut self, result: DayInteractionResult) {
        for intent in result.intents {
            self.apply_intent(intent);
        }

        for rejection in result.rejections {
            log::debug!("Gesture rejected: {}", rejection);
            self.toasts.warning(rejection.to_string());
        }

        if let Some(slot) = result.create_request {
            self.dialog = Some(BookingDialogState::for_slot(&slot));
        }

        if let Some(id) = result.view_request {
            self.open_details(id);
        }

        for (id, action) in result.context_actions {
            self.apply_context_action(id, action);
        }
    }

    fn apply_intent(&mut self, intent: BookingIntent) {
        match self.store.apply(&intent) {
            Ok(booking) => {
                let message = match intent {
                    BookingIntent::Move { .. } => format!(
                        "{} moved to {} ({})",
                        booking.subject,
                        format_hhmm(booking.start),
                        self.resource_name(&booking)
                    ),
                    BookingIntent::Resize { .. } => format!(
                        "{} now {} min ({})",
                        booking.subject,
                        booking.duration_minutes,
                        booking.time_range_label()
                    ),
                };
                self.toasts.success(message);
            }
            Err(err) => {
                log::warn!("Could not apply {:?}: {}", intent, err);
                self.toasts.warning(err.to_string());
            }
        }
    }

    fn apply_context_action(&mut self, id: BookingId, action: ContextAction) {
        let outcome: Result<Booking, AgendaError> = match action {
            ContextAction::CheckIn => self.store.check_in(id),
            ContextAction::MarkPaid => self.store.mark_paid(id),
            ContextAction::Cancel => self.store.cancel(id),
            ContextAction::View => {
                self.open_details(id);
                return;
            }
        };

        match outcome {
            Ok(booking) => {
                let message = match action {
                    ContextAction::CheckIn => format!("{} checked in", booking.subject),
                    ContextAction::MarkPaid => format!("{} marked as paid", booking.subject),
                    _ => format!("{} canceled", booking.subject),
                };
                self.toasts.success(message);
            }
            Err(err) => {
                log::warn!("{:?} on booking {} failed: {}", action, id, err);
                self.toasts.error(err.to_string());
            }
        }
    }

    fn open_details(&mut self, id: BookingId) {
        match self.store.get(id) {
            Some(booking) => self.dialog = Some(BookingDialogState::for_booking(booking)),
            None => log::warn!("Booking {} vanished before its details opened", id),
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(state) = self.dialog.as_mut() else {
            return;
        };

        let current = match state.mode {
            DialogMode::View(id) => self.store.get(id),
            DialogMode::Create => None,
        };
        let action = render_booking_dialog(ctx, state, self.store.resources(), current);

        match action {
            DialogAction::None => {}
            DialogAction::Close => self.dialog = None,
            DialogAction::Submit(draft) => match self.store.create(draft) {
                Ok(booking) => {
                    self.toasts.success(format!(
                        "Booked {} at {}",
                        booking.subject,
                        booking.time_range_label()
                    ));
                    self.dialog = None;
                }
                Err(err) => {
                    if let Some(state) = self.dialog.as_mut() {
                        state.error_message = Some(err.to_string());
                    }
                }
            },
            DialogAction::Apply(id, action) => {
                self.apply_context_action(id, action);
                if action == ContextAction::Cancel {
                    self.dialog = None;
                }
            }
        }
    }

    fn resource_name(&self, booking: &Booking) -> String {
        self.store
            .resource(booking.resource)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| booking.resource.to_string())
    }
}
