use super::toast::ToastManager;
use super::AgendaApp;
use crate::models::resource::default_roster;
use crate::models::settings::AgendaSettings;
use crate::services::booking::BookingStore;
use crate::services::fixture::{demo_agenda, load_agenda, AgendaFixture};
use crate::services::geometry::TimeGeometry;
use crate::services::settings::SettingsService;
use crate::ui_egui::interaction::InteractionController;

impl AgendaApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_service = SettingsService::at_default_location();
        let app = Self::with_settings(settings_service);
        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Build the app state without touching egui.
    pub(super) fn with_settings(settings_service: SettingsService) -> Self {
        let mut toasts = ToastManager::new();
        let mut settings = load_settings_or_default(&settings_service, &mut toasts);
        let AgendaFixture { resources, bookings } = load_fixture_or_demo(&settings, &mut toasts);

        if !resources.is_empty() {
            settings.resources = resources;
        }

        if let Err(err) = settings.validate() {
            log::warn!("Agenda resources rejected ({}), using the default roster", err);
            toasts.warning(format!("Invalid resource list: {}", err));
            settings.resources = default_roster();
        }

        let controller = match InteractionController::from_settings(&settings) {
            Ok(controller) => controller,
            Err(err) => {
                log::error!("Could not build the day grid: {}", err);
                settings = AgendaSettings::default();
                InteractionController::new(TimeGeometry::default(), default_roster())
            }
        };

        let mut store = BookingStore::with_bookings(settings.resources.clone(), bookings);
        store.set_default_duration(settings.default_duration_minutes);
        store.set_resize_conflict_check(settings.resize_conflict_check);

        log::info!(
            "Agenda ready: {} resources, {} bookings, {}:00-{}:00",
            settings.resources.len(),
            store.bookings().len(),
            settings.start_hour,
            settings.end_hour
        );

        Self {
            settings,
            settings_service,
            store,
            controller,
            toasts,
            dialog: None,
        }
    }

    pub(super) fn apply_theme(&self, ctx: &egui::Context) {
        if self.settings.is_dark() {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
    }
}

fn load_settings_or_default(
    service: &SettingsService,
    toasts: &mut ToastManager,
) -> AgendaSettings {
    let settings = service.load();
    match settings.validate() {
        Ok(()) => settings,
        Err(err) => {
            log::warn!(
                "Settings in {} are invalid ({}), using defaults",
                service.path().display(),
                err
            );
            toasts.warning(format!("Settings ignored: {}", err));
            AgendaSettings::default()
        }
    }
}

fn load_fixture_or_demo(settings: &AgendaSettings, toasts: &mut ToastManager) -> AgendaFixture {
    let Some(path) = settings.fixture_path.as_deref() else {
        return demo_agenda();
    };
    match load_agenda(path) {
        Ok(fixture) => fixture,
        Err(err) => {
            log::error!("{:#}", err);
            toasts.error(format!("Could not load agenda, showing demo day: {}", err));
            demo_agenda()
        }
    }
}
