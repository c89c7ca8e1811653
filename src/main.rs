use clinic_agenda::ui_egui::AgendaApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    log::info!("Starting Clinic Agenda");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Clinic Agenda")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Clinic Agenda",
        options,
        Box::new(|cc| Ok(Box::new(AgendaApp::new(cc)))),
    )
}
