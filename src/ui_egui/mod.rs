mod app;
pub mod booking_dialog;
pub mod drag;
pub mod interaction;
pub mod resize;
pub mod resize_drawing;
pub mod views;

pub use app::AgendaApp;
