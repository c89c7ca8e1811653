//! Clinic day agenda: resource columns on a time grid, with drag to move,
//! bottom-edge resize and overlap detection.

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
