// Module exports for models

pub mod booking;
pub mod resource;
pub mod settings;
