// Service module exports
// Scheduling logic, persistence boundaries and errors

pub mod booking;
pub mod conflict;
pub mod error;
pub mod fixture;
pub mod geometry;
pub mod settings;
