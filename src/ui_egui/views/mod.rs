pub mod booking_card;
pub mod context_menu;
pub mod day_view;
pub(crate) mod palette;

pub use context_menu::ContextAction;
pub use day_view::{AgendaDayView, DayInteractionResult};
