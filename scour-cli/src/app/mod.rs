mod action;
mod selection;
mod state;

pub use action::Action;
pub use selection::Selection;
pub use state::{AppMode, AppState};
