//! Keyboard and focus behavior for interactive lightbox markup.
//!
//! The rendered markup already opens and closes overlays without script
//! through a checkbox toggle and `<label for>` controls. This crate adds what
//! pure CSS cannot: Enter/Space on triggers, Escape to close, focus moved into
//! the overlay on open and back to the trigger on close, and Tab cycling
//! confined to the open overlay.
//!
//! The behavior runs against any [`Page`] implementation. The same state
//! machine ships to browsers as `lightbox.js`.

mod behavior;
mod page;
mod state;

pub use behavior::LightboxBehavior;
pub use page::{Event, Key, Outcome, Page, Role};
pub use state::FocusState;
