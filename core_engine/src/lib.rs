//! Pure typeahead logic: candidate model, chosen-filter, highlight navigation
//! and the session state machine. Nothing in here performs I/O or owns a
//! timer; the daemon executes the returned [`key_event::Action`]s.
pub mod filter;
pub mod key_event;
pub mod model;
pub mod navigation;
pub mod session;

pub use key_event::{Action, InputEvent, NavKey};
pub use model::{Candidate, View};
pub use session::Session;
