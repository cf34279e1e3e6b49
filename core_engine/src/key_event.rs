use serde::{Deserialize, Serialize};

use crate::model::Candidate;

/// Navigation keys the widget reacts to. Everything else is left to the
/// text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKey {
    Up,
    Down,
    Enter,
}

/// Semantic UI events coming from the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text field now holds this value.
    Change(String),
    Focus,
    Blur,
    Key(NavKey),
    /// Pointer moved over the entry at this position of the visible list.
    Hover(usize),
    /// Pointer clicked the entry at this position of the visible list.
    Click(usize),
}

/// Side effects requested by the session. The runtime owning the timers and
/// the network executes them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// (Re)start the quiescence timer; a pending one is replaced.
    ArmDebounce,
    /// Drop a pending quiescence timer without querying.
    CancelDebounce,
    /// Query right away with the current text.
    QueryNow,
    /// Clear the candidate list after the blur grace delay.
    ScheduleBlurClear,
    /// Hand the confirmed candidate to the host.
    Pick(Candidate),
    /// Ask the surface to drop input focus.
    ReleaseFocus,
    /// Best-effort report of the selection to the remote service.
    NotifySelection(String),
}
