//! Highlight movement over the filtered list. `None` plays the role of "no
//! highlight" and behaves like index -1 in the wrap rules.

/// Down: from the last index (or anything past it) wrap to 0, else advance.
/// An empty list still lands on 0.
pub fn move_down(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        Some(index) if index < len.saturating_sub(1) => Some(index + 1),
        _ => Some(0),
    }
}

/// Up: from nothing, the first index, or a stale index past the end, wrap to
/// the last index; otherwise step back. An empty list yields `None`.
pub fn move_up(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        Some(index) if index > 0 && index < len => Some(index - 1),
        _ => len.checked_sub(1),
    }
}

/// Resolves the highlight against the filtered list, if it points at an entry.
pub fn resolve(current: Option<usize>, len: usize) -> Option<usize> {
    current.filter(|index| *index < len)
}
