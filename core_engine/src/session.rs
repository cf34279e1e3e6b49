//! `Session`: the selection/navigation state machine behind one typeahead.
//!
//! The session owns the text, the last accepted candidate list, the host's
//! chosen items and the highlight. It never touches a clock or a socket:
//! every event returns the [`Action`]s the runtime has to carry out, and the
//! runtime reports query progress back through [`Session::begin_query`] and
//! [`Session::apply_results`].

use crate::filter::{BusyFilter, ChosenFilter, Filter};
use crate::key_event::{Action, InputEvent, NavKey};
use crate::model::{Candidate, View};
use crate::navigation;

#[derive(Debug, Clone, Default)]
pub struct Session {
    text: String,
    suggestions: Vec<Candidate>,
    chosen: Vec<Candidate>,
    highlight: Option<usize>,
    busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chosen(chosen: Vec<Candidate>) -> Self {
        Self {
            chosen,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Raw candidate list from the last accepted response, before filtering.
    pub fn suggestions(&self) -> &[Candidate] {
        &self.suggestions
    }

    pub fn set_chosen(&mut self, chosen: Vec<Candidate>) {
        self.chosen = chosen;
    }

    /// The list the user actually sees and navigates.
    pub fn visible(&self) -> Vec<Candidate> {
        let filtered = ChosenFilter::new(&self.chosen).apply(self.suggestions.clone());
        BusyFilter { busy: self.busy }.apply(filtered)
    }

    pub fn view(&self) -> View {
        View {
            text: self.text.clone(),
            busy: self.busy,
            candidates: self.visible(),
            highlight: self.highlight,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Change(text) => {
                self.text = text;
                if self.text.is_empty() {
                    vec![Action::CancelDebounce]
                } else {
                    vec![Action::ArmDebounce]
                }
            }
            InputEvent::Focus => vec![Action::QueryNow],
            InputEvent::Blur => vec![Action::ScheduleBlurClear],
            InputEvent::Key(NavKey::Down) => {
                self.highlight = navigation::move_down(self.highlight, self.visible().len());
                Vec::new()
            }
            InputEvent::Key(NavKey::Up) => {
                self.highlight = navigation::move_up(self.highlight, self.visible().len());
                Vec::new()
            }
            InputEvent::Key(NavKey::Enter) => match self.highlight {
                Some(index) => self.commit(index),
                None => Vec::new(),
            },
            InputEvent::Hover(index) => {
                self.highlight = Some(index);
                Vec::new()
            }
            InputEvent::Click(index) => self.commit(index),
        }
    }

    /// Marks a query as outstanding and returns the prefix to send.
    pub fn begin_query(&mut self) -> String {
        self.busy = true;
        self.text.clone()
    }

    /// Settles the current query. A failed attempt passes an empty list so
    /// that stale candidates do not outlive it.
    pub fn apply_results(&mut self, items: Vec<Candidate>) {
        self.busy = false;
        self.suggestions = items;
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    fn commit(&mut self, index: usize) -> Vec<Action> {
        let mut visible = self.visible();
        if navigation::resolve(Some(index), visible.len()).is_none() {
            return Vec::new();
        }
        let picked = visible.swap_remove(index);
        self.suggestions.clear();
        self.text.clear();
        self.highlight = None;
        let name = picked.name.clone();
        vec![
            Action::CancelDebounce,
            Action::Pick(picked),
            Action::ReleaseFocus,
            Action::NotifySelection(name),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(names: &[&str]) -> Session {
        let mut session = Session::new();
        session.begin_query();
        session.apply_results(names.iter().map(|n| Candidate::new(*n)).collect());
        session
    }

    fn visible_names(session: &Session) -> Vec<String> {
        session.visible().into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn typing_arms_debounce_and_clearing_cancels_it() {
        let mut session = Session::new();
        assert_eq!(session.handle(InputEvent::Change("ma".into())), [Action::ArmDebounce]);
        assert_eq!(session.handle(InputEvent::Change("mat".into())), [Action::ArmDebounce]);
        assert_eq!(session.handle(InputEvent::Change(String::new())), [Action::CancelDebounce]);
        assert_eq!(session.text(), "");
    }

    #[test]
    fn focus_queries_immediately_even_when_empty() {
        let mut session = Session::new();
        assert_eq!(session.handle(InputEvent::Focus), [Action::QueryNow]);
        assert_eq!(session.begin_query(), "");
        assert!(session.is_busy());
    }

    #[test]
    fn hides_chosen_candidates() {
        let mut session = listed(&["Matilda", "Martin"]);
        session.set_chosen(vec![Candidate::new("Martin")]);
        assert_eq!(visible_names(&session), ["Matilda"]);
    }

    #[test]
    fn busy_hides_list_without_dropping_it() {
        let mut session = listed(&["Alice", "Bob"]);
        assert_eq!(session.visible().len(), 2);
        session.begin_query();
        assert!(session.visible().is_empty());
        assert_eq!(session.suggestions().len(), 2);
    }

    #[test]
    fn down_three_times_wraps() {
        let mut session = listed(&["Alice", "Bob"]);
        let mut seen = Vec::new();
        for _ in 0..3 {
            session.handle(InputEvent::Key(NavKey::Down));
            seen.push(session.highlight());
        }
        assert_eq!(seen, [Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn up_from_nothing_goes_to_last() {
        let mut session = listed(&["Alice", "Bob", "Carol"]);
        session.handle(InputEvent::Key(NavKey::Up));
        assert_eq!(session.highlight(), Some(2));
        session.handle(InputEvent::Key(NavKey::Up));
        assert_eq!(session.highlight(), Some(1));
    }

    #[test]
    fn navigation_respects_filtered_length() {
        let mut session = listed(&["Alice", "Bob", "Carol"]);
        session.set_chosen(vec![Candidate::new("Carol")]);
        session.handle(InputEvent::Key(NavKey::Up));
        assert_eq!(session.highlight(), Some(1));
    }

    #[test]
    fn enter_without_highlight_is_noop() {
        let mut session = listed(&["Alice"]);
        session.handle(InputEvent::Change("al".into()));
        assert!(session.handle(InputEvent::Key(NavKey::Enter)).is_empty());
        assert_eq!(session.text(), "al");
        assert_eq!(visible_names(&session), ["Alice"]);
    }

    #[test]
    fn enter_on_stale_highlight_is_noop() {
        let mut session = listed(&["Alice"]);
        session.handle(InputEvent::Hover(5));
        assert!(session.handle(InputEvent::Key(NavKey::Enter)).is_empty());
    }

    #[test]
    fn huge_hover_index_still_navigates() {
        let mut session = listed(&["Alice", "Bob"]);
        session.handle(InputEvent::Hover(usize::MAX));
        session.handle(InputEvent::Key(NavKey::Down));
        assert_eq!(session.highlight(), Some(0));
        session.handle(InputEvent::Hover(usize::MAX));
        session.handle(InputEvent::Key(NavKey::Up));
        assert_eq!(session.highlight(), Some(1));
        assert!(session.handle(InputEvent::Click(usize::MAX)).is_empty());
    }

    #[test]
    fn hover_sets_highlight_directly() {
        let mut session = listed(&["Alice", "Bob"]);
        session.handle(InputEvent::Hover(1));
        assert_eq!(session.highlight(), Some(1));
    }

    #[test]
    fn enter_commits_highlighted_and_resets() {
        let mut session = listed(&["Matilda", "Martin", "Mabel"]);
        session.set_chosen(vec![Candidate::new("Martin")]);
        session.handle(InputEvent::Change("ma".into()));
        session.handle(InputEvent::Key(NavKey::Down));
        session.handle(InputEvent::Key(NavKey::Down));

        let actions = session.handle(InputEvent::Key(NavKey::Enter));
        assert_eq!(
            actions,
            [
                Action::CancelDebounce,
                Action::Pick(Candidate::new("Mabel")),
                Action::ReleaseFocus,
                Action::NotifySelection("Mabel".into()),
            ]
        );
        assert_eq!(session.text(), "");
        assert!(session.suggestions().is_empty());
        assert_eq!(session.highlight(), None);
    }

    #[test]
    fn click_commits_by_position() {
        let mut session = listed(&["Alice", "Bob"]);
        let actions = session.handle(InputEvent::Click(0));
        assert_eq!(actions[1], Action::Pick(Candidate::new("Alice")));
        assert!(session.handle(InputEvent::Click(0)).is_empty());
    }

    #[test]
    fn blur_schedules_clear() {
        let mut session = listed(&["Alice"]);
        assert_eq!(session.handle(InputEvent::Blur), [Action::ScheduleBlurClear]);
        session.clear_suggestions();
        assert!(session.visible().is_empty());
    }
}
