//! Candidate post-processing applied before rendering and before any
//! highlight arithmetic.

use std::collections::HashSet;

use crate::model::Candidate;

pub trait Filter {
    fn apply(&self, candidates: Vec<Candidate>) -> Vec<Candidate>;
}

/// Drops every candidate whose name the host has already accepted. Order of
/// the survivors is preserved.
pub struct ChosenFilter<'a> {
    names: HashSet<&'a str>,
}

impl<'a> ChosenFilter<'a> {
    pub fn new(chosen: &'a [Candidate]) -> Self {
        Self {
            names: chosen.iter().map(|item| item.name.as_str()).collect(),
        }
    }
}

impl Filter for ChosenFilter<'_> {
    fn apply(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.retain(|candidate| !self.names.contains(candidate.name.as_str()));
        candidates
    }
}

/// Hides the whole list while a query is outstanding so stale suggestions
/// are never shown during a refresh.
pub struct BusyFilter {
    pub busy: bool,
}

impl Filter for BusyFilter {
    fn apply(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if self.busy {
            Vec::new()
        } else {
            candidates
        }
    }
}
