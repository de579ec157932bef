use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::{Mark, MarkKey};

/// Enter/update/exit outcome of binding a new mark list to the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkDiff {
    /// Keys with no mark in the previous frame.
    pub entered: Vec<MarkKey>,
    /// Surviving keys whose geometry or style changed.
    pub updated: Vec<MarkKey>,
    /// Surviving keys that are visually identical.
    pub retained: usize,
    /// Keys whose marks were removed.
    pub exited: Vec<MarkKey>,
}

impl MarkDiff {
    /// No mark was added, changed, or removed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.entered.is_empty() && self.updated.is_empty() && self.exited.is_empty()
    }
}

/// Diffs `next` against `previous` by mark key.
///
/// Output key lists follow `next` order for entered/updated marks and
/// `previous` order for exited ones.
#[must_use]
pub fn reconcile(previous: &[Mark], next: &[Mark]) -> MarkDiff {
    let before: IndexMap<&MarkKey, &Mark> = previous.iter().map(|mark| (&mark.key, mark)).collect();
    let mut diff = MarkDiff::default();

    for mark in next {
        match before.get(&mark.key) {
            None => diff.entered.push(mark.key.clone()),
            Some(old) if !old.is_identical(mark) => diff.updated.push(mark.key.clone()),
            Some(_) => diff.retained += 1,
        }
    }

    let after: IndexMap<&MarkKey, ()> = next.iter().map(|mark| (&mark.key, ())).collect();
    diff.exited = before
        .keys()
        .filter(|key| !after.contains_key(*key))
        .map(|key| (*key).clone())
        .collect();

    diff
}
