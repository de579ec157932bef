//! Cross-view filter state and the shared record classifier.
//!
//! Controllers own one [`FilterState`]. Charts read it and never mutate it;
//! user interaction is expressed as a [`FilterIntent`] that the controller
//! applies before asking the affected charts to refresh.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::data::{DisasterRecord, LeaderRecord, TrialRecord};

/// Record fields the filter state can discriminate on.
pub trait Filterable {
    fn record_id(&self) -> Option<i64> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn gender(&self) -> Option<&str> {
        None
    }
}

impl Filterable for TrialRecord {
    fn category(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }
}

impl Filterable for DisasterRecord {
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

impl Filterable for LeaderRecord {
    fn record_id(&self) -> Option<i64> {
        self.id
    }

    fn gender(&self) -> Option<&str> {
        Some(&self.gender)
    }
}

/// Single-value gender filter with an explicit "no filter" state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenderFilter {
    #[default]
    Any,
    Only(String),
}

impl GenderFilter {
    #[must_use]
    pub fn accepts(&self, gender: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => gender == Some(wanted.as_str()),
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Only(wanted) => Some(wanted),
        }
    }
}

/// Visual state of one record under the current filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkState {
    /// The record id is in the selection set.
    Selected,
    /// Passes every filter and is not selected.
    Active,
    /// Fails the category or gender filter.
    Inactive,
}

/// What a filter change touched; drives per-view refresh planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterTopic {
    Category,
    Gender,
    Selection,
}

/// A request to change filter state, emitted by charts and controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterIntent {
    ToggleCategory(String),
    ToggleGender(String),
    ResetGender,
    ToggleSelection(i64),
    ClearSelection,
}

impl FilterIntent {
    #[must_use]
    pub fn topic(&self) -> FilterTopic {
        match self {
            Self::ToggleCategory(_) => FilterTopic::Category,
            Self::ToggleGender(_) | Self::ResetGender => FilterTopic::Gender,
            Self::ToggleSelection(_) | Self::ClearSelection => FilterTopic::Selection,
        }
    }
}

/// Shared selection/category/gender criteria.
///
/// An empty active-category set means every category is active. Categories
/// outside `known_categories` (when that set is non-empty) are never filtered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    known_categories: BTreeSet<String>,
    active_categories: BTreeSet<String>,
    gender: GenderFilter,
    selected_ids: Vec<i64>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with every category in `categories` active, as legends do.
    #[must_use]
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        Self {
            active_categories: known.clone(),
            known_categories: known,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active_categories(&self) -> &BTreeSet<String> {
        &self.active_categories
    }

    #[must_use]
    pub fn gender(&self) -> &GenderFilter {
        &self.gender
    }

    #[must_use]
    pub fn selected_ids(&self) -> &[i64] {
        &self.selected_ids
    }

    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected_ids.contains(&id)
    }

    #[must_use]
    pub fn is_category_active(&self, category: &str) -> bool {
        if !self.known_categories.is_empty() && !self.known_categories.contains(category) {
            return true;
        }
        self.active_categories.is_empty() || self.active_categories.contains(category)
    }

    /// Whether `record` passes the category and gender filters.
    pub fn accepts<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        let category_ok = record
            .category()
            .is_none_or(|category| self.is_category_active(category));
        category_ok && self.gender.accepts(record.gender())
    }

    /// Applies `intent` and reports whether the state changed.
    pub fn apply(&mut self, intent: &FilterIntent) -> bool {
        let changed = match intent {
            FilterIntent::ToggleCategory(category) => {
                if !self.active_categories.remove(category) {
                    self.active_categories.insert(category.clone());
                }
                true
            }
            FilterIntent::ToggleGender(gender) => {
                self.gender = match &self.gender {
                    GenderFilter::Only(current) if current == gender => GenderFilter::Any,
                    _ => GenderFilter::Only(gender.clone()),
                };
                true
            }
            FilterIntent::ResetGender => {
                let changed = self.gender != GenderFilter::Any;
                self.gender = GenderFilter::Any;
                changed
            }
            FilterIntent::ToggleSelection(id) => {
                if let Some(index) = self.selected_ids.iter().position(|s| s == id) {
                    self.selected_ids.remove(index);
                } else {
                    self.selected_ids.push(*id);
                }
                true
            }
            FilterIntent::ClearSelection => {
                let changed = !self.selected_ids.is_empty();
                self.selected_ids.clear();
                changed
            }
        };
        trace!(?intent, changed, "applied filter intent");
        changed
    }
}

/// Classifies one record against the filter state.
///
/// Selection wins over the filters: a selected record is never reported as
/// active or inactive.
pub fn classify<T: Filterable + ?Sized>(record: &T, state: &FilterState) -> MarkState {
    if record.record_id().is_some_and(|id| state.is_selected(id)) {
        MarkState::Selected
    } else if state.accepts(record) {
        MarkState::Active
    } else {
        MarkState::Inactive
    }
}

/// Records split into the three disjoint visual states, each in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a, T> {
    pub selected: Vec<&'a T>,
    pub active: Vec<&'a T>,
    pub inactive: Vec<&'a T>,
}

pub fn partition<'a, T: Filterable>(records: &'a [T], state: &FilterState) -> Partition<'a, T> {
    let mut out = Partition {
        selected: Vec::new(),
        active: Vec::new(),
        inactive: Vec::new(),
    };
    for record in records {
        match classify(record, state) {
            MarkState::Selected => out.selected.push(record),
            MarkState::Active => out.active.push(record),
            MarkState::Inactive => out.inactive.push(record),
        }
    }
    out
}
