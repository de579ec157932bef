use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::charts::Chart;
use crate::filter::FilterState;
use crate::render::MarkDiff;

use super::ViewId;

/// How much of a chart has to be recomputed after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    /// Marks only: `render_vis`.
    Render,
    /// Aggregates, domains and marks: `update_vis` then `render_vis`.
    Full,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}

/// Per-view refresh work produced by one controller operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvalidationPlan {
    levels: IndexMap<ViewId, InvalidationLevel>,
}

impl InvalidationPlan {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every listed view at `level`.
    #[must_use]
    pub fn uniform(views: &[ViewId], level: InvalidationLevel) -> Self {
        let mut plan = Self::none();
        for view in views {
            plan.request(*view, level);
        }
        plan
    }

    #[must_use]
    pub fn with(mut self, view: ViewId, level: InvalidationLevel) -> Self {
        self.request(view, level);
        self
    }

    /// Raises `view` to at least `level`.
    pub fn request(&mut self, view: ViewId, level: InvalidationLevel) {
        if level == InvalidationLevel::None {
            return;
        }
        let entry = self.levels.entry(view).or_default();
        *entry = InvalidationLevel::max(*entry, level);
    }

    #[must_use]
    pub fn level(&self, view: ViewId) -> InvalidationLevel {
        self.levels.get(&view).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.levels.is_empty()
    }

    /// Views with pending work, in request order.
    pub fn views(&self) -> impl Iterator<Item = (ViewId, InvalidationLevel)> + '_ {
        self.levels.iter().map(|(view, level)| (*view, *level))
    }
}

/// Runs the refresh `level` asks for on `chart`.
pub fn refresh_chart<C>(chart: &mut C, level: InvalidationLevel, filter: &FilterState) -> Option<MarkDiff>
where
    C: Chart + ?Sized,
{
    match level {
        InvalidationLevel::None => None,
        InvalidationLevel::Render => Some(chart.render_vis(filter)),
        InvalidationLevel::Full => {
            chart.update_vis(filter);
            Some(chart.render_vis(filter))
        }
    }
}
