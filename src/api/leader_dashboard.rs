//! Linked leader views: gender bar chart, GDP scatterplot and lexis chart.
//!
//! The dashboard owns the full record list and the filter state. A group
//! selection slices the records (`memberships[group] == 1 && duration > 0`)
//! and rebinds every view; the scatterplot additionally drops records
//! without GDP data. Clicks are turned into [`FilterIntent`]s and applied
//! here, never inside the charts.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::{BarChart, Chart, ChartConfig, LeaderScatterplot, LexisChart};
use crate::data::LeaderRecord;
use crate::error::{ChartError, ChartResult};
use crate::filter::{FilterIntent, FilterState, FilterTopic};
use crate::interaction::Tooltip;
use crate::render::{RenderFrame, Renderer};

use super::{
    DashboardEvent, DashboardObserver, DashboardSnapshot, InvalidationLevel, InvalidationPlan,
    ObserverRegistry, ViewId, ViewSnapshot, refresh_chart,
};

pub const DEFAULT_GROUP: &str = "oecd";

const VIEWS: [ViewId; 3] = [ViewId::BarChart, ViewId::Scatterplot, ViewId::Lexis];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderDashboardConfig {
    pub group: String,
    pub bar_chart: ChartConfig,
    pub scatterplot: ChartConfig,
    pub lexis: ChartConfig,
}

impl Default for LeaderDashboardConfig {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP.to_owned(),
            bar_chart: BarChart::default_config(),
            scatterplot: LeaderScatterplot::default_config(),
            lexis: LexisChart::default_config(),
        }
    }
}

#[derive(Debug)]
pub struct LeaderDashboard {
    records: Rc<[LeaderRecord]>,
    group: String,
    filter: FilterState,
    bar_chart: BarChart,
    scatterplot: LeaderScatterplot,
    lexis: LexisChart,
    observers: ObserverRegistry,
}

impl LeaderDashboard {
    pub fn new(records: Vec<LeaderRecord>) -> ChartResult<Self> {
        Self::with_config(LeaderDashboardConfig::default(), records)
    }

    /// Builds all three views for `config.group` and renders them once.
    pub fn with_config(config: LeaderDashboardConfig, records: Vec<LeaderRecord>) -> ChartResult<Self> {
        let records: Rc<[LeaderRecord]> = records.into();
        let (slice, with_gdp) = slice_group(&records, &config.group);
        let filter = FilterState::new();

        let mut bar_chart = BarChart::new(config.bar_chart, Rc::clone(&slice))?;
        let mut scatterplot = LeaderScatterplot::new(config.scatterplot, with_gdp)?;
        let mut lexis = LexisChart::new(config.lexis, slice)?;
        bar_chart.refresh(&filter);
        scatterplot.refresh(&filter);
        lexis.refresh(&filter);

        debug!(
            records = records.len(),
            group = %config.group,
            visible = bar_chart.data().len(),
            "leader dashboard ready"
        );
        Ok(Self {
            records,
            group: config.group,
            filter,
            bar_chart,
            scatterplot,
            lexis,
            observers: ObserverRegistry::default(),
        })
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn records(&self) -> &[LeaderRecord] {
        &self.records
    }

    #[must_use]
    pub fn bar_chart(&self) -> &BarChart {
        &self.bar_chart
    }

    #[must_use]
    pub fn scatterplot(&self) -> &LeaderScatterplot {
        &self.scatterplot
    }

    #[must_use]
    pub fn lexis(&self) -> &LexisChart {
        &self.lexis
    }

    pub fn register_observer(&mut self, observer: Box<dyn DashboardObserver>) -> ChartResult<()> {
        self.observers.register(observer)?;
        let event = DashboardEvent::DataLoaded {
            records: self.records.len(),
        };
        self.observers.emit(&event, &self.filter);
        Ok(())
    }

    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.unregister(observer_id)
    }

    fn chart_mut(&mut self, view: ViewId) -> Option<&mut dyn Chart<Datum = LeaderRecord>> {
        match view {
            ViewId::BarChart => Some(&mut self.bar_chart),
            ViewId::Scatterplot => Some(&mut self.scatterplot),
            ViewId::Lexis => Some(&mut self.lexis),
            ViewId::Trials | ViewId::Timeline => None,
        }
    }

    fn chart(&self, view: ViewId) -> Option<&dyn Chart<Datum = LeaderRecord>> {
        match view {
            ViewId::BarChart => Some(&self.bar_chart),
            ViewId::Scatterplot => Some(&self.scatterplot),
            ViewId::Lexis => Some(&self.lexis),
            ViewId::Trials | ViewId::Timeline => None,
        }
    }

    #[must_use]
    pub fn frame(&self, view: ViewId) -> Option<&RenderFrame> {
        self.chart(view).map(|chart| chart.frame())
    }

    /// Frames of all three views in page order.
    #[must_use]
    pub fn frames(&self) -> Vec<(ViewId, &RenderFrame)> {
        VIEWS
            .iter()
            .filter_map(|view| self.frame(*view).map(|frame| (*view, frame)))
            .collect()
    }

    /// Switches the record group. The gender filter resets; the point
    /// selection is kept.
    pub fn select_group(&mut self, group: &str) -> InvalidationPlan {
        let (slice, with_gdp) = slice_group(&self.records, group);
        if slice.is_empty() {
            warn!(group, "group has no leaders with a positive tenure");
        }
        self.group = group.to_owned();
        self.filter.apply(&FilterIntent::ResetGender);

        self.bar_chart.set_data(Rc::clone(&slice));
        self.scatterplot.set_data(with_gdp);
        self.lexis.set_data(slice);
        self.observers.emit(
            &DashboardEvent::GroupSelected {
                group: self.group.clone(),
                records: self.bar_chart.data().len(),
            },
            &self.filter,
        );

        let plan = InvalidationPlan::uniform(&VIEWS, InvalidationLevel::Full);
        self.run(&plan);
        plan
    }

    /// Applies a filter change and refreshes the views that consume it.
    pub fn apply(&mut self, intent: FilterIntent) -> InvalidationPlan {
        let changed = self.filter.apply(&intent);
        self.observers.emit(
            &DashboardEvent::IntentApplied {
                intent: intent.clone(),
                changed,
            },
            &self.filter,
        );
        if !changed {
            return InvalidationPlan::none();
        }

        let plan = plan_for(intent.topic());
        self.run(&plan);
        plan
    }

    /// Routes a click on `view` to the chart and applies the resulting intent.
    pub fn click(&mut self, view: ViewId, x: f64, y: f64) -> InvalidationPlan {
        let intent = self
            .chart(view)
            .and_then(|chart| chart.click(x, y, &self.filter));
        match intent {
            Some(intent) => self.apply(intent),
            None => InvalidationPlan::none(),
        }
    }

    pub fn hover(&mut self, view: ViewId, x: f64, y: f64) -> Option<Tooltip> {
        let filter = self.filter.clone();
        self.chart_mut(view)?.hover(x, y, &filter)
    }

    pub fn leave(&mut self, view: ViewId) -> bool {
        let filter = self.filter.clone();
        self.chart_mut(view)
            .is_some_and(|chart| chart.leave(&filter))
    }

    pub fn render_with<R: Renderer>(&self, view: ViewId, renderer: &mut R) -> ChartResult<()> {
        let frame = self.frame(view).ok_or_else(|| {
            ChartError::InvalidData(format!("view `{}` is not part of the leader dashboard", view.as_str()))
        })?;
        renderer.render(frame)
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            group: Some(self.group.clone()),
            filter: self.filter.clone(),
            views: self
                .frames()
                .into_iter()
                .map(|(view, frame)| ViewSnapshot {
                    view,
                    frame: frame.clone(),
                })
                .collect(),
        }
    }

    fn run(&mut self, plan: &InvalidationPlan) {
        let filter = self.filter.clone();
        for (view, level) in plan.views() {
            let Some(chart) = self.chart_mut(view) else {
                continue;
            };
            let Some(diff) = refresh_chart(chart, level, &filter) else {
                continue;
            };
            self.observers.emit(
                &DashboardEvent::Rendered {
                    view,
                    entered: diff.entered.len(),
                    updated: diff.updated.len(),
                    exited: diff.exited.len(),
                },
                &filter,
            );
        }
    }
}

/// Refresh work for a filter change, per consuming view.
#[must_use]
pub fn plan_for(topic: FilterTopic) -> InvalidationPlan {
    match topic {
        FilterTopic::Gender => InvalidationPlan::none()
            .with(ViewId::Scatterplot, InvalidationLevel::Full)
            .with(ViewId::Lexis, InvalidationLevel::Full)
            .with(ViewId::BarChart, InvalidationLevel::Render),
        FilterTopic::Selection => InvalidationPlan::none()
            .with(ViewId::Scatterplot, InvalidationLevel::Render)
            .with(ViewId::Lexis, InvalidationLevel::Render),
        FilterTopic::Category => InvalidationPlan::none(),
    }
}

/// Group members with a positive tenure, and the subset that has GDP data.
fn slice_group(records: &[LeaderRecord], group: &str) -> (Rc<[LeaderRecord]>, Rc<[LeaderRecord]>) {
    let slice: Vec<LeaderRecord> = records
        .iter()
        .filter(|record| record.is_member_of(group) && record.duration > 0.0)
        .cloned()
        .collect();
    let with_gdp: Vec<LeaderRecord> = slice
        .iter()
        .filter(|record| record.pcgdp.is_some())
        .cloned()
        .collect();
    (slice.into(), with_gdp.into())
}
