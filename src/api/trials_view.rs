use std::rc::Rc;

use tracing::debug;

use crate::charts::{Chart, ChartConfig, TrialScatterplot};
use crate::data::TrialRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, FilterTopic};
use crate::interaction::Tooltip;
use crate::render::{RenderFrame, Renderer};

use super::{
    DashboardEvent, DashboardObserver, DashboardSnapshot, InvalidationLevel, InvalidationPlan,
    ObserverRegistry, ViewId, ViewSnapshot, refresh_chart,
};

/// Controller of the trial-accuracy exercise: one scatterplot plus the
/// difficulty legend state.
#[derive(Debug)]
pub struct TrialsView {
    filter: FilterState,
    chart: TrialScatterplot,
    observers: ObserverRegistry,
}

impl TrialsView {
    pub fn new(records: Vec<TrialRecord>) -> ChartResult<Self> {
        Self::with_config(TrialScatterplot::default_config(), records)
    }

    /// Builds the chart and renders it once. Every difficulty found in the
    /// data starts out active.
    pub fn with_config(config: ChartConfig, records: Vec<TrialRecord>) -> ChartResult<Self> {
        let filter = FilterState::with_categories(
            records
                .iter()
                .filter_map(|record| record.difficulty.clone()),
        );
        let data: Rc<[TrialRecord]> = records.into();
        let mut chart = TrialScatterplot::new(config, data)?;
        chart.refresh(&filter);
        debug!(records = chart.data().len(), "trials view ready");
        Ok(Self {
            filter,
            chart,
            observers: ObserverRegistry::default(),
        })
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn chart(&self) -> &TrialScatterplot {
        &self.chart
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        self.chart.frame()
    }

    pub fn register_observer(&mut self, observer: Box<dyn DashboardObserver>) -> ChartResult<()> {
        self.observers.register(observer)?;
        let event = DashboardEvent::DataLoaded {
            records: self.chart.data().len(),
        };
        self.observers.emit(&event, &self.filter);
        Ok(())
    }

    /// Applies a filter change and refreshes the scatterplot when needed.
    pub fn apply(&mut self, intent: FilterIntent) -> InvalidationPlan {
        let changed = self.filter.apply(&intent);
        self.observers.emit(
            &DashboardEvent::IntentApplied {
                intent: intent.clone(),
                changed,
            },
            &self.filter,
        );
        if !changed || intent.topic() != FilterTopic::Category {
            return InvalidationPlan::none();
        }

        let plan = InvalidationPlan::none().with(ViewId::Trials, InvalidationLevel::Full);
        if let Some(diff) = refresh_chart(&mut self.chart, plan.level(ViewId::Trials), &self.filter) {
            self.observers.emit(
                &DashboardEvent::Rendered {
                    view: ViewId::Trials,
                    entered: diff.entered.len(),
                    updated: diff.updated.len(),
                    exited: diff.exited.len(),
                },
                &self.filter,
            );
        }
        plan
    }

    pub fn hover(&mut self, x: f64, y: f64) -> Option<Tooltip> {
        self.chart.hover(x, y, &self.filter)
    }

    pub fn leave(&mut self) -> bool {
        self.chart.leave(&self.filter)
    }

    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(self.chart.frame())
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            group: None,
            filter: self.filter.clone(),
            views: vec![ViewSnapshot {
                view: ViewId::Trials,
                frame: self.chart.frame().clone(),
            }],
        }
    }
}
