use std::rc::Rc;

use tracing::debug;

use crate::charts::{Chart, ChartConfig, DisasterTimeline, TimelineOptions};
use crate::data::DisasterRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, FilterTopic};
use crate::interaction::Tooltip;
use crate::render::{RenderFrame, Renderer};

use super::{
    DashboardEvent, DashboardObserver, DashboardSnapshot, InvalidationLevel, InvalidationPlan,
    ObserverRegistry, ViewId, ViewSnapshot, refresh_chart,
};

/// Controller of the disaster timeline and its category legend.
#[derive(Debug)]
pub struct DisasterTimelineView {
    filter: FilterState,
    chart: DisasterTimeline,
    observers: ObserverRegistry,
}

impl DisasterTimelineView {
    pub fn new(records: Vec<DisasterRecord>) -> ChartResult<Self> {
        Self::with_config(
            DisasterTimeline::default_config(),
            records,
            TimelineOptions::default(),
        )
    }

    /// Builds the timeline with every legend category active and renders it
    /// once.
    pub fn with_config(
        config: ChartConfig,
        records: Vec<DisasterRecord>,
        options: TimelineOptions,
    ) -> ChartResult<Self> {
        let filter = FilterState::with_categories(options.categories.iter().cloned());
        let data: Rc<[DisasterRecord]> = records.into();
        let mut chart = DisasterTimeline::with_options(config, data, options)?;
        chart.refresh(&filter);
        debug!(records = chart.data().len(), "timeline view ready");
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
    pub fn chart(&self) -> &DisasterTimeline {
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

        let plan = InvalidationPlan::none().with(ViewId::Timeline, InvalidationLevel::Full);
        if let Some(diff) = refresh_chart(&mut self.chart, plan.level(ViewId::Timeline), &self.filter) {
            self.observers.emit(
                &DashboardEvent::Rendered {
                    view: ViewId::Timeline,
                    entered: diff.entered.len(),
                    updated: diff.updated.len(),
                    exited: diff.exited.len(),
                },
                &self.filter,
            );
        }
        plan
    }

    /// Legend clicks toggle a category; other clicks change nothing.
    pub fn click(&mut self, x: f64, y: f64) -> InvalidationPlan {
        match self.chart.click(x, y, &self.filter) {
            Some(intent) => self.apply(intent),
            None => InvalidationPlan::none(),
        }
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
                view: ViewId::Timeline,
                frame: self.chart.frame().clone(),
            }],
        }
    }
}
