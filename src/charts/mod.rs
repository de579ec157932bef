//! Chart components.
//!
//! Every chart follows the same three-phase contract: construction performs
//! the one-time setup (inner size, scales, static decorations),
//! [`Chart::update_vis`] recomputes aggregates and scale domains from the
//! bound data slice, and [`Chart::render_vis`] rebuilds the mark list and
//! reconciles it against the previous frame.

mod axis;
mod bar_chart;
mod config;
mod leader_scatterplot;
mod legend;
mod lexis_chart;
mod timeline;
mod trial_scatterplot;

use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::PlotArea;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, MarkState};
use crate::interaction::{PointerState, Tooltip};
use crate::render::{LinePrimitive, MarkDiff, MarkKey, RenderFrame, TextPrimitive, reconcile};

pub use axis::{Axis, AxisOrient, AxisTick, TickFormat};
pub use bar_chart::{BarChart, GenderCount};
pub use config::{ChartConfig, ChartConfigOverrides};
pub use leader_scatterplot::{LeaderScatterplot, leader_tooltip};
pub use legend::{Legend, LegendEntry};
pub use lexis_chart::LexisChart;
pub use timeline::{DISASTER_CATEGORIES, DisasterTimeline, MONTH_LABELS, TimelineOptions, YearGroup};
pub use trial_scatterplot::{TrialMean, TrialScatterplot};

/// Default size for free-standing chart text (titles, data labels).
pub(crate) const LABEL_FONT_SIZE_PX: f64 = 12.0;

/// Shared contract of all chart components.
pub trait Chart {
    type Datum;

    /// Short identifier used in logs and snapshots.
    fn name(&self) -> &'static str;

    fn config(&self) -> &ChartConfig;

    /// The currently bound data slice.
    fn data(&self) -> &[Self::Datum];

    /// Rebinds the data slice. Static setup is left untouched; callers follow
    /// up with [`Chart::update_vis`].
    fn set_data(&mut self, data: Rc<[Self::Datum]>);

    /// Recomputes derived aggregates and scale domains. Safe to call
    /// repeatedly.
    fn update_vis(&mut self, filter: &FilterState);

    /// Rebuilds the mark list for `filter` and diffs it against the previous
    /// frame.
    fn render_vis(&mut self, filter: &FilterState) -> MarkDiff;

    /// The most recently rendered frame.
    fn frame(&self) -> &RenderFrame;

    /// Pointer moved to `(x, y)` in surface coordinates.
    fn hover(&mut self, x: f64, y: f64, filter: &FilterState) -> Option<Tooltip>;

    /// Pointer left the drawing surface. Returns `true` when a hover ended.
    fn leave(&mut self, filter: &FilterState) -> bool;

    /// Translates a click into a filter change, if the clicked mark has one.
    fn click(&self, x: f64, y: f64, filter: &FilterState) -> Option<FilterIntent>;

    /// Key of the topmost mark under `(x, y)`.
    fn hit_test(&self, x: f64, y: f64) -> Option<&MarkKey> {
        self.frame().hit_test(x, y).map(|mark| &mark.key)
    }

    /// Binds new data and recomputes everything derived from it.
    fn prepare(&mut self, data: Rc<[Self::Datum]>, filter: &FilterState) {
        self.set_data(data);
        self.update_vis(filter);
    }

    fn refresh(&mut self, filter: &FilterState) -> MarkDiff {
        self.update_vis(filter);
        self.render_vis(filter)
    }
}

/// Axis lines and text that are rebuilt only when scales change.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Decorations {
    lines: Vec<LinePrimitive>,
    texts: Vec<TextPrimitive>,
}

impl Decorations {
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        self.texts.clear();
    }

    pub(crate) fn push_axis(&mut self, axis: &Axis) {
        axis.draw(&mut self.lines, &mut self.texts);
    }

    pub(crate) fn push_text(&mut self, text: TextPrimitive) {
        if text.text.is_empty() || !text.x.is_finite() || !text.y.is_finite() {
            trace!(text = %text.text, "skipping label without text or a finite position");
            return;
        }
        self.texts.push(text);
    }

    fn extend_into(&self, frame: &mut RenderFrame) {
        frame.lines.extend_from_slice(&self.lines);
        frame.texts.extend(self.texts.iter().cloned());
    }
}

/// Per-instance drawing surface: resolved config, inner plot rectangle, the
/// last committed frame and pointer state.
#[derive(Debug, Clone)]
pub(crate) struct Surface {
    config: ChartConfig,
    plot: PlotArea,
    frame: RenderFrame,
    pointer: PointerState,
}

impl Surface {
    pub(crate) fn new(config: ChartConfig) -> ChartResult<Self> {
        let plot = config.plot_area()?;
        Ok(Self {
            frame: RenderFrame::new(config.viewport()),
            config,
            plot,
            pointer: PointerState::default(),
        })
    }

    pub(crate) fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub(crate) fn plot(&self) -> PlotArea {
        self.plot
    }

    pub(crate) fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub(crate) fn hovered(&self) -> Option<&MarkKey> {
        self.pointer.hovered()
    }

    /// Fresh frame carrying the given decoration layers.
    pub(crate) fn begin(&self, layers: &[&Decorations]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.config.viewport());
        for layer in layers {
            layer.extend_into(&mut frame);
        }
        frame
    }

    /// Replaces the current frame, returning the enter/update/exit diff.
    pub(crate) fn commit(&mut self, chart: &'static str, frame: RenderFrame) -> MarkDiff {
        let diff = reconcile(&self.frame.marks, &frame.marks);
        debug!(
            chart,
            marks = frame.marks.len(),
            entered = diff.entered.len(),
            updated = diff.updated.len(),
            exited = diff.exited.len(),
            "render_vis"
        );
        self.frame = frame;
        diff
    }

    /// Key of the topmost non-inactive mark under the pointer.
    pub(crate) fn interactive_hit(&self, x: f64, y: f64) -> Option<MarkKey> {
        self.frame
            .hit_test(x, y)
            .filter(|mark| mark.state != MarkState::Inactive)
            .map(|mark| mark.key.clone())
    }

    /// Records a pointer move; `true` when the hovered key changed.
    pub(crate) fn track(
        &mut self,
        x: f64,
        y: f64,
        hovered: Option<MarkKey>,
        tooltip: Option<Tooltip>,
    ) -> bool {
        self.pointer.on_pointer_move(x, y, hovered, tooltip)
    }

    pub(crate) fn untrack(&mut self) -> bool {
        self.pointer.on_pointer_leave()
    }

    pub(crate) fn tooltip_at(&self, x: f64, y: f64, title: impl Into<String>) -> Tooltip {
        Tooltip::at(x, y, self.config.tooltip_padding, title)
    }
}
