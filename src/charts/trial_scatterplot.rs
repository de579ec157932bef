use std::rc::Rc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LinearScale, Margin, SlotScale, extent, format_fixed, mean, rollup};
use crate::data::TrialRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, MarkState};
use crate::interaction::Tooltip;
use crate::render::{Color, Mark, MarkDiff, MarkKey, MarkShape, MarkStyle, RenderFrame, TextAnchor, TextPrimitive};

use super::{Axis, AxisOrient, Chart, ChartConfig, Decorations, LABEL_FONT_SIZE_PX, Surface, TickFormat};

const SLOT_OFFSET: f64 = 40.0;
const SLOT_UPPER_BOUND: f64 = 240.0;
const X_TICKS: usize = 6;
const POINT_RADIUS: f64 = 8.0;
const POINT_FILL: Color = Color::rgb8(0x1e, 0x65, 0x95);
const POINT_OPACITY: f64 = 0.3;
const TRIAL_LABEL_COLOR: Color = Color::rgb8(0x66, 0x66, 0x66);
const TITLE_COLOR: Color = Color::rgb8(0x44, 0x44, 0x44);

/// Mean accuracy of one trial over the visible records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialMean {
    pub trial: f64,
    pub mean: f64,
}

/// Accuracy per trial, one row per trial number.
///
/// Trial rows are fixed at construction: sorted distinct trial numbers
/// spaced evenly between `40` and `240` pixels. Legend-filtered records are
/// removed from the plot rather than dimmed.
#[derive(Debug, Clone)]
pub struct TrialScatterplot {
    surface: Surface,
    data: Rc<[TrialRecord]>,
    slots: SlotScale<OrderedFloat<f64>>,
    x_scale: LinearScale,
    x_axis: Axis,
    static_layer: Decorations,
    dynamic_layer: Decorations,
    visible: Vec<usize>,
    means: Vec<TrialMean>,
}

impl TrialScatterplot {
    #[must_use]
    pub fn default_config() -> ChartConfig {
        ChartConfig::new("#vis", 500, 250, Margin::new(20.0, 40.0, 20.0, 40.0))
    }

    pub fn new(config: ChartConfig, data: Rc<[TrialRecord]>) -> ChartResult<Self> {
        let surface = Surface::new(config)?;
        let plot = surface.plot();

        let slots = SlotScale::new(trial_domain(&data), SLOT_OFFSET, SLOT_UPPER_BOUND);
        let x_scale = LinearScale::new(0.0, plot.width);
        let (axis_x, axis_y) = plot.to_surface(0.0, plot.height);
        let x_axis = Axis::new(AxisOrient::Bottom)
            .with_tick_size(-(plot.height - 15.0))
            .with_tick_padding(4.0)
            .with_origin(axis_x, axis_y)
            .without_domain();

        let mut static_layer = Decorations::default();
        for (trial, y) in slots.domain().iter().zip(slots.positions()) {
            let (lx, ly) = plot.to_surface(-5.0, y + 2.0);
            static_layer.push_text(
                TextPrimitive::new(
                    format!("Trial {}", trial.0),
                    lx,
                    ly,
                    LABEL_FONT_SIZE_PX,
                    TRIAL_LABEL_COLOR,
                    TextAnchor::End,
                )
                .with_class("trial"),
            );
        }
        static_layer.push_text(
            TextPrimitive::new(
                "Accuracy (mean)",
                plot.width - 40.0,
                20.0,
                LABEL_FONT_SIZE_PX,
                TITLE_COLOR,
                TextAnchor::Start,
            )
            .with_class("title"),
        );

        debug!(trials = slots.domain().len(), records = data.len(), "trial scatterplot constructed");
        Ok(Self {
            surface,
            data,
            slots,
            x_scale,
            x_axis,
            static_layer,
            dynamic_layer: Decorations::default(),
            visible: Vec::new(),
            means: Vec::new(),
        })
    }

    /// Trial numbers in row order.
    pub fn trial_domain(&self) -> impl Iterator<Item = f64> + '_ {
        self.slots.domain().iter().map(|trial| trial.0)
    }

    #[must_use]
    pub fn slot_position(&self, trial: f64) -> Option<f64> {
        self.slots.map(&OrderedFloat(trial))
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    /// Per-trial means from the last [`Chart::update_vis`], in row order.
    #[must_use]
    pub fn means(&self) -> &[TrialMean] {
        &self.means
    }
}

fn trial_domain(data: &[TrialRecord]) -> Vec<OrderedFloat<f64>> {
    let mut trials: Vec<OrderedFloat<f64>> = data
        .iter()
        .map(|record| record.trial)
        .filter(|trial| trial.is_finite())
        .map(OrderedFloat)
        .collect();
    trials.sort_unstable();
    trials.dedup();
    trials
}

impl Chart for TrialScatterplot {
    type Datum = TrialRecord;

    fn name(&self) -> &'static str {
        "trial_scatterplot"
    }

    fn config(&self) -> &ChartConfig {
        self.surface.config()
    }

    fn data(&self) -> &[TrialRecord] {
        &self.data
    }

    fn set_data(&mut self, data: Rc<[TrialRecord]>) {
        self.data = data;
    }

    fn update_vis(&mut self, filter: &FilterState) {
        self.visible = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.accepts(*record))
            .map(|(index, _)| index)
            .collect();
        let visible: Vec<&TrialRecord> = self.visible.iter().map(|&index| &self.data[index]).collect();

        if let Some((lo, hi)) = extent(&visible, |record| record.accuracy) {
            self.x_scale.set_domain(lo, hi);
            self.x_scale.nice(10);
        }

        let by_trial = rollup(
            &visible,
            |record| OrderedFloat(record.trial),
            |members: &[&&TrialRecord]| mean(members, |record| record.accuracy),
        );
        self.means = self
            .slots
            .domain()
            .iter()
            .filter_map(|trial| {
                by_trial
                    .get(trial)
                    .copied()
                    .flatten()
                    .map(|mean| TrialMean { trial: trial.0, mean })
            })
            .collect();

        let plot = self.surface.plot();
        self.x_axis.bind_linear(self.x_scale, X_TICKS, TickFormat::Fixed(1));
        self.dynamic_layer.clear();
        self.dynamic_layer.push_axis(&self.x_axis);
        for entry in &self.means {
            let Some(y) = self.slots.map(&OrderedFloat(entry.trial)) else {
                continue;
            };
            let (lx, ly) = plot.to_surface(plot.width + 40.0, y + 3.0);
            self.dynamic_layer.push_text(
                TextPrimitive::new(
                    format_fixed(entry.mean, 2),
                    lx,
                    ly,
                    LABEL_FONT_SIZE_PX,
                    TITLE_COLOR,
                    TextAnchor::End,
                )
                .with_class("mean"),
            );
        }
    }

    fn render_vis(&mut self, _filter: &FilterState) -> MarkDiff {
        let plot = self.surface.plot();
        let mut frame = self.surface.begin(&[&self.static_layer, &self.dynamic_layer]);
        frame.marks = self
            .visible
            .iter()
            .map(|&index| {
                let record = &self.data[index];
                let y = self.slots.map(&OrderedFloat(record.trial)).unwrap_or(f64::NAN);
                let (cx, cy) = plot.to_surface(self.x_scale.map(record.accuracy), y);
                Mark::new(
                    MarkKey::Index(index),
                    MarkState::Active,
                    MarkShape::Circle {
                        cx,
                        cy,
                        r: POINT_RADIUS,
                    },
                    MarkStyle::filled(POINT_FILL, POINT_OPACITY),
                )
            })
            .collect();
        self.surface.commit(self.name(), frame)
    }

    fn frame(&self) -> &RenderFrame {
        self.surface.frame()
    }

    fn hover(&mut self, x: f64, y: f64, _filter: &FilterState) -> Option<Tooltip> {
        let hovered = self.surface.interactive_hit(x, y);
        let tooltip = match &hovered {
            Some(MarkKey::Index(index)) => self.data.get(*index).map(|record| {
                self.surface
                    .tooltip_at(x, y, format!("Trial {}", record.trial))
                    .with_line(format!("Accuracy: {}", format_fixed(record.accuracy, 2)))
            }),
            _ => None,
        };
        self.surface.track(x, y, hovered, tooltip.clone());
        tooltip
    }

    fn leave(&mut self, _filter: &FilterState) -> bool {
        self.surface.untrack()
    }

    fn click(&self, _x: f64, _y: f64, _filter: &FilterState) -> Option<FilterIntent> {
        None
    }
}
