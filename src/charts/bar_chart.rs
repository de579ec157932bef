use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{BandScale, LinearScale, Margin, count_by};
use crate::data::LeaderRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, GenderFilter, MarkState};
use crate::interaction::Tooltip;
use crate::render::{Color, Mark, MarkDiff, MarkKey, MarkShape, MarkStyle, RenderFrame};

use super::{Axis, AxisOrient, Chart, ChartConfig, Decorations, Surface, TickFormat};

const PADDING_INNER: f64 = 0.2;
const Y_TICKS: usize = 6;
const SELECTED_FILL: Color = Color::rgb8(0xff, 0xa5, 0x00);
const BAR_FILL: Color = Color::rgb8(0x33, 0x33, 0x55);
const INACTIVE_OPACITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub gender: String,
    pub count: usize,
}

/// Leader count per gender. Clicking a bar toggles the gender filter.
#[derive(Debug, Clone)]
pub struct BarChart {
    surface: Surface,
    data: Rc<[LeaderRecord]>,
    x_scale: BandScale,
    y_scale: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    axis_layer: Decorations,
    counts: Vec<GenderCount>,
}

impl BarChart {
    #[must_use]
    pub fn default_config() -> ChartConfig {
        ChartConfig::new("#vis-bar", 250, 300, Margin::new(10.0, 5.0, 25.0, 30.0))
    }

    pub fn new(config: ChartConfig, data: Rc<[LeaderRecord]>) -> ChartResult<Self> {
        let surface = Surface::new(config)?;
        let plot = surface.plot();
        let (bx, by) = plot.to_surface(0.0, plot.height);
        let (lx, ly) = plot.to_surface(0.0, 0.0);

        Ok(Self {
            x_scale: BandScale::new(0.0, plot.width).with_padding_inner(PADDING_INNER),
            y_scale: LinearScale::new(plot.height, 0.0),
            x_axis: Axis::new(AxisOrient::Bottom)
                .with_tick_size_outer(0.0)
                .with_origin(bx, by),
            y_axis: Axis::new(AxisOrient::Left)
                .with_tick_size_outer(0.0)
                .with_origin(lx, ly),
            axis_layer: Decorations::default(),
            counts: Vec::new(),
            surface,
            data,
        })
    }

    /// Counts from the last [`Chart::update_vis`], in first-appearance order.
    #[must_use]
    pub fn counts(&self) -> &[GenderCount] {
        &self.counts
    }

    fn state_of(gender: &str, filter: &FilterState) -> MarkState {
        match filter.gender() {
            GenderFilter::Any => MarkState::Active,
            GenderFilter::Only(wanted) if wanted == gender => MarkState::Selected,
            GenderFilter::Only(_) => MarkState::Inactive,
        }
    }
}

impl Chart for BarChart {
    type Datum = LeaderRecord;

    fn name(&self) -> &'static str {
        "bar_chart"
    }

    fn config(&self) -> &ChartConfig {
        self.surface.config()
    }

    fn data(&self) -> &[LeaderRecord] {
        &self.data
    }

    fn set_data(&mut self, data: Rc<[LeaderRecord]>) {
        self.data = data;
    }

    fn update_vis(&mut self, _filter: &FilterState) {
        self.counts = count_by(&self.data, |record| record.gender.clone())
            .into_iter()
            .map(|(gender, count)| GenderCount { gender, count })
            .collect();

        let max_count = self.counts.iter().map(|entry| entry.count).max().unwrap_or(0);
        self.x_scale
            .set_domain(self.counts.iter().map(|entry| entry.gender.as_str()));
        self.y_scale.set_domain(0.0, max_count as f64);

        self.x_axis.bind_band(&self.x_scale);
        self.y_axis.bind_linear(self.y_scale, Y_TICKS, TickFormat::Default);
        self.axis_layer.clear();
        self.axis_layer.push_axis(&self.x_axis);
        self.axis_layer.push_axis(&self.y_axis);
    }

    fn render_vis(&mut self, filter: &FilterState) -> MarkDiff {
        let plot = self.surface.plot();
        let mut frame = self.surface.begin(&[&self.axis_layer]);
        frame.marks = self
            .counts
            .iter()
            .map(|entry| {
                let x = self.x_scale.map(&entry.gender).unwrap_or(f64::NAN);
                let y = self.y_scale.map(entry.count as f64);
                let state = Self::state_of(&entry.gender, filter);
                let style = match state {
                    MarkState::Selected => MarkStyle::filled(SELECTED_FILL, 1.0),
                    MarkState::Active => MarkStyle::filled(BAR_FILL, 1.0),
                    MarkState::Inactive => MarkStyle::filled(BAR_FILL, 1.0).with_opacity(INACTIVE_OPACITY),
                };
                Mark::new(
                    MarkKey::Category(entry.gender.clone()),
                    state,
                    MarkShape::Rect {
                        x: plot.left + x,
                        y: plot.top + y,
                        width: self.x_scale.bandwidth(),
                        height: plot.height - y,
                    },
                    style,
                )
            })
            .collect();
        self.surface.commit(self.name(), frame)
    }

    fn frame(&self) -> &RenderFrame {
        self.surface.frame()
    }

    fn hover(&mut self, x: f64, y: f64, _filter: &FilterState) -> Option<Tooltip> {
        let hovered = self.frame().hit_test(x, y).map(|mark| mark.key.clone());
        let tooltip = match &hovered {
            Some(MarkKey::Category(gender)) => self
                .counts
                .iter()
                .find(|entry| &entry.gender == gender)
                .map(|entry| {
                    self.surface
                        .tooltip_at(x, y, entry.gender.clone())
                        .with_line(format!("{} leaders", entry.count))
                }),
            _ => None,
        };
        self.surface.track(x, y, hovered, tooltip.clone());
        tooltip
    }

    fn leave(&mut self, _filter: &FilterState) -> bool {
        self.surface.untrack()
    }

    fn click(&self, x: f64, y: f64, _filter: &FilterState) -> Option<FilterIntent> {
        match self.hit_test(x, y) {
            Some(MarkKey::Category(gender)) => Some(FilterIntent::ToggleGender(gender.clone())),
            _ => None,
        }
    }
}
