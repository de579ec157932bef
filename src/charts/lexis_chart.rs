use std::rc::Rc;

use crate::core::{LinearScale, Margin};
use crate::data::LeaderRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, MarkState, classify};
use crate::interaction::Tooltip;
use crate::render::{Color, Mark, MarkDiff, MarkShape, MarkStyle, RenderFrame};

use super::leader_scatterplot::{find_leader, leader_key};
use super::{Axis, AxisOrient, Chart, ChartConfig, Decorations, Surface, TickFormat, leader_tooltip};

const YEAR_DOMAIN: (f64, f64) = (1950.0, 2021.0);
const AGE_DOMAIN: (f64, f64) = (25.0, 95.0);
const TICKS: usize = 6;
const SELECTED_STROKE: Color = Color::rgb8(0xff, 0xa5, 0x00);
const HIGHLIGHT_STROKE: Color = Color::rgb8(0x99, 0x99, 0x99);
const PLAIN_STROKE: Color = Color::rgb8(0xdd, 0xdd, 0xdd);
const INACTIVE_OPACITY: f64 = 0.15;

/// Lexis diagram: one arrow per tenure, from (start year, start age) to
/// (end year, end age).
#[derive(Debug, Clone)]
pub struct LexisChart {
    surface: Surface,
    data: Rc<[LeaderRecord]>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    axis_layer: Decorations,
}

impl LexisChart {
    #[must_use]
    pub fn default_config() -> ChartConfig {
        ChartConfig::new("#vis-lexis", 1000, 380, Margin::new(15.0, 15.0, 20.0, 25.0))
            .with_tooltip_padding(15.0)
    }

    pub fn new(config: ChartConfig, data: Rc<[LeaderRecord]>) -> ChartResult<Self> {
        let surface = Surface::new(config)?;
        let plot = surface.plot();
        let x_scale = LinearScale::new(0.0, plot.width).with_domain(YEAR_DOMAIN.0, YEAR_DOMAIN.1);
        let y_scale = LinearScale::new(plot.height, 0.0).with_domain(AGE_DOMAIN.0, AGE_DOMAIN.1);

        let (bx, by) = plot.to_surface(0.0, plot.height);
        let (lx, ly) = plot.to_surface(0.0, 0.0);
        let mut x_axis = Axis::new(AxisOrient::Bottom)
            .with_tick_size(-plot.height - 10.0)
            .with_origin(bx, by)
            .without_domain();
        x_axis.bind_linear(x_scale, TICKS, TickFormat::Default);
        let mut y_axis = Axis::new(AxisOrient::Left)
            .with_tick_size(-plot.width - 10.0)
            .with_origin(lx, ly)
            .without_domain();
        y_axis.bind_linear(y_scale, TICKS, TickFormat::Default);

        let mut axis_layer = Decorations::default();
        axis_layer.push_axis(&x_axis);
        axis_layer.push_axis(&y_axis);

        Ok(Self {
            surface,
            data,
            x_scale,
            y_scale,
            axis_layer,
        })
    }

    fn style_for(record: &LeaderRecord, state: MarkState, hovered: bool) -> MarkStyle {
        match state {
            MarkState::Selected => MarkStyle::stroked(SELECTED_STROKE, 4.0),
            MarkState::Active if hovered => MarkStyle::stroked(HIGHLIGHT_STROKE, 3.0),
            MarkState::Active if record.is_highlighted() => MarkStyle::stroked(HIGHLIGHT_STROKE, 4.0),
            MarkState::Active => MarkStyle::stroked(PLAIN_STROKE, 1.0),
            MarkState::Inactive => MarkStyle::stroked(PLAIN_STROKE, 1.0).with_opacity(INACTIVE_OPACITY),
        }
    }
}

impl Chart for LexisChart {
    type Datum = LeaderRecord;

    fn name(&self) -> &'static str {
        "lexis_chart"
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

    /// Both domains are fixed; nothing is derived from the data slice.
    fn update_vis(&mut self, _filter: &FilterState) {}

    fn render_vis(&mut self, filter: &FilterState) -> MarkDiff {
        let plot = self.surface.plot();
        let hovered = self.surface.hovered();
        let mut frame = self.surface.begin(&[&self.axis_layer]);
        frame.marks = self
            .data
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let key = leader_key(index, record);
                let state = classify(record, filter);
                let style = Self::style_for(record, state, hovered == Some(&key));
                let (x1, y1) = plot.to_surface(
                    self.x_scale.map(record.start_year),
                    self.y_scale.map(record.start_age),
                );
                let (x2, y2) = plot.to_surface(
                    self.x_scale.map(record.end_year),
                    self.y_scale.map(record.end_age),
                );
                Mark::new(key, state, MarkShape::Arrow { x1, y1, x2, y2 }, style)
            })
            .collect();
        self.surface.commit(self.name(), frame)
    }

    fn frame(&self) -> &RenderFrame {
        self.surface.frame()
    }

    fn hover(&mut self, x: f64, y: f64, filter: &FilterState) -> Option<Tooltip> {
        let hovered = self.surface.interactive_hit(x, y);
        let padding = self.surface.config().tooltip_padding;
        let tooltip = hovered
            .as_ref()
            .and_then(|key| find_leader(&self.data, key))
            .map(|record| leader_tooltip(record, x, y, padding));
        if self.surface.track(x, y, hovered, tooltip.clone()) {
            self.render_vis(filter);
        }
        tooltip
    }

    fn leave(&mut self, filter: &FilterState) -> bool {
        let ended = self.surface.untrack();
        if ended {
            self.render_vis(filter);
        }
        ended
    }

    fn click(&self, x: f64, y: f64, _filter: &FilterState) -> Option<FilterIntent> {
        let key = self.surface.interactive_hit(x, y)?;
        find_leader(&self.data, &key)?
            .id
            .map(FilterIntent::ToggleSelection)
    }
}
