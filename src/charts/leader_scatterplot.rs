use std::rc::Rc;

use crate::core::{LinearScale, Margin, format_integer, max};
use crate::data::LeaderRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, MarkState, classify};
use crate::interaction::Tooltip;
use crate::render::{
    Color, Mark, MarkDiff, MarkKey, MarkShape, MarkStyle, RenderFrame, TextAnchor, TextPrimitive,
};

use super::{Axis, AxisOrient, Chart, ChartConfig, Decorations, LABEL_FONT_SIZE_PX, Surface, TickFormat};

const AGE_DOMAIN: (f64, f64) = (25.0, 95.0);
const TICKS: usize = 6;
const POINT_RADIUS: f64 = 5.0;
const SELECTED_FILL: Color = Color::rgb8(0xff, 0xa5, 0x00);
const POINT_FILL: Color = Color::rgb8(0x33, 0x33, 0x55);
const HOVER_FILL: Color = Color::rgb8(0x22, 0x22, 0x22);
const HOVER_STROKE: Color = Color::BLACK;
const TITLE_COLOR: Color = Color::rgb8(0x33, 0x33, 0x33);

/// Stable mark key of a leader: its id, or its slice position without one.
pub(crate) fn leader_key(index: usize, record: &LeaderRecord) -> MarkKey {
    record.id.map_or(MarkKey::Index(index), MarkKey::Id)
}

pub(crate) fn find_leader<'a>(data: &'a [LeaderRecord], key: &MarkKey) -> Option<&'a LeaderRecord> {
    match key {
        MarkKey::Id(id) => data.iter().find(|record| record.id == Some(*id)),
        MarkKey::Index(index) => data.get(*index),
        MarkKey::Category(_) => None,
    }
}

/// Tooltip shared by the scatterplot and the lexis chart.
#[must_use]
pub fn leader_tooltip(record: &LeaderRecord, x: f64, y: f64, padding: f64) -> Tooltip {
    let years = if record.duration > 1.0 { "years" } else { "year" };
    let gdp = record
        .pcgdp
        .map_or_else(|| "Not Available".to_owned(), format_integer);
    Tooltip::at(x, y, padding, record.leader.clone())
        .with_subtitle(format!(
            "{}, {} - {}",
            record.country, record.start_year, record.end_year
        ))
        .with_line(format!("Age at inauguration: {}", record.start_age))
        .with_line(format!("Time in office: {} {years}", record.duration))
        .with_line(format!("GDP/Capita: {gdp}"))
}

/// GDP per capita against age at inauguration.
///
/// Filtered-out leaders stay visible but faint and ignore the pointer;
/// clicking any other point toggles its selection.
#[derive(Debug, Clone)]
pub struct LeaderScatterplot {
    surface: Surface,
    data: Rc<[LeaderRecord]>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    title_layer: Decorations,
    axis_layer: Decorations,
}

impl LeaderScatterplot {
    #[must_use]
    pub fn default_config() -> ChartConfig {
        ChartConfig::new("#vis-scatter", 600, 400, Margin::new(25.0, 20.0, 20.0, 35.0))
            .with_tooltip_padding(15.0)
    }

    pub fn new(config: ChartConfig, data: Rc<[LeaderRecord]>) -> ChartResult<Self> {
        let surface = Surface::new(config)?;
        let plot = surface.plot();
        let (bx, by) = plot.to_surface(0.0, plot.height);
        let (lx, ly) = plot.to_surface(0.0, 0.0);

        let mut title_layer = Decorations::default();
        let (tx, ty) = plot.to_surface(plot.width + 10.0, plot.height - 15.0);
        title_layer.push_text(
            TextPrimitive::new(
                "GDP per Capita (USD)",
                tx,
                ty,
                LABEL_FONT_SIZE_PX,
                TITLE_COLOR,
                TextAnchor::End,
            )
            .with_dy_em(0.71)
            .with_class("axis-title"),
        );
        title_layer.push_text(
            TextPrimitive::new("Age", 0.0, 0.0, LABEL_FONT_SIZE_PX, TITLE_COLOR, TextAnchor::Start)
                .with_dy_em(0.71)
                .with_class("axis-title"),
        );

        Ok(Self {
            x_scale: LinearScale::new(0.0, plot.width),
            y_scale: LinearScale::new(plot.height, 0.0).with_domain(AGE_DOMAIN.0, AGE_DOMAIN.1),
            x_axis: Axis::new(AxisOrient::Bottom)
                .with_tick_size(-plot.height - 10.0)
                .with_origin(bx, by)
                .without_domain(),
            y_axis: Axis::new(AxisOrient::Left)
                .with_tick_size(-plot.width - 10.0)
                .with_origin(lx, ly)
                .without_domain(),
            title_layer,
            axis_layer: Decorations::default(),
            surface,
            data,
        })
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    fn style_for(state: MarkState, hovered: bool) -> MarkStyle {
        match (state, hovered) {
            (MarkState::Selected, false) => MarkStyle::filled(SELECTED_FILL, 0.9),
            (MarkState::Selected, true) => {
                MarkStyle::filled(SELECTED_FILL, 0.9).with_stroke(HOVER_STROKE, 1.0)
            }
            (MarkState::Active, false) => MarkStyle::filled(POINT_FILL, 0.6),
            (MarkState::Active, true) => MarkStyle::filled(HOVER_FILL, 1.0).with_stroke(HOVER_STROKE, 1.0),
            (MarkState::Inactive, _) => MarkStyle::filled(POINT_FILL, 0.1),
        }
    }
}

impl Chart for LeaderScatterplot {
    type Datum = LeaderRecord;

    fn name(&self) -> &'static str {
        "leader_scatterplot"
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
        let records: Vec<&LeaderRecord> = self.data.iter().collect();
        let max_gdp = max(&records, |record| record.pcgdp.unwrap_or(f64::NAN)).unwrap_or(0.0);
        self.x_scale.set_domain(0.0, max_gdp);

        self.x_axis.bind_linear(self.x_scale, TICKS, TickFormat::Default);
        self.y_axis.bind_linear(self.y_scale, TICKS, TickFormat::Default);
        self.axis_layer.clear();
        self.axis_layer.push_axis(&self.x_axis);
        self.axis_layer.push_axis(&self.y_axis);
    }

    fn render_vis(&mut self, filter: &FilterState) -> MarkDiff {
        let plot = self.surface.plot();
        let hovered = self.surface.hovered();
        let mut frame = self.surface.begin(&[&self.axis_layer, &self.title_layer]);
        frame.marks = self
            .data
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let key = leader_key(index, record);
                let state = classify(record, filter);
                let style = Self::style_for(state, hovered == Some(&key));
                let (cx, cy) = plot.to_surface(
                    self.x_scale.map(record.pcgdp.unwrap_or(f64::NAN)),
                    self.y_scale.map(record.start_age),
                );
                Mark::new(key, state, MarkShape::Circle { cx, cy, r: POINT_RADIUS }, style)
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
