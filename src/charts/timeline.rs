//! Calendar timeline of billion-dollar disasters.
//!
//! One row per year (1980 at the bottom, 2017 at the top); each disaster is
//! an upper half disc at its day of year, sized by cost on a square-root
//! scale. The costliest event of every year is labelled under its row.

use std::rc::Rc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BandScale, LinearScale, Margin, OrdinalScale, SqrtScale, extent, group_by, max, max_by_first};
use crate::data::DisasterRecord;
use crate::error::ChartResult;
use crate::filter::{FilterIntent, FilterState, MarkState, classify};
use crate::interaction::Tooltip;
use crate::render::{
    ClipRect, Color, Mark, MarkDiff, MarkKey, MarkShape, MarkStyle, RenderFrame, TextAnchor,
    TextPrimitive,
};

use super::{
    Axis, AxisOrient, Chart, ChartConfig, Decorations, LABEL_FONT_SIZE_PX, Legend, LegendEntry,
    Surface, TickFormat,
};

pub const DISASTER_CATEGORIES: [&str; 5] = [
    "winter-storm-freeze",
    "flooding",
    "severe-storm",
    "drought-wildfire",
    "tropical-cyclone",
];

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const CATEGORY_COLORS: [Color; 5] = [
    Color::rgb8(0xcc, 0xcc, 0xcc),
    Color::rgb8(0x41, 0xb6, 0xc4),
    Color::rgb8(0xc7, 0xe9, 0xb4),
    Color::rgb8(0xff, 0xff, 0xd9),
    Color::rgb8(0x08, 0x1d, 0x58),
];

const FIRST_YEAR: f64 = 1980.0;
const LAST_YEAR: f64 = 2017.0;
const DAYS_PER_YEAR: f64 = 365.0;
const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 140.0;
const ROW_OFFSET: f64 = 5.0;
const LABEL_OFFSET: f64 = 18.0;
const YEAR_TICKS: usize = 30;
const MARK_OPACITY: f64 = 0.6;
const MARK_STROKE: Color = Color::rgb8(0x33, 0x33, 0x33);
const MARK_STROKE_WIDTH: f64 = 0.3;
const LABEL_COLOR: Color = Color::rgb8(0x33, 0x33, 0x33);
const LEGEND_WIDTH: f64 = 170.0;
const LEGEND_HEIGHT: f64 = 8.0;
const LEGEND_RADIUS: f64 = 5.0;

/// Category list and month labels the timeline is built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineOptions {
    pub categories: Vec<String>,
    pub month_labels: Vec<String>,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            categories: DISASTER_CATEGORIES.iter().map(|c| (*c).to_owned()).collect(),
            month_labels: MONTH_LABELS.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}

/// Records of one year plus the year's costliest event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGroup {
    pub year: f64,
    /// Indices into the bound data slice, in input order.
    pub records: Vec<usize>,
    pub max_cost: Option<f64>,
    /// First record whose cost equals `max_cost`.
    pub costliest: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DisasterTimeline {
    surface: Surface,
    data: Rc<[DisasterRecord]>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    radius_scale: SqrtScale,
    color_scale: OrdinalScale<String, Color>,
    legend: Legend,
    static_layer: Decorations,
    label_layer: Decorations,
    groups: Vec<YearGroup>,
}

impl DisasterTimeline {
    #[must_use]
    pub fn default_config() -> ChartConfig {
        ChartConfig::new("#vis", 800, 900, Margin::new(120.0, 20.0, 20.0, 45.0))
            .with_tooltip_padding(15.0)
    }

    pub fn new(config: ChartConfig, data: Rc<[DisasterRecord]>) -> ChartResult<Self> {
        Self::with_options(config, data, TimelineOptions::default())
    }

    pub fn with_options(
        config: ChartConfig,
        data: Rc<[DisasterRecord]>,
        options: TimelineOptions,
    ) -> ChartResult<Self> {
        let surface = Surface::new(config)?;
        let plot = surface.plot();
        let container_height = f64::from(surface.config().container_height);
        let container_width = f64::from(surface.config().container_width);

        let mut radius_scale = SqrtScale::new(MIN_RADIUS, MAX_RADIUS);
        if let Some((lo, hi)) = extent(&data, |record| record.cost) {
            radius_scale.set_domain(lo, hi);
        }
        let x_scale = LinearScale::new(0.0, plot.width).with_domain(0.0, DAYS_PER_YEAR);
        let y_scale =
            LinearScale::new(0.0, container_height - 150.0).with_domain(LAST_YEAR, FIRST_YEAR);
        let month_scale = BandScale::new(0.0, plot.width).with_domain(options.month_labels.iter());
        let color_scale = OrdinalScale::new(options.categories.clone(), CATEGORY_COLORS.to_vec())
            .with_unknown(CATEGORY_COLORS[0]);

        let mut static_layer = Decorations::default();

        let (mx, my) = plot.to_surface(-30.0, -20.0);
        let mut month_axis = Axis::new(AxisOrient::Top)
            .with_tick_size(12.0)
            .with_tick_padding(5.0)
            .with_origin(mx, my)
            .without_domain();
        month_axis.bind_band(&month_scale);
        static_layer.push_axis(&month_axis);

        let (yx, yy) = plot.to_surface(0.0, ROW_OFFSET);
        let mut year_axis = Axis::new(AxisOrient::Left)
            .with_tick_size(-plot.width)
            .with_tick_padding(15.0)
            .with_origin(yx, yy)
            .without_domain();
        year_axis.bind_linear(y_scale, YEAR_TICKS, TickFormat::Integer);
        static_layer.push_axis(&year_axis);

        let entries = options
            .categories
            .iter()
            .map(|category| LegendEntry {
                category: category.clone(),
                color: color_scale.map(category).copied().unwrap_or(CATEGORY_COLORS[0]),
            })
            .collect();
        let legend = Legend::new(
            entries,
            container_width - surface.config().margin.right - LEGEND_WIDTH,
            4.0,
            LEGEND_WIDTH,
            LEGEND_HEIGHT,
            LEGEND_RADIUS,
        );
        legend.draw_labels(&mut static_layer);

        debug!(records = data.len(), "disaster timeline constructed");
        Ok(Self {
            surface,
            data,
            x_scale,
            y_scale,
            radius_scale,
            color_scale,
            legend,
            static_layer,
            label_layer: Decorations::default(),
            groups: Vec::new(),
        })
    }

    /// Year groups from the last [`Chart::update_vis`], in first-appearance
    /// order.
    #[must_use]
    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
    }

    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    #[must_use]
    pub fn radius(&self, cost: f64) -> f64 {
        self.radius_scale.map(cost)
    }

    /// Number of records currently drawn as active marks.
    #[must_use]
    pub fn active_mark_count(&self) -> usize {
        self.surface
            .frame()
            .marks
            .iter()
            .filter(|mark| matches!(mark.key, MarkKey::Index(_)) && mark.state == MarkState::Active)
            .count()
    }

    fn clip(&self) -> ClipRect {
        let plot = self.surface.plot();
        ClipRect {
            x: plot.left,
            y: 0.0,
            width: plot.width,
            height: f64::from(self.surface.config().container_height),
        }
    }

    fn row_y(&self, year: f64) -> f64 {
        self.surface.plot().top + self.y_scale.map(year)
    }
}

impl Chart for DisasterTimeline {
    type Datum = DisasterRecord;

    fn name(&self) -> &'static str {
        "disaster_timeline"
    }

    fn config(&self) -> &ChartConfig {
        self.surface.config()
    }

    fn data(&self) -> &[DisasterRecord] {
        &self.data
    }

    fn set_data(&mut self, data: Rc<[DisasterRecord]>) {
        self.data = data;
    }

    fn update_vis(&mut self, filter: &FilterState) {
        let visible: Vec<usize> = (0..self.data.len())
            .filter(|&index| filter.accepts(&self.data[index]))
            .collect();
        let data = &self.data;

        self.groups = group_by(&visible, |&index| OrderedFloat(data[index].year))
            .into_iter()
            .map(|(year, members)| YearGroup {
                year: year.0,
                max_cost: max(&members, |&index| data[index].cost),
                costliest: max_by_first(&members, |&index| data[index].cost).copied(),
                records: members.into_iter().copied().collect(),
            })
            .collect();

        let plot = self.surface.plot();
        let labels: Vec<TextPrimitive> = self
            .groups
            .iter()
            .filter_map(|group| {
                let record = self.data.get(group.costliest?)?;
                Some(
                    TextPrimitive::new(
                        record.name.clone(),
                        plot.left + self.x_scale.map(record.day_of_year),
                        self.row_y(group.year) + LABEL_OFFSET,
                        LABEL_FONT_SIZE_PX,
                        LABEL_COLOR,
                        TextAnchor::Middle,
                    )
                    .with_class("h-label"),
                )
            })
            .collect();
        self.label_layer.clear();
        for label in labels {
            self.label_layer.push_text(label);
        }
        debug!(years = self.groups.len(), visible = visible.len(), "timeline groups updated");
    }

    fn render_vis(&mut self, filter: &FilterState) -> MarkDiff {
        let plot = self.surface.plot();
        let mut frame = self
            .surface
            .begin(&[&self.static_layer, &self.label_layer])
            .with_clip(self.clip());

        for group in &self.groups {
            let cy = self.row_y(group.year) + ROW_OFFSET;
            for &index in &group.records {
                let record = &self.data[index];
                let fill = self
                    .color_scale
                    .map(&record.category)
                    .copied()
                    .unwrap_or(CATEGORY_COLORS[0]);
                frame.marks.push(Mark::new(
                    MarkKey::Index(index),
                    classify(record, filter),
                    MarkShape::HalfDisc {
                        cx: plot.left + self.x_scale.map(record.day_of_year),
                        cy,
                        radius: self.radius_scale.map(record.cost),
                    },
                    MarkStyle::filled(fill, MARK_OPACITY).with_stroke(MARK_STROKE, MARK_STROKE_WIDTH),
                ));
            }
        }
        frame.marks.extend(self.legend.marks(filter));

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
                    .tooltip_at(x, y, record.name.clone())
                    .with_line(format!("${} billion", record.cost))
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
        match self.frame().hit_test(x, y) {
            Some(Mark {
                key: MarkKey::Category(category),
                ..
            }) => Some(FilterIntent::ToggleCategory(category.clone())),
            _ => None,
        }
    }
}
