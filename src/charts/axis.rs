//! Axis renderers bound to scales.
//!
//! Geometry mirrors the classic SVG axis: ticks extend `tick_size_inner`
//! away from the plot (negative sizes turn them into gridlines across it),
//! labels sit `max(inner, 0) + tick_padding` beyond the axis line, and the
//! domain path uses `tick_size_outer` for its end caps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    BandScale, LinearScale, format_default_tick, format_fixed, format_integer,
};
use crate::render::{Color, LinePrimitive, TextAnchor, TextPrimitive};

const AXIS_FONT_SIZE_PX: f64 = 10.0;
const AXIS_COLOR: Color = Color::rgb8(0x00, 0x00, 0x00);
const GRIDLINE_COLOR: Color = Color::rgb8(0xdd, 0xdd, 0xdd);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrient {
    Top,
    Right,
    Bottom,
    Left,
}

impl AxisOrient {
    fn direction(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Decimals derived from the tick step, with thousands separators.
    Default,
    Fixed(usize),
    Integer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub label: String,
    /// Offset along the axis, relative to the axis origin.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    orient: AxisOrient,
    tick_size_inner: f64,
    tick_size_outer: f64,
    tick_padding: f64,
    origin: (f64, f64),
    show_domain: bool,
    range: (f64, f64),
    ticks: SmallVec<[AxisTick; 8]>,
}

impl Axis {
    #[must_use]
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            origin: (0.0, 0.0),
            show_domain: true,
            range: (0.0, 0.0),
            ticks: SmallVec::new(),
        }
    }

    /// Sets inner and outer tick size together.
    #[must_use]
    pub fn with_tick_size(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self.tick_size_outer = size;
        self
    }

    #[must_use]
    pub fn with_tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    #[must_use]
    pub fn with_tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    /// Surface position of the axis origin (the translated axis group).
    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    #[must_use]
    pub fn without_domain(mut self) -> Self {
        self.show_domain = false;
        self
    }

    #[must_use]
    pub fn ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    /// Binds the axis to a linear scale with roughly `count` ticks.
    pub fn bind_linear(&mut self, scale: LinearScale, count: usize, format: TickFormat) {
        let step = scale.tick_step(count);
        self.range = scale.range();
        self.ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| AxisTick {
                label: match format {
                    TickFormat::Default => format_default_tick(value, step),
                    TickFormat::Fixed(decimals) => format_fixed(value, decimals),
                    TickFormat::Integer => format_integer(value),
                },
                position: scale.map(value),
            })
            .collect();
    }

    /// Binds the axis to a band scale; ticks sit at band centres.
    pub fn bind_band(&mut self, scale: &BandScale) {
        let (first, last) = (
            scale.domain().first().and_then(|key| scale.map(key)),
            scale.domain().last().and_then(|key| scale.map(key)),
        );
        self.range = match (first, last) {
            (Some(first), Some(last)) => (first, last + scale.bandwidth()),
            _ => (0.0, 0.0),
        };
        let half = scale.bandwidth() * 0.5;
        self.ticks = scale
            .domain()
            .iter()
            .filter_map(|key| {
                scale.map(key).map(|start| AxisTick {
                    label: key.clone(),
                    position: start + half,
                })
            })
            .collect();
    }

    /// Appends tick lines, domain path and labels in surface coordinates.
    pub fn draw(&self, lines: &mut Vec<LinePrimitive>, texts: &mut Vec<TextPrimitive>) {
        let k = self.orient.direction();
        let (ox, oy) = self.origin;
        let horizontal = self.orient.is_horizontal();
        let point = |along: f64, across: f64| {
            if horizontal {
                (ox + along, oy + across)
            } else {
                (ox + across, oy + along)
            }
        };

        if self.show_domain {
            let (r0, r1) = self.range;
            let (ax, ay) = point(r0, 0.0);
            let (bx, by) = point(r1, 0.0);
            lines.push(LinePrimitive::new(ax, ay, bx, by, 1.0, AXIS_COLOR));
            if self.tick_size_outer != 0.0 {
                for end in [r0, r1] {
                    let (x1, y1) = point(end, 0.0);
                    let (x2, y2) = point(end, k * self.tick_size_outer);
                    lines.push(LinePrimitive::new(x1, y1, x2, y2, 1.0, AXIS_COLOR));
                }
            }
        }

        let color = if self.tick_size_inner < 0.0 {
            GRIDLINE_COLOR
        } else {
            AXIS_COLOR
        };
        let label_offset = k * (self.tick_size_inner.max(0.0) + self.tick_padding);
        let (anchor, dy_em) = match self.orient {
            AxisOrient::Top => (TextAnchor::Middle, 0.0),
            AxisOrient::Bottom => (TextAnchor::Middle, 0.71),
            AxisOrient::Left => (TextAnchor::End, 0.32),
            AxisOrient::Right => (TextAnchor::Start, 0.32),
        };

        for tick in &self.ticks {
            if !tick.position.is_finite() {
                continue;
            }
            if self.tick_size_inner != 0.0 {
                let (x1, y1) = point(tick.position, 0.0);
                let (x2, y2) = point(tick.position, k * self.tick_size_inner);
                lines.push(LinePrimitive::new(x1, y1, x2, y2, 1.0, color));
            }
            if tick.label.is_empty() {
                continue;
            }
            let (tx, ty) = point(tick.position, label_offset);
            texts.push(
                TextPrimitive::new(
                    tick.label.clone(),
                    tx,
                    ty,
                    AXIS_FONT_SIZE_PX,
                    AXIS_COLOR,
                    anchor,
                )
                .with_dy_em(dy_em)
                .with_class("tick"),
            );
        }
    }
}
