use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::filter::MarkState;
use crate::render::Color;

/// Minimum pick distance for thin strokes such as lexis arrows.
const LINE_PICK_TOLERANCE_PX: f64 = 3.0;

/// Identity of a record-bound mark across frames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkKey {
    /// Record identifier column.
    Id(i64),
    /// Position in the bound data slice, for records without an identifier.
    Index(usize),
    /// Aggregate or legend entry keyed by a category label.
    Category(String),
}

impl fmt::Display for MarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id-{id}"),
            Self::Index(index) => write!(f, "index-{index}"),
            Self::Category(category) => write!(f, "category-{category}"),
        }
    }
}

/// JSON has no `NaN`; serde_json writes it as `null`, so read `null` back as `NaN`.
fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Geometry of a record-bound mark, in surface coordinates.
///
/// Coordinates may be `NaN` for records with broken data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkShape {
    Circle {
        #[serde(deserialize_with = "nan_from_null")]
        cx: f64,
        #[serde(deserialize_with = "nan_from_null")]
        cy: f64,
        #[serde(deserialize_with = "nan_from_null")]
        r: f64,
    },
    Rect {
        #[serde(deserialize_with = "nan_from_null")]
        x: f64,
        #[serde(deserialize_with = "nan_from_null")]
        y: f64,
        #[serde(deserialize_with = "nan_from_null")]
        width: f64,
        #[serde(deserialize_with = "nan_from_null")]
        height: f64,
    },
    /// Upper half of a disc centred on `(cx, cy)`.
    HalfDisc {
        #[serde(deserialize_with = "nan_from_null")]
        cx: f64,
        #[serde(deserialize_with = "nan_from_null")]
        cy: f64,
        #[serde(deserialize_with = "nan_from_null")]
        radius: f64,
    },
    /// Line with an arrowhead at `(x2, y2)`.
    Arrow {
        #[serde(deserialize_with = "nan_from_null")]
        x1: f64,
        #[serde(deserialize_with = "nan_from_null")]
        y1: f64,
        #[serde(deserialize_with = "nan_from_null")]
        x2: f64,
        #[serde(deserialize_with = "nan_from_null")]
        y2: f64,
    },
}

impl MarkShape {
    fn coordinates(&self) -> [f64; 4] {
        match *self {
            Self::Circle { cx, cy, r } => [cx, cy, r, 0.0],
            Self::Rect {
                x,
                y,
                width,
                height,
            } => [x, y, width, height],
            Self::HalfDisc { cx, cy, radius } => [cx, cy, radius, 0.0],
            Self::Arrow { x1, y1, x2, y2 } => [x1, y1, x2, y2],
        }
    }

    /// Same variant and coordinates, with `NaN` matching `NaN`.
    fn same_geometry(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self
                .coordinates()
                .iter()
                .zip(other.coordinates().iter())
                .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl MarkStyle {
    #[must_use]
    pub const fn filled(fill: Color, fill_opacity: f64) -> Self {
        Self {
            fill: Some(fill),
            fill_opacity,
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub const fn stroked(stroke: Color, stroke_width: f64) -> Self {
        Self {
            fill: None,
            fill_opacity: 0.0,
            stroke: Some(stroke),
            stroke_width,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Color, stroke_width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// One visual primitive bound to one record or aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub key: MarkKey,
    pub state: MarkState,
    pub shape: MarkShape,
    pub style: MarkStyle,
}

impl Mark {
    #[must_use]
    pub fn new(key: MarkKey, state: MarkState, shape: MarkShape, style: MarkStyle) -> Self {
        Self {
            key,
            state,
            shape,
            style,
        }
    }

    /// Visual identity used by [`crate::render::reconcile`]. Unlike `==`, a
    /// mark with `NaN` geometry is identical to an unchanged copy of itself.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.key == other.key
            && self.state == other.state
            && self.style == other.style
            && self.shape.same_geometry(&other.shape)
    }

    /// Marks built from broken data carry `NaN` geometry and are not drawn.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.shape.coordinates().iter().all(|v| v.is_finite())
    }

    /// Whether the point `(x, y)` falls on this mark.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !self.is_renderable() {
            return false;
        }
        match self.shape {
            MarkShape::Circle { cx, cy, r } => (x - cx).hypot(y - cy) <= r,
            MarkShape::Rect {
                x: rx,
                y: ry,
                width,
                height,
            } => x >= rx && x <= rx + width && y >= ry && y <= ry + height,
            MarkShape::HalfDisc { cx, cy, radius } => {
                y <= cy && (x - cx).hypot(y - cy) <= radius
            }
            MarkShape::Arrow { x1, y1, x2, y2 } => {
                let tolerance = (self.style.stroke_width * 0.5).max(LINE_PICK_TOLERANCE_PX);
                distance_to_segment(x, y, (x1, y1), (x2, y2)) <= tolerance
            }
        }
    }
}

fn distance_to_segment(x: f64, y: f64, a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return (x - a.0).hypot(y - a.1);
    }
    let t = (((x - a.0) * dx + (y - a.1) * dy) / length_sq).clamp(0.0, 1.0);
    (x - (a.0 + t * dx)).hypot(y - (a.1 + t * dy))
}
