use serde::{Deserialize, Serialize};

use crate::filter::{FilterState, MarkState};
use crate::render::{Color, Mark, MarkKey, MarkShape, MarkStyle, TextAnchor, TextPrimitive};

use super::Decorations;

const LEGEND_FONT_SIZE_PX: f64 = 10.0;
const LEGEND_TEXT_COLOR: Color = Color::rgb8(0x33, 0x33, 0x33);
const INACTIVE_OPACITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: Color,
}

/// Clickable category legend laid out as a vertical list.
///
/// Each entry is a circle keyed by [`MarkKey::Category`] followed by its
/// label. Entries outside the active set are dimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    x: f64,
    y: f64,
    width: f64,
    row_height: f64,
    radius: f64,
}

impl Legend {
    /// `row_height` is the gap between circles; rows advance by
    /// `2 * radius + row_height`.
    #[must_use]
    pub fn new(entries: Vec<LegendEntry>, x: f64, y: f64, width: f64, row_height: f64, radius: f64) -> Self {
        Self {
            entries,
            x,
            y,
            width,
            row_height,
            radius,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    fn row_center(&self, index: usize) -> (f64, f64) {
        let step = 2.0 * self.radius + self.row_height;
        (self.x + self.radius, self.y + self.radius + step * index as f64)
    }

    pub(crate) fn draw_labels(&self, decorations: &mut Decorations) {
        for (index, entry) in self.entries.iter().enumerate() {
            let (cx, cy) = self.row_center(index);
            decorations.push_text(
                TextPrimitive::new(
                    entry.category.clone(),
                    cx + 2.0 * self.radius,
                    cy,
                    LEGEND_FONT_SIZE_PX,
                    LEGEND_TEXT_COLOR,
                    TextAnchor::Start,
                )
                .with_dy_em(0.32)
                .with_class("legend-label"),
            );
        }
    }

    #[must_use]
    pub fn marks(&self, filter: &FilterState) -> Vec<Mark> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let (cx, cy) = self.row_center(index);
                let active = filter.is_category_active(&entry.category);
                let style = MarkStyle::filled(entry.color, 1.0).with_stroke(Color::rgb8(0x33, 0x33, 0x33), 0.3);
                let (state, style) = if active {
                    (MarkState::Active, style)
                } else {
                    (MarkState::Inactive, style.with_opacity(INACTIVE_OPACITY))
                };
                Mark::new(
                    MarkKey::Category(entry.category.clone()),
                    state,
                    MarkShape::Circle { cx, cy, r: self.radius },
                    style,
                )
            })
            .collect()
    }
}
