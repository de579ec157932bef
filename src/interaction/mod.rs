//! Pointer and hover state shared by chart components.

use serde::{Deserialize, Serialize};

use crate::render::MarkKey;

/// Positioned record detail shown while hovering a mark.
///
/// `left`/`top` are the pointer position shifted by the chart's tooltip
/// padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub left: f64,
    pub top: f64,
    pub title: String,
    pub subtitle: Option<String>,
    pub lines: Vec<String>,
}

impl Tooltip {
    #[must_use]
    pub fn at(pointer_x: f64, pointer_y: f64, padding: f64, title: impl Into<String>) -> Self {
        Self {
            left: pointer_x + padding,
            top: pointer_y + padding,
            title: title.into(),
            subtitle: None,
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// HTML fragment for hosts that display tooltips in a page.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div class=\"tooltip-title\">{}</div>",
            escape_html(&self.title)
        );
        if let Some(subtitle) = &self.subtitle {
            html.push_str(&format!("<div><i>{}</i></div>", escape_html(subtitle)));
        }
        if !self.lines.is_empty() {
            html.push_str("<ul>");
            for line in &self.lines {
                html.push_str(&format!("<li>{}</li>", escape_html(line)));
            }
            html.push_str("</ul>");
        }
        html
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Per-chart pointer state. Hover styling is chart-local and never touches
/// the shared filter state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerState {
    cursor: Option<(f64, f64)>,
    hovered: Option<MarkKey>,
    tooltip: Option<Tooltip>,
}

impl PointerState {
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&MarkKey> {
        self.hovered.as_ref()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Records a pointer move and what it ended up over.
    ///
    /// Returns `true` when the hovered mark changed.
    pub fn on_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        hovered: Option<MarkKey>,
        tooltip: Option<Tooltip>,
    ) -> bool {
        self.cursor = Some((x, y));
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        self.tooltip = tooltip;
        changed
    }

    /// Clears hover and tooltip. Returns `true` when something was hovered.
    pub fn on_pointer_leave(&mut self) -> bool {
        self.cursor = None;
        self.tooltip = None;
        self.hovered.take().is_some()
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }
}
