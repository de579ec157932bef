use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, Mark, MarkKey, TextPrimitive};

/// Rectangle that record-bound marks are clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ClipRect {
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Decorations (`lines`, `texts`) are drawn first, then `marks` in
/// order, so later marks sit on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub marks: Vec<Mark>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub clip: Option<ClipRect>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            marks: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            clip: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: ClipRect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Checks decorations strictly; marks may carry `NaN` geometry and are
    /// skipped by backends instead.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for mark in &self.marks {
            if let Some(fill) = mark.style.fill {
                fill.validate()?;
            }
            if let Some(stroke) = mark.style.stroke {
                stroke.validate()?;
            }
        }

        Ok(())
    }

    pub fn renderable_marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|mark| mark.is_renderable())
    }

    #[must_use]
    pub fn mark(&self, key: &MarkKey) -> Option<&Mark> {
        self.marks.iter().find(|mark| &mark.key == key)
    }

    /// Topmost drawn mark under `(x, y)`, honouring the clip rectangle.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Mark> {
        if self.clip.is_some_and(|clip| !clip.contains(x, y)) {
            return None;
        }
        self.marks.iter().rev().find(|mark| mark.contains(x, y))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.lines.is_empty() && self.texts.is_empty()
    }
}
