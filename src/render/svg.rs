//! SVG export backend.
//!
//! Emits one standalone `<svg>` document per frame. Decorations go into a
//! `decorations` group, record-bound marks into a `marks` group carrying the
//! frame clip. Marks with non-finite geometry are skipped.

use std::fmt::Write as _;

use indexmap::IndexSet;
use tracing::trace;

use crate::error::ChartResult;
use crate::filter::MarkState;
use crate::render::{Color, Mark, MarkShape, RenderFrame, Renderer, TextPrimitive};

const CLIP_ID: &str = "chart-mask";

/// A recording SVG backend; keeps the most recent document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    skipped_marks: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    /// Marks dropped from the last document because of unusable geometry.
    #[must_use]
    pub fn skipped_marks(&self) -> usize {
        self.skipped_marks
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.skipped_marks = frame.marks.len() - frame.renderable_marks().count();
        if self.skipped_marks > 0 {
            trace!(skipped = self.skipped_marks, "skipping marks with non-finite geometry");
        }
        self.document = render_svg(frame);
        Ok(())
    }
}

/// Serializes `frame` into an SVG document without validating it.
#[must_use]
pub fn render_svg(frame: &RenderFrame) -> String {
    let width = frame.viewport.width;
    let height = frame.viewport.height;

    let mut defs = String::new();
    if let Some(clip) = frame.clip {
        let _ = write!(
            defs,
            "<clipPath id=\"{CLIP_ID}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>",
            fmt_num(clip.x),
            fmt_num(clip.y),
            fmt_num(clip.width),
            fmt_num(clip.height)
        );
    }

    let arrow_colors: IndexSet<String> = frame
        .renderable_marks()
        .filter(|mark| matches!(mark.shape, MarkShape::Arrow { .. }))
        .filter_map(|mark| mark.style.stroke.map(Color::to_hex))
        .collect();
    for color in &arrow_colors {
        let _ = write!(
            defs,
            "<marker id=\"{id}\" markerUnits=\"strokeWidth\" refX=\"2\" refY=\"2\" markerWidth=\"10\" markerHeight=\"10\" orient=\"auto\"><path d=\"M0,0 L2,2 L0,4\" stroke=\"{color}\" fill=\"none\"/></marker>",
            id = arrow_marker_id(color)
        );
    }

    let mut body = String::new();
    body.push_str("<g class=\"decorations\">");
    for line in &frame.lines {
        let _ = write!(
            body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            fmt_num(line.x1),
            fmt_num(line.y1),
            fmt_num(line.x2),
            fmt_num(line.y2),
            line.color.to_hex(),
            fmt_num(line.stroke_width),
            alpha_attr("stroke-opacity", line.color.alpha)
        );
    }
    for text in &frame.texts {
        write_text(&mut body, text);
    }
    body.push_str("</g>");

    if frame.clip.is_some() {
        let _ = write!(body, "<g class=\"marks\" clip-path=\"url(#{CLIP_ID})\">");
    } else {
        body.push_str("<g class=\"marks\">");
    }
    for mark in frame.renderable_marks() {
        write_mark(&mut body, mark);
    }
    body.push_str("</g>");

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    if !defs.is_empty() {
        svg.push_str("<defs>");
        svg.push_str(&defs);
        svg.push_str("</defs>");
    }
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

fn write_mark(out: &mut String, mark: &Mark) {
    let state = match mark.state {
        MarkState::Selected => "selected",
        MarkState::Active => "active",
        MarkState::Inactive => "inactive",
    };
    let mut attrs = String::new();
    let _ = write!(
        attrs,
        " class=\"mark {state}\" data-key=\"{}\"",
        escape(&mark.key.to_string())
    );
    match mark.style.fill {
        Some(fill) => {
            let _ = write!(
                attrs,
                " fill=\"{}\" fill-opacity=\"{}\"",
                fill.to_hex(),
                fmt_num(mark.style.fill_opacity * fill.alpha)
            );
        }
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = mark.style.stroke {
        let _ = write!(
            attrs,
            " stroke=\"{}\" stroke-width=\"{}\"",
            stroke.to_hex(),
            fmt_num(mark.style.stroke_width)
        );
    }
    if mark.style.opacity < 1.0 {
        let _ = write!(attrs, " opacity=\"{}\"", fmt_num(mark.style.opacity));
    }

    match mark.shape {
        MarkShape::Circle { cx, cy, r } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}/>",
                fmt_num(cx),
                fmt_num(cy),
                fmt_num(r)
            );
        }
        MarkShape::Rect {
            x,
            y,
            width,
            height,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                fmt_num(x),
                fmt_num(y),
                fmt_num(width),
                fmt_num(height)
            );
        }
        MarkShape::HalfDisc { cx, cy, radius } => {
            let r = fmt_num(radius);
            let _ = write!(
                out,
                "<path transform=\"translate({},{})\" d=\"M-{r},0A{r},{r},0,1,1,{r},0L0,0Z\"{attrs}/>",
                fmt_num(cx),
                fmt_num(cy)
            );
        }
        MarkShape::Arrow { x1, y1, x2, y2 } => {
            if let Some(stroke) = mark.style.stroke {
                let _ = write!(
                    attrs,
                    " marker-end=\"url(#{})\"",
                    arrow_marker_id(&stroke.to_hex())
                );
            }
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{attrs}/>",
                fmt_num(x1),
                fmt_num(y1),
                fmt_num(x2),
                fmt_num(y2)
            );
        }
    }
}

fn write_text(out: &mut String, text: &TextPrimitive) {
    let class = text
        .class
        .as_deref()
        .map(|class| format!(" class=\"{}\"", escape(class)))
        .unwrap_or_default();
    let dy = if text.dy_em == 0.0 {
        String::new()
    } else {
        format!(" dy=\"{}em\"", fmt_num(text.dy_em))
    };
    let _ = write!(
        out,
        "<text x=\"{}\" y=\"{}\"{dy}{class} font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\">{}</text>",
        fmt_num(text.x),
        fmt_num(text.y),
        fmt_num(text.font_size_px),
        text.color.to_hex(),
        text.anchor.as_svg(),
        escape(&text.text)
    );
}

fn arrow_marker_id(hex: &str) -> String {
    format!("arrow-{}", hex.trim_start_matches('#'))
}

fn alpha_attr(name: &str, alpha: f64) -> String {
    if alpha < 1.0 {
        format!(" {name}=\"{}\"", fmt_num(alpha))
    } else {
        String::new()
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_num(v: f64) -> String {
    // Integers print bare; everything else keeps three decimals at most.
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}
