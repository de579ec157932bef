mod frame;
mod mark;
mod null_renderer;
mod primitives;
mod reconcile;
mod svg;

pub use frame::{ClipRect, RenderFrame};
pub use mark::{Mark, MarkKey, MarkShape, MarkStyle};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, TextAnchor, TextPrimitive};
pub use reconcile::{MarkDiff, reconcile};
pub use svg::{SvgRenderer, render_svg};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
