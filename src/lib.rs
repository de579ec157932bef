//! classroom-charts: headless chart components for CSV-driven visualization
//! exercises.
//!
//! Records are loaded and coerced by [`data`], mapped through the scales in
//! [`core`], and turned into backend-agnostic [`render::RenderFrame`]s by the
//! chart components in [`charts`]. Controllers in [`api`] own the shared
//! [`filter::FilterState`] and wire pointer input across linked views.

pub mod api;
pub mod charts;
pub mod core;
pub mod data;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{DisasterTimelineView, LeaderDashboard, TrialsView, ViewId};
pub use charts::{Chart, ChartConfig};
pub use error::{ChartError, ChartResult};
pub use filter::{FilterIntent, FilterState, MarkState, classify};
