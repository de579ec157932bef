//! Top-level controllers.
//!
//! A controller owns the loaded records, the [`FilterState`] and its charts.
//! Pointer input is routed to charts, the resulting intents are applied to
//! the filter state, and an [`InvalidationPlan`] decides which charts run
//! `update_vis`/`render_vis` afterwards.
//!
//! [`FilterState`]: crate::filter::FilterState

mod invalidation;
mod json_contract;
mod leader_dashboard;
mod observer;
mod timeline_view;
mod trials_view;
mod view;

pub use invalidation::{InvalidationLevel, InvalidationPlan, refresh_chart};
pub use json_contract::{
    DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshot, DashboardSnapshotJsonContractV1,
    ViewSnapshot,
};
pub use leader_dashboard::{DEFAULT_GROUP, LeaderDashboard, LeaderDashboardConfig, plan_for};
pub use observer::{DashboardEvent, DashboardObserver, ObserverRegistry};
pub use timeline_view::DisasterTimelineView;
pub use trials_view::TrialsView;
pub use view::ViewId;
