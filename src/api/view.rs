use serde::{Deserialize, Serialize};

/// Identifies one chart instance inside a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Trials,
    Timeline,
    BarChart,
    Scatterplot,
    Lexis,
}

impl ViewId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trials => "trials",
            Self::Timeline => "timeline",
            Self::BarChart => "bar_chart",
            Self::Scatterplot => "scatterplot",
            Self::Lexis => "lexis",
        }
    }
}
