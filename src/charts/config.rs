use serde::{Deserialize, Serialize};

use crate::core::{Margin, PlotArea, Viewport};
use crate::error::ChartResult;

/// Sizing and mount configuration of one chart instance.
///
/// Every chart type ships its own defaults; hosts override single fields via
/// [`ChartConfigOverrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Identifier of the container the chart is mounted into.
    pub parent_element: String,
    pub container_width: u32,
    pub container_height: u32,
    pub margin: Margin,
    /// Offset between the pointer and the tooltip's top-left corner.
    pub tooltip_padding: f64,
}

impl ChartConfig {
    #[must_use]
    pub fn new(
        parent_element: impl Into<String>,
        container_width: u32,
        container_height: u32,
        margin: Margin,
    ) -> Self {
        Self {
            parent_element: parent_element.into(),
            container_width,
            container_height,
            margin,
            tooltip_padding: 15.0,
        }
    }

    #[must_use]
    pub fn with_parent_element(mut self, parent_element: impl Into<String>) -> Self {
        self.parent_element = parent_element.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, container_width: u32, container_height: u32) -> Self {
        self.container_width = container_width;
        self.container_height = container_height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_tooltip_padding(mut self, tooltip_padding: f64) -> Self {
        self.tooltip_padding = tooltip_padding;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.container_width, self.container_height)
    }

    /// Inner plotting rectangle: container size minus margins.
    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::from_viewport(self.viewport(), self.margin)
    }
}

/// Partial configuration as read from a host config file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfigOverrides {
    pub parent_element: Option<String>,
    pub container_width: Option<u32>,
    pub container_height: Option<u32>,
    pub margin: Option<Margin>,
    pub tooltip_padding: Option<f64>,
}

impl ChartConfigOverrides {
    /// Fills every unset field from `defaults`.
    #[must_use]
    pub fn resolve(&self, defaults: ChartConfig) -> ChartConfig {
        ChartConfig {
            parent_element: self
                .parent_element
                .clone()
                .unwrap_or(defaults.parent_element),
            container_width: self.container_width.unwrap_or(defaults.container_width),
            container_height: self.container_height.unwrap_or(defaults.container_height),
            margin: self.margin.unwrap_or(defaults.margin),
            tooltip_padding: self.tooltip_padding.unwrap_or(defaults.tooltip_padding),
        }
    }
}
