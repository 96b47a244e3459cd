use serde::{Deserialize, Serialize};
use treemap_core::{LegendConfig, Result, TreemapError};

/// Chart viewbox and margins. Values are in viewbox units unless noted otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Gap between sibling tiles.
    pub padding: f64,
    pub label: LabelConfig,
    /// Tooltip distance from the pointer, both axes (CSS px).
    pub tooltip_offset: f64,
    pub legend: LegendConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 960.0,
            height: 600.0,
            margin: Margin::uniform(20.0),
            padding: 1.0,
            label: LabelConfig::default(),
            tooltip_offset: 5.0,
            legend: LegendConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn uniform(v: f64) -> Self {
        Margin {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Margin::uniform(0.0)
    }
}

/// Tile label placement and the thresholds under which it is hidden.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub inset_x: f64,
    pub inset_y: f64,
    pub min_font_size: f64,
    pub font_divisor: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            inset_x: 5.0,
            inset_y: 20.0,
            min_font_size: 10.0,
            font_divisor: 5.0,
            min_width: 50.0,
            min_height: 20.0,
        }
    }
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<ChartConfig> {
        let cfg: ChartConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TreemapError::Config(format!("{name} must be positive, got {v}")))
            }
        };
        let non_negative = |name: &str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(TreemapError::Config(format!("{name} must not be negative, got {v}")))
            }
        };
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("legend.width", self.legend.width)?;
        positive("label.font_divisor", self.label.font_divisor)?;
        non_negative("padding", self.padding)?;
        non_negative("margin.top", self.margin.top)?;
        non_negative("margin.right", self.margin.right)?;
        non_negative("margin.bottom", self.margin.bottom)?;
        non_negative("margin.left", self.margin.left)?;
        if self.legend.max_rows == 0 {
            return Err(TreemapError::Config("legend.max_rows must be at least 1".into()));
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(TreemapError::Config(
                "margins leave no room for the chart".into(),
            ));
        }
        Ok(())
    }

    /// Width available to tiles once margins are taken out.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}
