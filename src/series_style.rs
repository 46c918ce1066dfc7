//! Line colors and styles for time series of named configurations.
//!
//! Observations are drawn black and dashed; models are solid and take the
//! tab10 colors in order (`model1` blue, `model2` orange, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::colormaps::{to_hex, Palette, Rgba};

/// Color of observation lines
const OBS_COLOR: Rgba = [0, 0, 0, 255];
/// tab10 blue, used by `model`, `model1` and unknown names
const MODEL_COLOR: Rgba = [31, 119, 180, 255];
/// Numbered model configurations with a fixed color
const NUMBERED_MODELS: usize = 5;

/// Matplotlib-style line dash pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

impl LineStyle {
    /// Short form accepted by plotting libraries (`-`, `--`)
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color and dash pattern for one configuration's line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Rgba,
    pub linestyle: LineStyle,
}

impl SeriesStyle {
    pub fn hex(&self) -> String {
        to_hex(self.color)
    }
}

/// Standard style for a configuration name such as `obs`, `model` or
/// `model3`. Unknown names get the default model style.
pub fn config_style(name: &str) -> SeriesStyle {
    if name == "obs" {
        return SeriesStyle {
            color: OBS_COLOR,
            linestyle: LineStyle::Dashed,
        };
    }

    let color = name
        .strip_prefix("model")
        .and_then(|suffix| suffix.parse::<usize>().ok())
        .filter(|n| (1..=NUMBERED_MODELS).contains(n))
        .and_then(|n| Palette::Tab10.table_color(n - 1))
        .unwrap_or(MODEL_COLOR);

    SeriesStyle {
        color,
        linestyle: LineStyle::Solid,
    }
}
