//! Figure style presets.
//!
//! Two presets cover the usual targets: dense, high-DPI figures for journal
//! columns and larger, thicker-lined figures for slides and posters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClimplotError, Result};

/// Font family used for PDF output when none is given
pub const DEFAULT_PDF_FONT: &str = "Myriad Pro";

/// Which preset a [`StyleConfig`] was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    #[default]
    Publication,
    Presentation,
}

impl StyleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleMode::Publication => "publication",
            StyleMode::Presentation => "presentation",
        }
    }

    /// Figure width used when the caller gives none, in inches
    pub fn default_width(&self) -> f64 {
        match self {
            StyleMode::Publication => 3.5,
            StyleMode::Presentation => 7.0,
        }
    }

    /// The preset at its default width
    pub fn config(&self) -> StyleConfig {
        self.config_with_width(self.default_width())
    }

    pub fn config_with_width(&self, width: f64) -> StyleConfig {
        match self {
            StyleMode::Publication => StyleConfig::publication(width),
            StyleMode::Presentation => StyleConfig::presentation(width),
        }
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleMode {
    type Err = ClimplotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "publication" => Ok(StyleMode::Publication),
            "presentation" => Ok(StyleMode::Presentation),
            _ => Err(ClimplotError::InvalidParameter {
                param: "style".to_string(),
                message: format!(
                    "Unknown style mode: {}. Must be one of: publication, presentation",
                    s
                ),
            }),
        }
    }
}

/// Font sizes in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    pub base: f64,
    pub axes_label: f64,
    pub title: f64,
    pub tick_label: f64,
    pub legend: f64,
}

/// Line widths in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineWidths {
    pub axes: f64,
    pub grid: f64,
    pub lines: f64,
}

/// Complete figure style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub mode: StyleMode,
    /// Figure size in inches, (width, height)
    pub figsize: (f64, f64),
    pub dpi: u32,
    pub fonts: FontSizes,
    pub line_widths: LineWidths,
    /// Set only for PDF output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Embed TrueType fonts so text stays editable
    pub pdf_fonttype: u8,
}

impl StyleConfig {
    /// Journal figures: small fonts, 300 DPI, 4:3 aspect
    pub fn publication(width: f64) -> Self {
        Self {
            mode: StyleMode::Publication,
            figsize: (width, width * 0.75),
            dpi: 300,
            fonts: FontSizes {
                base: 10.0,
                axes_label: 10.0,
                title: 11.0,
                tick_label: 8.0,
                legend: 8.0,
            },
            line_widths: LineWidths {
                axes: 0.8,
                grid: 0.3,
                lines: 1.5,
            },
            font_family: None,
            pdf_fonttype: 42,
        }
    }

    /// Slides and posters: large fonts, 150 DPI, thicker lines
    pub fn presentation(width: f64) -> Self {
        Self {
            mode: StyleMode::Presentation,
            figsize: (width, width * 0.6),
            dpi: 150,
            fonts: FontSizes {
                base: 14.0,
                axes_label: 14.0,
                title: 16.0,
                tick_label: 14.0,
                legend: 12.0,
            },
            line_widths: LineWidths {
                axes: 1.2,
                grid: 0.5,
                lines: 2.5,
            },
            font_family: None,
            pdf_fonttype: 42,
        }
    }

    /// Configure for PDF output, defaulting the font family to
    /// [`DEFAULT_PDF_FONT`].
    pub fn for_pdf(mut self, font_family: Option<&str>) -> Self {
        self.font_family = Some(font_family.unwrap_or(DEFAULT_PDF_FONT).to_string());
        self
    }

    pub fn width(&self) -> f64 {
        self.figsize.0
    }

    pub fn height(&self) -> f64 {
        self.figsize.1
    }

    /// Figure size in pixels at this style's DPI
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.figsize.0 * dpi).round() as u32,
            (self.figsize.1 * dpi).round() as u32,
        )
    }

    /// Reject non-positive or non-finite sizes
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.figsize;
        if !(w.is_finite() && w > 0.0 && h.is_finite() && h > 0.0) {
            return Err(ClimplotError::InvalidParameter {
                param: "width".to_string(),
                message: format!("figure size must be positive, got {} x {}", w, h),
            });
        }
        if self.dpi == 0 {
            return Err(ClimplotError::InvalidParameter {
                param: "dpi".to_string(),
                message: "dpi cannot be 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleMode::default().config()
    }
}
