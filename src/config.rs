//! Configuration management for climplot.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{Extend, Palette};
use crate::error::{ClimplotError, Result};
use crate::style::StyleMode;
use crate::ticks::{DEFAULT_MAX_TICKS, DEFAULT_MIN_TICKS};

/// Command-line arguments for climplot
#[derive(Parser, Debug)]
#[command(name = "climplot")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "CLIMPLOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CLIMPLOT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Maximum number of colorbar ticks
    #[arg(long, env = "CLIMPLOT_MAX_TICKS", global = true)]
    pub max_ticks: Option<usize>,

    /// Minimum number of colorbar ticks
    #[arg(long, env = "CLIMPLOT_MIN_TICKS", global = true)]
    pub min_ticks: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Colormap families exposed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmapKind {
    Anomaly,
    Sequential,
    Discrete,
    Log,
    Categorical,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print contour level boundaries
    Levels {
        #[arg(long, allow_negative_numbers = true)]
        vmin: f64,

        #[arg(long, allow_negative_numbers = true)]
        vmax: f64,

        /// Fixed spacing between levels
        #[arg(long, conflicts_with = "n_levels")]
        interval: Option<f64>,

        /// Approximate number of levels; a round interval is chosen
        #[arg(long)]
        n_levels: Option<usize>,
    },

    /// Print a discrete colormap's boundaries and bin colors
    Cmap {
        #[arg(value_enum)]
        kind: CmapKind,

        #[arg(long, allow_negative_numbers = true)]
        vmin: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        vmax: Option<f64>,

        #[arg(long)]
        interval: Option<f64>,

        /// Levels per decade (log) or number of categories (categorical)
        #[arg(short, long)]
        n: Option<usize>,

        /// Palette name, e.g. RdBu_r or viridis
        #[arg(long)]
        palette: Option<String>,

        /// Out-of-range arrows: neither, min, max, both
        #[arg(long)]
        extend: Option<String>,

        /// Paint the bins around the center white
        #[arg(long)]
        white_center: bool,

        /// Allow negative values for sequential maps
        #[arg(long)]
        allow_negative: bool,
    },

    /// Print a figure style preset as JSON
    Style {
        /// publication or presentation
        mode: Option<String>,

        /// Figure width in inches
        #[arg(long)]
        width: Option<f64>,

        /// Configure for PDF output with embedded fonts
        #[arg(long)]
        pdf: bool,

        #[arg(long)]
        font_family: Option<String>,
    },

    /// Print validation metrics for fields stored in a JSON file
    Metrics {
        /// JSON file with dims, shape, model, obs and optional weights
        input: PathBuf,
    },

    /// List the named colormaps and their palettes
    Colormaps,
}

/// Style configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Preset name
    #[serde(default)]
    pub mode: StyleMode,

    /// Figure width in inches (None = the preset's default)
    #[serde(default)]
    pub width: Option<f64>,

    /// Configure fonts for PDF output
    #[serde(default)]
    pub for_pdf: bool,

    #[serde(default)]
    pub font_family: Option<String>,
}

/// Colorbar tick configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSettings {
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,

    #[serde(default = "default_min_ticks")]
    pub min_ticks: usize,
}

/// Colormap defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColormapSettings {
    /// Paint the bins around the center white (off unless asked for)
    #[serde(default)]
    pub center_on_white: bool,

    /// Palette override applied to every map
    #[serde(default)]
    pub palette: Option<String>,

    /// Extend override applied to every map
    #[serde(default)]
    pub extend: Option<String>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Style configuration
    #[serde(default)]
    pub style: StyleSettings,

    /// Tick configuration
    #[serde(default)]
    pub ticks: TickSettings,

    /// Colormap configuration
    #[serde(default)]
    pub colormap: ColormapSettings,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args.command))
    }

    /// Layer the config file and command-line values over the defaults
    pub fn from_args(args: &Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments (clap folds in the environment)
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        if let Some(max_ticks) = args.max_ticks {
            config.ticks.max_ticks = max_ticks;
        }
        if let Some(min_ticks) = args.min_ticks {
            config.ticks.min_ticks = min_ticks;
        }

        match &args.command {
            Command::Style {
                mode,
                width,
                pdf,
                font_family,
            } => {
                if let Some(mode) = mode {
                    config.style.mode = mode.parse()?;
                }
                if width.is_some() {
                    config.style.width = *width;
                }
                config.style.for_pdf |= *pdf;
                if font_family.is_some() {
                    config.style.font_family = font_family.clone();
                }
            }
            Command::Cmap {
                palette,
                extend,
                white_center,
                ..
            } => {
                if palette.is_some() {
                    config.colormap.palette = palette.clone();
                }
                if extend.is_some() {
                    config.colormap.extend = extend.clone();
                }
                config.colormap.center_on_white |= *white_center;
            }
            _ => {}
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.style.mode = other.style.mode;
        if other.style.width.is_some() {
            self.style.width = other.style.width;
        }
        self.style.for_pdf = other.style.for_pdf;
        if other.style.font_family.is_some() {
            self.style.font_family = other.style.font_family;
        }
        self.ticks = other.ticks;
        self.colormap.center_on_white = other.colormap.center_on_white;
        if other.colormap.palette.is_some() {
            self.colormap.palette = other.colormap.palette;
        }
        if other.colormap.extend.is_some() {
            self.colormap.extend = other.colormap.extend;
        }
        self.log_level = other.log_level;
    }

    /// Parsed palette override, if any
    pub fn palette(&self) -> Result<Option<Palette>> {
        self.colormap.palette.as_deref().map(str::parse).transpose()
    }

    /// Parsed extend override, if any
    pub fn extend(&self) -> Result<Option<Extend>> {
        self.colormap.extend.as_deref().map(str::parse).transpose()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ClimplotError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        // Validate tick bounds
        if self.ticks.max_ticks < 2 {
            return Err(ClimplotError::Config {
                message: format!("max_ticks must be at least 2, got {}", self.ticks.max_ticks),
            });
        }
        if self.ticks.min_ticks > self.ticks.max_ticks {
            return Err(ClimplotError::Config {
                message: format!(
                    "min_ticks ({}) cannot exceed max_ticks ({})",
                    self.ticks.min_ticks, self.ticks.max_ticks
                ),
            });
        }

        // Validate figure width
        if let Some(width) = self.style.width {
            if !(width.is_finite() && width > 0.0) {
                return Err(ClimplotError::Config {
                    message: format!("Figure width must be positive, got {}", width),
                });
            }
        }

        // Validate colormap overrides
        self.palette().map_err(|e| ClimplotError::Config {
            message: e.to_string(),
        })?;
        self.extend().map_err(|e| ClimplotError::Config {
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: StyleSettings::default(),
            ticks: TickSettings::default(),
            colormap: ColormapSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            mode: StyleMode::default(),
            width: None,
            for_pdf: false,
            font_family: None,
        }
    }
}

impl Default for TickSettings {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            min_ticks: default_min_ticks(),
        }
    }
}

// Default value functions for serde
fn default_max_ticks() -> usize {
    DEFAULT_MAX_TICKS
}

fn default_min_ticks() -> usize {
    DEFAULT_MIN_TICKS
}

fn default_log_level() -> String {
    "info".to_string()
}
