//! Colormap trait and base palettes.
//!
//! Base palettes have fixed endpoints; every discrete mapping samples them at
//! positions in `[0, 1]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClimplotError, Result};

/// An 8-bit RGBA color
pub type Rgba = [u8; 4];

/// Pure white, used for the neutral band of white-centered mappings
pub const WHITE: Rgba = [255, 255, 255, 255];

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f64) -> Rgba;

    /// Get the name of this colormap
    fn name(&self) -> &str;

    /// Sample the colormap at several normalized positions
    fn sample(&self, positions: &[f64]) -> Vec<Rgba> {
        positions.iter().map(|&p| self.map_normalized(p)).collect()
    }
}

/// The base palettes known to climplot.
///
/// Names follow the matplotlib convention, with `_r` marking a reversed
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Palette {
    RdBu,
    RdBuR,
    BrBG,
    PuOr,
    PuOrR,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Blues,
    BluesR,
    /// Ten-color qualitative table
    Tab10,
    /// Cyclic hue wheel
    Sinebow,
}

/// The matplotlib "tab10" qualitative colors
const TAB10: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

impl Palette {
    pub const ALL: [Palette; 14] = [
        Palette::RdBu,
        Palette::RdBuR,
        Palette::BrBG,
        Palette::PuOr,
        Palette::PuOrR,
        Palette::Viridis,
        Palette::Plasma,
        Palette::Inferno,
        Palette::Magma,
        Palette::Cividis,
        Palette::Blues,
        Palette::BluesR,
        Palette::Tab10,
        Palette::Sinebow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::RdBu => "RdBu",
            Palette::RdBuR => "RdBu_r",
            Palette::BrBG => "BrBG",
            Palette::PuOr => "PuOr",
            Palette::PuOrR => "PuOr_r",
            Palette::Viridis => "viridis",
            Palette::Plasma => "plasma",
            Palette::Inferno => "inferno",
            Palette::Magma => "magma",
            Palette::Cividis => "cividis",
            Palette::Blues => "Blues",
            Palette::BluesR => "Blues_r",
            Palette::Tab10 => "tab10",
            Palette::Sinebow => "sinebow",
        }
    }

    /// Whether the palette is a discrete table rather than a gradient
    pub fn is_qualitative(&self) -> bool {
        matches!(self, Palette::Tab10)
    }

    /// Number of distinct table entries for qualitative palettes
    pub fn table_len(&self) -> Option<usize> {
        match self {
            Palette::Tab10 => Some(TAB10.len()),
            _ => None,
        }
    }

    fn is_reversed(&self) -> bool {
        matches!(self, Palette::RdBuR | Palette::PuOrR | Palette::BluesR)
    }

    fn gradient(&self) -> Option<colorgrad::Gradient> {
        let gradient = match self {
            Palette::RdBu | Palette::RdBuR => colorgrad::rd_bu(),
            Palette::BrBG => colorgrad::br_bg(),
            Palette::PuOr | Palette::PuOrR => colorgrad::pu_or(),
            Palette::Viridis => colorgrad::viridis(),
            Palette::Plasma => colorgrad::plasma(),
            Palette::Inferno => colorgrad::inferno(),
            Palette::Magma => colorgrad::magma(),
            Palette::Cividis => colorgrad::cividis(),
            Palette::Blues | Palette::BluesR => colorgrad::blues(),
            Palette::Sinebow => colorgrad::sinebow(),
            Palette::Tab10 => return None,
        };
        Some(gradient)
    }

    fn at(&self, gradient: Option<&colorgrad::Gradient>, value: f64) -> Rgba {
        let t = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match gradient {
            Some(g) => {
                let t = if self.is_reversed() { 1.0 - t } else { t };
                g.at(t).to_rgba8()
            }
            None => {
                let index = ((t * TAB10.len() as f64) as usize).min(TAB10.len() - 1);
                let [r, g, b] = TAB10[index];
                [r, g, b, 255]
            }
        }
    }

    /// The table entry at `index`, for qualitative palettes
    pub fn table_color(&self, index: usize) -> Option<Rgba> {
        match self {
            Palette::Tab10 => TAB10.get(index).map(|&[r, g, b]| [r, g, b, 255]),
            _ => None,
        }
    }
}

impl Colormap for Palette {
    fn map_normalized(&self, value: f64) -> Rgba {
        self.at(self.gradient().as_ref(), value)
    }

    fn name(&self) -> &str {
        self.as_str()
    }

    fn sample(&self, positions: &[f64]) -> Vec<Rgba> {
        let gradient = self.gradient();
        positions
            .iter()
            .map(|&p| self.at(gradient.as_ref(), p))
            .collect()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Palette {
    type Err = ClimplotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Palette::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ClimplotError::InvalidParameter {
                param: "colormap".to_string(),
                message: format!("Unknown colormap: {}", s),
            })
    }
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    Ok(Box::new(name.parse::<Palette>()?))
}

/// Recommended palettes for common climate variables
pub fn list_colormaps() -> Vec<(&'static str, Palette)> {
    vec![
        ("anomaly", Palette::RdBuR),
        ("temperature", Palette::RdBuR),
        ("precipitation", Palette::BrBG),
        ("ssh", Palette::RdBuR),
        ("wind", Palette::PuOrR),
        ("sequential", Palette::Viridis),
        ("ice", Palette::BluesR),
    ]
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when not opaque
pub fn to_hex(color: Rgba) -> String {
    let [r, g, b, a] = color;
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names_round_trip() {
        for palette in Palette::ALL {
            assert_eq!(palette.as_str().parse::<Palette>().unwrap(), palette);
        }
        assert_eq!("rdbu_R".parse::<Palette>().unwrap(), Palette::RdBuR);
        assert!("jet".parse::<Palette>().is_err());
    }

    #[test]
    fn test_get_colormap() {
        let cmap = get_colormap("viridis").unwrap();
        assert_eq!(cmap.name(), "viridis");
        assert!(get_colormap("nope").is_err());
    }

    #[test]
    fn test_reversed_palette_swaps_endpoints() {
        let forward = Palette::RdBu;
        let reversed = Palette::RdBuR;
        assert_eq!(forward.map_normalized(0.0), reversed.map_normalized(1.0));
        assert_eq!(forward.map_normalized(1.0), reversed.map_normalized(0.0));

        // RdBu_r puts red at the high end
        let high = reversed.map_normalized(1.0);
        assert!(high[0] > high[2]);
    }

    #[test]
    fn test_sample_matches_map_normalized() {
        let positions = [0.0, 0.25, 0.5, 0.75, 1.0];
        let sampled = Palette::Viridis.sample(&positions);
        for (p, c) in positions.iter().zip(&sampled) {
            assert_eq!(Palette::Viridis.map_normalized(*p), *c);
        }
    }

    #[test]
    fn test_tab10_table() {
        assert_eq!(Palette::Tab10.table_color(0), Some([31, 119, 180, 255]));
        assert_eq!(Palette::Tab10.table_color(10), None);
        assert_eq!(Palette::Tab10.map_normalized(1.0), [23, 190, 207, 255]);
    }

    #[test]
    fn test_list_colormaps() {
        let cmaps = list_colormaps();
        assert!(cmaps.iter().any(|(k, _)| *k == "anomaly"));
        assert!(cmaps.iter().any(|(k, _)| *k == "temperature"));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([255, 0, 16, 255]), "#ff0010");
        assert_eq!(to_hex([0, 0, 0, 128]), "#00000080");
    }
}
