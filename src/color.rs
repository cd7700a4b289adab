//! Terminal palette types and conversions.

use crate::Vector3;
use colorsys::{Hsl, Rgb};
use nalgebra as na;

/// Fixed terminal block palette.
///
/// Each variant carries the SGR background color code it selects, so a cell
/// painted with a [`TermColor`] and displayed as a space character shows up as
/// a solid block of that color. The discriminants are the wire codes; only
/// this small block of the 8-bit code space is covered.
///
/// Wider palettes (bright variants, 256-color) would slot in through
/// [`TermColor::code`] and [`TermColor::from_code`], but are not mapped yet.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermColor {
    Black = 40,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl TermColor {
    /// SGR code selecting this color.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TermColor::code`]. Codes outside the palette block yield
    /// `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            40 => Some(Self::Black),
            41 => Some(Self::Red),
            42 => Some(Self::Green),
            43 => Some(Self::Yellow),
            44 => Some(Self::Blue),
            45 => Some(Self::Magenta),
            46 => Some(Self::Cyan),
            47 => Some(Self::White),
            _ => None,
        }
    }

    /// Nearest palette entry for an RGB color with components in `0..=1`.
    ///
    /// Classification runs on hue rather than raw RGB distance: desaturated
    /// input collapses to black or white by luma, anything else picks the
    /// 60 degree hue sector it falls into. The palette has no grays, so
    /// mid-gray input lands on white.
    pub fn approximate(rgb: Vector3) -> Self {
        let scaled = rgb * 255.0;
        let hsl = Hsl::from(&Rgb::new(
            scaled.x.clamp(0.0, 255.0) as f64,
            scaled.y.clamp(0.0, 255.0) as f64,
            scaled.z.clamp(0.0, 255.0) as f64,
            None,
        ));

        if hsl.saturation() < 25.0 {
            let luma = rgb.dot(&na::vector![0.21, 0.72, 0.07]);
            if luma < 0.5 {
                Self::Black
            } else {
                Self::White
            }
        } else {
            const HUE_ORDER: [TermColor; 6] = [
                TermColor::Red,
                TermColor::Yellow,
                TermColor::Green,
                TermColor::Cyan,
                TermColor::Blue,
                TermColor::Magenta,
            ];
            let sector = ((hsl.hue() + 30.0) / 60.0) as usize % 6;
            HUE_ORDER[sector]
        }
    }
}

#[cfg(feature = "crossterm")]
impl From<TermColor> for crossterm::style::Color {
    fn from(v: TermColor) -> Self {
        use crossterm::style::Color::*;

        // The palette block maps to the standard (non-bright) colors.
        match v {
            TermColor::Black => Black,
            TermColor::Red => DarkRed,
            TermColor::Green => DarkGreen,
            TermColor::Yellow => DarkYellow,
            TermColor::Blue => DarkBlue,
            TermColor::Magenta => DarkMagenta,
            TermColor::Cyan => DarkCyan,
            TermColor::White => Grey,
        }
    }
}
