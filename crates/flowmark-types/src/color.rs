//! Presentation colors attached to workflow states.
//!
//! The core never interprets a [`Color`]; it is carried through mutations and
//! storage untouched. Renderers may use [`Color::rgb`] and
//! [`Color::contrast_text`] to draw a readable chip.

use std::fmt;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Muted colors offered for newly created states.
pub const PALETTE: [&str; 15] = [
    "#2D3748", // dark slate blue
    "#5B2B8F", // rich purple
    "#1B4D89", // deep navy
    "#206A6B", // dark teal
    "#2D5A27", // forest green
    "#8B4513", // saddle brown
    "#8B2635", // dark crimson
    "#614051", // deep mauve
    "#4A5D7B", // steel blue
    "#3D6B4F", // pine green
    "#755C3B", // warm brown
    "#6B4E71", // dusty purple
    "#2B6B6B", // deep cyan
    "#744139", // rustic red
    "#4B692F", // olive drab
];

const DARK_TEXT: &str = "#2D3748";
const LIGHT_TEXT: &str = "#FFFFFF";

/// An opaque color token, usually a `#rrggbb` hex string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Wrap any color token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Palette entry at `index`, wrapping around the palette length.
    pub fn from_palette(index: usize) -> Self {
        Self::new(PALETTE[index % PALETTE.len()])
    }

    /// A random palette entry.
    pub fn random_pretty() -> Self {
        let pick = PALETTE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(PALETTE[0]);
        Self::new(pick)
    }

    /// Parse a `#rrggbb` token into its channels.
    ///
    /// Returns `None` for anything that is not a six-digit hex color.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Text color that stays readable on top of this color.
    ///
    /// Bright backgrounds (relative luminance above one half) get dark text;
    /// everything else, including unparsable tokens, gets white text.
    pub fn contrast_text(&self) -> Color {
        let Some((r, g, b)) = self.rgb() else {
            return Color::new(LIGHT_TEXT);
        };
        let luminance =
            (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
        if luminance > 0.5 {
            Color::new(DARK_TEXT)
        } else {
            Color::new(LIGHT_TEXT)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Color {
    fn from(token: String) -> Self {
        Self(token)
    }
}
