//! The fixed shape color palette.

use super::ShapeError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brightness factor applied when drawing a selected shape.
const DARKEN_FACTOR: f64 = 0.7;

/// A palette color. The textual tokens are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Black,
    Cyan,
}

impl Color {
    /// Every color a shape can take, in menu order.
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Black,
        Color::Cyan,
    ];

    /// Token used in scene files.
    pub fn token(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Black => "BLACK",
            Color::Cyan => "CYAN",
        }
    }

    /// RGB components.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Green => (0, 255, 0),
            Color::Yellow => (255, 255, 0),
            Color::Black => (0, 0, 0),
            Color::Cyan => (0, 255, 255),
        }
    }

    /// Get the color as an opaque peniko Color.
    pub fn to_peniko(self) -> peniko::Color {
        let (r, g, b) = self.rgb();
        peniko::Color::from_rgba8(r, g, b, 255)
    }

    /// Darkened variant used to highlight selected shapes.
    pub fn darker(self) -> peniko::Color {
        let (r, g, b) = self.rgb();
        let darken = |c: u8| (c as f64 * DARKEN_FACTOR) as u8;
        peniko::Color::from_rgba8(darken(r), darken(g), darken(b), 255)
    }

    /// Pick a palette color uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PALETTE[rng.random_range(0..Self::PALETTE.len())]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Color {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PALETTE
            .into_iter()
            .find(|c| c.token() == s)
            .ok_or_else(|| ShapeError::UnsupportedColor(s.to_string()))
    }
}
