//! Fixed-size drawing surface every mask and placement is expressed against

use crate::io::error::{Result, invalid_parameter};
use serde::{Deserialize, Serialize};

/// Width and height in pixels of the collage surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Canvas {
    /// Create a canvas, rejecting zero-sized dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{width}x{height}"),
                &"both dimensions must be positive",
            ));
        }
        Ok(Self { width, height })
    }

    /// Check if a point lies on the canvas
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Smaller of the two dimensions
    pub fn min_dimension(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Center point, rounded down
    pub const fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    /// Number of pixels on the canvas
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Canvas {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = parse_dimensions(s)?;
        Self::new(w, h).map_err(|e| e.to_string())
    }
}

/// Parse `WIDTHxHEIGHT` into a pair of positive integers
///
/// # Errors
///
/// Returns a message if the text is not two integers separated by `x`
pub fn parse_dimensions(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid width '{w}': {e}"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid height '{h}': {e}"))?;
    Ok((width, height))
}
