//! Pointer motion — camera-to-screen mapping and cursor smoothing.

pub mod region;
pub mod smoother;

use serde::{Deserialize, Serialize};

pub use region::{ActiveRegion, RegionMapping};
pub use smoother::CursorSmoother;

/// A continuous point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest integer pixel, as handed to the pointer backend.
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Screen or frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a "WxH" resolution string. Returns None unless both sides are
    /// positive integers.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.split_once('x')?;
        let width = w.trim().parse::<u32>().ok()?;
        let height = h.trim().parse::<u32>().ok()?;
        if width > 0 && height > 0 {
            Some(Self { width, height })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(Size::parse("1920x1080"), Some(Size::new(1920, 1080)));
        assert_eq!(Size::parse("0x1080"), None);
        assert_eq!(Size::parse("1920"), None);
        assert_eq!(Size::parse("axb"), None);
        assert_eq!(Size::parse("1x2x3"), None);
    }

    #[test]
    fn test_size_display() {
        assert_eq!(Size::new(640, 480).to_string(), "640x480");
    }

    #[test]
    fn test_to_pixel_rounds() {
        assert_eq!(ScreenPoint::new(10.4, 10.6).to_pixel(), (10, 11));
    }
}
