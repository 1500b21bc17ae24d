//! Active region — the inset camera rectangle mapped onto the screen.

use serde::{Deserialize, Serialize};

use super::{ScreenPoint, Size};
use crate::hand::Landmark;

/// Inset from every camera frame edge, in pixels.
pub const FRAME_MARGIN: u32 = 100;

/// How points outside the active rectangle are mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionMapping {
    /// Pin to the screen edge (piecewise-linear interpolation).
    #[default]
    Clamp,
    /// Continue the linear map past the screen edge.
    Extrapolate,
}

/// The sub-rectangle of the camera frame that spans the whole screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRegion {
    pub frame: Size,
    pub margin: u32,
}

impl ActiveRegion {
    pub fn new(frame: Size, margin: u32) -> Self {
        Self { frame, margin }
    }

    /// Region with the default margin.
    pub fn for_frame(frame: Size) -> Self {
        Self::new(frame, FRAME_MARGIN)
    }

    /// Left, top, right, bottom edges in frame pixels.
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        let m = self.margin as i64;
        (
            m,
            m,
            self.frame.width as i64 - m,
            self.frame.height as i64 - m,
        )
    }

    /// Map a frame-space point onto a screen of the given size.
    pub fn map(&self, point: Landmark, screen: Size, mode: RegionMapping) -> ScreenPoint {
        let (left, top, right, bottom) = self.bounds();
        ScreenPoint {
            x: interp(point.x as f64, left as f64, right as f64, screen.width as f64, mode),
            y: interp(point.y as f64, top as f64, bottom as f64, screen.height as f64, mode),
        }
    }

    pub fn contains(&self, point: Landmark) -> bool {
        let (left, top, right, bottom) = self.bounds();
        let (x, y) = (point.x as i64, point.y as i64);
        x >= left && x <= right && y >= top && y <= bottom
    }
}

/// Map `v` from `[lo, hi]` onto `[0, out]`.
///
/// A collapsed input range (frame smaller than twice the margin) maps
/// everything to the middle of the output range.
fn interp(v: f64, lo: f64, hi: f64, out: f64, mode: RegionMapping) -> f64 {
    let span = hi - lo;
    if span <= 0.0 {
        return out / 2.0;
    }
    let mapped = (v - lo) / span * out;
    match mode {
        RegionMapping::Clamp => mapped.clamp(0.0, out),
        RegionMapping::Extrapolate => mapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> ActiveRegion {
        ActiveRegion::for_frame(Size::new(640, 480))
    }

    const SCREEN: Size = Size {
        width: 1920,
        height: 1080,
    };

    #[test]
    fn test_bounds() {
        assert_eq!(region().bounds(), (100, 100, 540, 380));
    }

    #[test]
    fn test_corners_map_to_screen_corners() {
        let r = region();
        let tl = r.map(Landmark::new(100, 100), SCREEN, RegionMapping::Clamp);
        assert_eq!(tl, ScreenPoint::new(0.0, 0.0));
        let br = r.map(Landmark::new(540, 380), SCREEN, RegionMapping::Clamp);
        assert_eq!(br, ScreenPoint::new(1920.0, 1080.0));
    }

    #[test]
    fn test_centre_maps_to_centre() {
        let p = region().map(Landmark::new(320, 240), SCREEN, RegionMapping::Clamp);
        assert!((p.x - 960.0).abs() < 1e-9);
        assert!((p.y - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_outside_region() {
        let p = region().map(Landmark::new(20, 460), SCREEN, RegionMapping::Clamp);
        assert_eq!(p, ScreenPoint::new(0.0, 1080.0));
    }

    #[test]
    fn test_extrapolate_outside_region() {
        let p = region().map(Landmark::new(78, 400), SCREEN, RegionMapping::Extrapolate);
        // 22 px left of the region at 1920/440 screen px per frame px.
        assert!((p.x - (-96.0)).abs() < 1e-9, "got {}", p.x);
        assert!(p.y > 1080.0);
    }

    #[test]
    fn test_collapsed_region_maps_to_middle() {
        let r = ActiveRegion::for_frame(Size::new(150, 150));
        let p = r.map(Landmark::new(10, 140), SCREEN, RegionMapping::Clamp);
        assert_eq!(p, ScreenPoint::new(960.0, 540.0));
    }

    #[test]
    fn test_contains() {
        let r = region();
        assert!(r.contains(Landmark::new(100, 100)));
        assert!(r.contains(Landmark::new(540, 380)));
        assert!(!r.contains(Landmark::new(99, 200)));
        assert!(!r.contains(Landmark::new(300, 381)));
    }
}
