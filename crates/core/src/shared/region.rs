use serde::{Deserialize, Serialize};

/// An axis-aligned face box in pixel coordinates, top-left origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Detector score in `[0, 1]`.
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32, confidence: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Saturates instead of overflowing on out-of-range boxes.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    /// Intersects the region with a `frame_w` x `frame_h` frame.
    ///
    /// Width and height collapse to zero when the region lies fully outside.
    pub fn clamp_to(&self, frame_w: u32, frame_h: u32) -> Region {
        let x1 = self.x.clamp(0, frame_w as i32);
        let y1 = self.y.clamp(0, frame_h as i32);
        let x2 = self.right().clamp(0, frame_w as i32);
        let y2 = self.bottom().clamp(0, frame_h as i32);
        Region {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
            confidence: self.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_area() {
        let r = Region::new(10, 20, 30, 40, 0.9);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.area(), 1200);
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        let r = Region::new(10, 10, 20, 20, 0.9);
        assert_eq!(r.clamp_to(100, 100), r);
    }

    #[test]
    fn test_clamp_cuts_overhang() {
        let r = Region::new(-10, 90, 30, 30, 0.9);
        let c = r.clamp_to(100, 100);
        assert_eq!((c.x, c.y, c.width, c.height), (0, 90, 20, 10));
    }

    #[test]
    fn test_clamp_outside_collapses() {
        let r = Region::new(150, 150, 30, 30, 0.9);
        let c = r.clamp_to(100, 100);
        assert_eq!(c.width, 0);
        assert_eq!(c.height, 0);
        assert_eq!(c.area(), 0);
    }

    #[test]
    fn test_clamp_saturates_huge_box() {
        let r = Region::new(100, 100, i32::MAX, i32::MAX, 0.9);
        assert_eq!(r.right(), i32::MAX);
        let c = r.clamp_to(640, 480);
        assert_eq!((c.x, c.y, c.width, c.height), (100, 100, 540, 380));
    }

    #[test]
    fn test_deserialize_defaults_confidence() {
        let r: Region = serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(r.confidence, 1.0);
    }
}
