//! Floor-plan coordinates.
//!
//! Positions are metres in a per-floor 2-D plane.  `f32` is plenty for
//! building-scale plans and matches the edge-length storage in the graph.

/// A point on a floor plan, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in metres.
    #[inline]
    pub fn distance_m(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Parameter in `[0, 1]` of the closest point to `self` on the segment
    /// `a → b`.  Degenerate segments project onto `a` (parameter 0).
    pub fn project_onto(self, a: Point, b: Point) -> f32 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let len2 = abx * abx + aby * aby;
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        let t = ((self.x - a.x) * abx + (self.y - a.y) * aby) / len2;
        t.clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
