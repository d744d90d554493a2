#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `to`. `t` is not clamped.
    pub fn lerp(&self, to: Point, t: f64) -> Point {
        Point::new(
            (1.0 - t) * self.x + t * to.x,
            (1.0 - t) * self.y + t * to.y,
        )
    }

    pub fn on_ring(&self, angle: f64, distance: f64) -> Point {
        Point::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}
