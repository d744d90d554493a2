use crate::geometry::Point;
use std::time::{Duration, Instant};

pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Appearing,
    Disappearing,
}

impl Direction {
    pub fn from_expanded(expanded: bool) -> Self {
        if expanded {
            Self::Appearing
        } else {
            Self::Disappearing
        }
    }
}

/// Linear move between the hub and a resting point over `TRANSITION_DURATION`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub started: Instant,
    pub direction: Direction,
}

impl Transition {
    pub fn new(started: Instant, direction: Direction) -> Self {
        Self { started, direction }
    }

    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / TRANSITION_DURATION.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn position(&self, hub: Point, rest: Point, now: Instant) -> Point {
        let t = self.progress(now);
        match self.direction {
            Direction::Appearing => hub.lerp(rest, t),
            Direction::Disappearing => rest.lerp(hub, t),
        }
    }

    /// Where the entity settles once the transition is over.
    pub fn resting(&self, hub: Point, rest: Point) -> Point {
        match self.direction {
            Direction::Appearing => rest,
            Direction::Disappearing => hub,
        }
    }
}
