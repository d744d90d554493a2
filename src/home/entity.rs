use super::dispatch::SlotIndex;
use super::transition::{Direction, Transition};
use super::{HOVER_GROWTH_CAP, HOVER_GROWTH_RATE};
use crate::geometry::Point;
use gdk_pixbuf::Pixbuf;
use std::time::Instant;

/// A drawable, hit-testable circle: the main button or one app icon on the ring.
#[derive(Clone)]
pub struct CircleEntity {
    pub slot: SlotIndex,
    pub center: Point,
    pub image: Option<Pixbuf>,
    radius: f64,
    rendered_radius: f64,
    is_main: bool,
    final_position: Point,
    hub: Point,
    hover_since: Option<Instant>,
    transition: Option<Transition>,
}

impl CircleEntity {
    pub fn main(center: Point, radius: f64) -> Self {
        Self {
            slot: SlotIndex::MAIN,
            center,
            image: None,
            radius,
            rendered_radius: radius,
            is_main: true,
            final_position: center,
            hub: center,
            hover_since: None,
            transition: None,
        }
    }

    /// Satellites start collapsed at the hub.
    pub fn satellite(slot: SlotIndex, hub: Point, ring_point: Point, radius: f64) -> Self {
        Self {
            slot,
            center: hub,
            image: None,
            radius,
            rendered_radius: radius,
            is_main: false,
            final_position: ring_point,
            hub,
            hover_since: None,
            transition: None,
        }
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn rendered_radius(&self) -> f64 {
        self.rendered_radius
    }

    pub fn final_position(&self) -> Point {
        self.final_position
    }

    pub fn hub(&self) -> Point {
        self.hub
    }

    pub fn hover_since(&self) -> Option<Instant> {
        self.hover_since
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn start_transition(&mut self, now: Instant, direction: Direction) {
        self.transition = Some(Transition::new(now, direction));
    }

    pub fn advance(&mut self, now: Instant) {
        if let Some(transition) = self.transition {
            if transition.is_complete(now) {
                self.center = transition.resting(self.hub, self.final_position);
                self.transition = None;
            } else {
                self.center = transition.position(self.hub, self.final_position, now);
            }
        }

        let growth = self.hover_since.map_or(0.0, |since| {
            let hovered = now.saturating_duration_since(since).as_secs_f64();
            (hovered * HOVER_GROWTH_RATE).min(self.radius * HOVER_GROWTH_CAP)
        });
        self.rendered_radius = self.radius + growth;
    }

    /// Uses the base radius; hover growth never enlarges the clickable area.
    pub fn hit_test(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    pub fn hover(&mut self, point: Point, now: Instant, visible: bool) {
        if visible && self.hit_test(point) {
            self.hover_since.get_or_insert(now);
        } else {
            self.clear_hover();
        }
    }

    pub fn clear_hover(&mut self) {
        self.hover_since = None;
    }

    pub fn is_drawn(&self, ring_expanded: bool) -> bool {
        self.is_main || ring_expanded || self.is_animating()
    }
}
