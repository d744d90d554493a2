use super::dispatch::SlotIndex;
use super::entity::CircleEntity;
use crate::config::LayoutConfig;
use crate::geometry::Point;

/// Main button at index 0, then `satellites` icons at equal angular steps
/// starting at angle 0, all collapsed at the hub.
pub fn build(layout: &LayoutConfig, screen_center: Point) -> Vec<CircleEntity> {
    let angle_step = 360.0 / layout.satellites as f64;

    std::iter::once(CircleEntity::main(screen_center, layout.main_radius))
        .chain((0..layout.satellites).map(|i| {
            let angle = (angle_step * i as f64).to_radians();
            CircleEntity::satellite(
                SlotIndex::new(i + 1),
                screen_center,
                screen_center.on_ring(angle, layout.ring_distance),
                layout.satellite_radius,
            )
        }))
        .collect()
}
