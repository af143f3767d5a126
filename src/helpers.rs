//! Utility functions for ballthrow

use bevy::prelude::*;

use crate::ball::{BoundingBox, Bounds};

/// Center of a window-space box (origin top-left, y down) in Bevy world
/// space (origin at window center, y up)
pub fn window_to_world(bounding_box: &BoundingBox, bounds: &Bounds) -> Vec2 {
    let center_x = bounding_box.x + bounding_box.width / 2.0;
    let center_y = bounding_box.y + bounding_box.height / 2.0;
    Vec2::new(
        (center_x - bounds.width / 2.0) as f32,
        (bounds.height / 2.0 - center_y) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_to_world_flips_y() {
        let bounds = Bounds::new(1200.0, 800.0);
        let centered = BoundingBox {
            x: 575.0,
            y: 375.0,
            width: 50.0,
            height: 50.0,
        };
        assert_eq!(window_to_world(&centered, &bounds), Vec2::ZERO);

        let top_left = BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 50.0,
        };
        assert_eq!(window_to_world(&top_left, &bounds), Vec2::new(-575.0, 375.0));
    }
}
