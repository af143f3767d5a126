//! Ball-related data

use bevy::math::DVec2;
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::BallTuning;

/// Marker for the sprite entity that mirrors the simulated ball
#[derive(Component)]
pub struct BallSprite;

/// Window bounds the ball collides with (window coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned box handed to the shell for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Window edge hit during boundary resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Right,
    Left,
    Bottom,
    Top,
}

impl Edge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Right => "Right",
            Edge::Left => "Left",
            Edge::Bottom => "Bottom",
            Edge::Top => "Top",
        }
    }
}

/// The simulated ball. `position` is the top-left of its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: DVec2,
    /// Pixels per tick
    pub velocity: DVec2,
    /// Edge length of the square bounding box
    pub size: f64,
}

impl Ball {
    pub fn new(position: DVec2, velocity: DVec2, size: f64) -> Self {
        Self {
            position,
            velocity,
            size,
        }
    }

    /// Place a ball at the window center with a random launch velocity
    pub fn spawn(bounds: &Bounds, size: f64, tuning: &BallTuning, rng: &mut impl Rng) -> Self {
        let (vx_lo, vx_hi) = tuning.initial_vx_range;
        let (vy_lo, vy_hi) = tuning.initial_vy_range;
        let velocity = DVec2::new(sample_range(rng, vx_lo, vx_hi), sample_range(rng, vy_lo, vy_hi));
        debug!("Spawned ball with velocity ({:.2}, {:.2})", velocity.x, velocity.y);
        Self::new(bounds.center(), velocity, size)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x: self.position.x,
            y: self.position.y,
            width: self.size,
            height: self.size,
        }
    }
}

/// Uniform sample that tolerates an empty range
fn sample_range(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    if lo < hi { rng.gen_range(lo..=hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_is_centered_and_in_range() {
        let bounds = Bounds::new(1200.0, 800.0);
        let tuning = BallTuning::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let ball = Ball::spawn(&bounds, 50.0, &tuning, &mut rng);
            assert_eq!(ball.position, DVec2::new(600.0, 400.0));
            assert!(ball.velocity.x >= tuning.initial_vx_range.0);
            assert!(ball.velocity.x <= tuning.initial_vx_range.1);
            assert!(ball.velocity.y >= tuning.initial_vy_range.0);
            assert!(ball.velocity.y <= tuning.initial_vy_range.1);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let bounds = Bounds::new(1200.0, 800.0);
        let tuning = BallTuning::default();
        let a = Ball::spawn(&bounds, 50.0, &tuning, &mut StdRng::seed_from_u64(99));
        let b = Ball::spawn(&bounds, 50.0, &tuning, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_with_degenerate_range() {
        let bounds = Bounds::new(1200.0, 800.0);
        let tuning = BallTuning {
            initial_vx_range: (4.0, 4.0),
            initial_vy_range: (-1.0, -1.0),
            ..Default::default()
        };
        let ball = Ball::spawn(&bounds, 50.0, &tuning, &mut StdRng::seed_from_u64(1));
        assert_eq!(ball.velocity, DVec2::new(4.0, -1.0));
    }
}
