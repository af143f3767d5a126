//! Ball physics: fixed-step Euler integration and window-edge bounces
//!
//! One substep per tick, so a fast enough ball can skip past an edge in a
//! single tick. Bounce factors are fixed per edge and ignore impact angle.

use bevy::math::DVec2;

use crate::ball::components::{Ball, Bounds, Edge};
use crate::constants::EDGE_CLAMP_MARGIN;
use crate::tuning::{BallTuning, RestingMode};

impl Ball {
    /// Free tick: gravity, integration, then boundary resolution
    pub fn step_free(&mut self, bounds: &Bounds, tuning: &BallTuning) -> Option<Edge> {
        self.integrate(tuning.gravity);
        self.resolve_boundary_collision(bounds, tuning)
    }

    /// Apply gravity to vy, then move by velocity
    pub fn integrate(&mut self, gravity: f64) {
        self.velocity.y += gravity;
        self.position += self.velocity;
    }

    /// Drive the ball directly (drag gesture); bypasses integration
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }

    /// Resolve at most one edge per tick, checked right, left, bottom, top
    pub fn resolve_boundary_collision(
        &mut self,
        bounds: &Bounds,
        tuning: &BallTuning,
    ) -> Option<Edge> {
        let size = self.size;

        if self.position.x + size >= bounds.width {
            self.velocity.x *= -tuning.wall_restitution;
            self.position.x = bounds.width - size - EDGE_CLAMP_MARGIN;
            Some(Edge::Right)
        } else if self.position.x <= 0.0 {
            self.velocity.x *= -tuning.wall_restitution;
            self.position.x = EDGE_CLAMP_MARGIN;
            Some(Edge::Left)
        } else if self.position.y + size >= bounds.height {
            self.floor_bounce(tuning);
            self.position.y = bounds.height - size - EDGE_CLAMP_MARGIN;
            Some(Edge::Bottom)
        } else if self.position.y <= 0.0 {
            self.velocity.y *= -tuning.wall_restitution;
            self.position.y = EDGE_CLAMP_MARGIN;
            Some(Edge::Top)
        } else {
            None
        }
    }

    fn floor_bounce(&mut self, tuning: &BallTuning) {
        self.velocity.y *= -tuning.floor_restitution;
        match tuning.resting_mode {
            RestingMode::Friction => {
                self.velocity.x *= tuning.floor_friction;
            }
            RestingMode::SlideThreshold { threshold } => {
                if self.velocity.y.abs() < threshold {
                    self.velocity.y = 0.0;
                    self.velocity.x *= tuning.floor_friction;
                }
            }
        }
    }

    /// Sitting on the floor with no more than one tick of gravity bounce left
    /// and horizontal speed under `speed`
    pub fn is_resting(&self, bounds: &Bounds, tuning: &BallTuning, speed: f64) -> bool {
        let floor_y = bounds.height - self.size - EDGE_CLAMP_MARGIN;
        floor_y - self.position.y <= tuning.gravity
            && self.velocity.y.abs() <= tuning.gravity
            && self.velocity.x.abs() < speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(1200.0, 800.0)
    }

    #[test]
    fn test_gravity_before_collision() {
        let mut ball = Ball::new(DVec2::new(300.0, 300.0), DVec2::new(4.0, -2.0), 50.0);
        ball.integrate(3.0);
        assert_eq!(ball.velocity, DVec2::new(4.0, 1.0));
        assert_eq!(ball.position, DVec2::new(304.0, 301.0));
    }

    #[test]
    fn test_center_start_single_tick() {
        // 600 + 20 = 620, 400 + (5 + 3) = 408; nowhere near an edge
        let mut ball = Ball::new(DVec2::new(600.0, 400.0), DVec2::new(20.0, 5.0), 50.0);
        let edge = ball.step_free(&bounds(), &BallTuning::default());
        assert_eq!(edge, None);
        assert_eq!(ball.position, DVec2::new(620.0, 408.0));
        assert_eq!(ball.velocity, DVec2::new(20.0, 8.0));
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = Ball::new(DVec2::new(1160.0, 300.0), DVec2::new(10.0, 0.0), 50.0);
        let edge = ball.resolve_boundary_collision(&bounds(), &BallTuning::default());
        assert_eq!(edge, Some(Edge::Right));
        assert_eq!(ball.position.x, 1200.0 - 50.0 - 1.0);
        assert!((ball.velocity.x - -9.0).abs() < 1e-9);
        assert_eq!(ball.velocity.y, 0.0);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = Ball::new(DVec2::new(-3.0, 300.0), DVec2::new(-10.0, 2.0), 50.0);
        let edge = ball.resolve_boundary_collision(&bounds(), &BallTuning::default());
        assert_eq!(edge, Some(Edge::Left));
        assert_eq!(ball.position.x, 1.0);
        assert!((ball.velocity.x - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_bounce_applies_friction() {
        let mut ball = Ball::new(DVec2::new(500.0, 760.0), DVec2::new(10.0, 20.0), 50.0);
        let edge = ball.resolve_boundary_collision(&bounds(), &BallTuning::default());
        assert_eq!(edge, Some(Edge::Bottom));
        assert_eq!(ball.position.y, 800.0 - 50.0 - 1.0);
        assert!((ball.velocity.y - -16.0).abs() < 1e-9);
        assert!((ball.velocity.x - 9.7).abs() < 1e-9);
    }

    #[test]
    fn test_top_bounce() {
        let mut ball = Ball::new(DVec2::new(500.0, -5.0), DVec2::new(1.0, -10.0), 50.0);
        let edge = ball.resolve_boundary_collision(&bounds(), &BallTuning::default());
        assert_eq!(edge, Some(Edge::Top));
        assert_eq!(ball.position.y, 1.0);
        assert!((ball.velocity.y - 9.0).abs() < 1e-9);
        assert_eq!(ball.velocity.x, 1.0);
    }

    #[test]
    fn test_corner_only_first_edge_applies() {
        // Past both right and bottom: right wins, bottom untouched this tick
        let mut ball = Ball::new(DVec2::new(1190.0, 790.0), DVec2::new(5.0, 5.0), 50.0);
        let edge = ball.resolve_boundary_collision(&bounds(), &BallTuning::default());
        assert_eq!(edge, Some(Edge::Right));
        assert_eq!(ball.position.y, 790.0);
        assert_eq!(ball.velocity.y, 5.0);
    }

    #[test]
    fn test_slide_threshold_mode_zeroes_small_bounce() {
        let tuning = BallTuning {
            resting_mode: RestingMode::SlideThreshold { threshold: 4.0 },
            ..Default::default()
        };
        let mut ball = Ball::new(DVec2::new(500.0, 760.0), DVec2::new(10.0, 3.0), 50.0);
        ball.resolve_boundary_collision(&bounds(), &tuning);
        assert_eq!(ball.velocity.y, 0.0);
        assert!((ball.velocity.x - 9.7).abs() < 1e-9);

        // Big bounce keeps vx untouched in this mode
        let mut ball = Ball::new(DVec2::new(500.0, 760.0), DVec2::new(10.0, 30.0), 50.0);
        ball.resolve_boundary_collision(&bounds(), &tuning);
        assert!((ball.velocity.y - -24.0).abs() < 1e-9);
        assert_eq!(ball.velocity.x, 10.0);
    }

    #[test]
    fn test_settles_on_floor() {
        let bounds = bounds();
        let tuning = BallTuning::default();
        let mut ball = Ball::new(DVec2::new(600.0, 100.0), DVec2::new(0.0, 0.0), 50.0);
        let floor_y = bounds.height - ball.size - EDGE_CLAMP_MARGIN;

        for _ in 0..3000 {
            ball.step_free(&bounds, &tuning);
            assert!(ball.position.y + ball.size < bounds.height);
        }
        // vy cycles at -4/3: each tick reaches the floor and is clamped back
        for _ in 0..3 {
            assert_eq!(ball.step_free(&bounds, &tuning), Some(Edge::Bottom));
            assert!((ball.position.y - floor_y).abs() < 1e-9);
            assert!((ball.velocity.y - -4.0 / 3.0).abs() < 1e-9);
            assert!(ball.velocity.x.abs() < 1e-6);
        }
        assert!(ball.is_resting(&bounds, &tuning, 0.5));
    }

    #[test]
    fn test_floor_two_tick_cycle() {
        let bounds = bounds();
        let tuning = BallTuning::default();
        let mut ball = Ball::new(DVec2::new(600.0, 400.0), DVec2::new(8.0, -10.0), 50.0);
        let floor_y = bounds.height - ball.size - EDGE_CLAMP_MARGIN;

        for _ in 0..598 {
            ball.step_free(&bounds, &tuning);
        }
        // Alternates between a floor hit at the clamp and a tick a third of a pixel above it
        for _ in 0..2 {
            assert_eq!(ball.step_free(&bounds, &tuning), None);
            assert!((ball.position.y - (floor_y + 1.0 / 3.0)).abs() < 1e-6);
            assert_eq!(ball.step_free(&bounds, &tuning), Some(Edge::Bottom));
            assert!((ball.position.y - floor_y).abs() < 1e-9);
            assert!((ball.velocity.y - -8.0 / 3.0).abs() < 1e-6);
        }
        assert!(ball.velocity.x.abs() < 0.01);
        assert!(ball.is_resting(&bounds, &tuning, 0.5));
    }

    #[test]
    fn test_nan_position_does_not_panic() {
        let mut ball = Ball::new(DVec2::new(f64::NAN, 10.0), DVec2::ZERO, f64::NAN);
        let _ = ball.step_free(&bounds(), &BallTuning::default());
    }

    #[test]
    fn test_set_position() {
        let mut ball = Ball::new(DVec2::ZERO, DVec2::new(3.0, 3.0), 50.0);
        ball.set_position(12.5, 40.0);
        assert_eq!(ball.position, DVec2::new(12.5, 40.0));
        assert_eq!(ball.velocity, DVec2::new(3.0, 3.0));
    }
}
