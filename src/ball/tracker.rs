//! Cursor history ring buffer and throw-velocity estimate

use bevy::math::DVec2;
use bevy::prelude::*;

/// Fixed-capacity ring of recent pointer samples.
///
/// Capacity is `tracked + ignored_recent`. The newest `ignored_recent`
/// samples are left out of the velocity estimate so a pointer that stopped
/// just before release still throws.
#[derive(Debug, Clone)]
pub struct CursorHistory {
    samples: Box<[Vec2]>,
    /// Next slot to overwrite (also the oldest sample once full)
    write_index: usize,
    tracked: usize,
    ignored_recent: usize,
}

impl CursorHistory {
    /// `tracked` is raised to 2 so there is always at least one delta to average
    pub fn new(tracked: usize, ignored_recent: usize) -> Self {
        let tracked = tracked.max(2);
        let capacity = tracked + ignored_recent;
        Self {
            samples: vec![Vec2::ZERO; capacity].into_boxed_slice(),
            write_index: 0,
            tracked,
            ignored_recent,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Overwrite every slot with one sample (drag start), so early estimates read zero
    pub fn fill(&mut self, sample: Vec2) {
        self.samples.fill(sample);
        self.write_index = 0;
    }

    /// Store a sample in the oldest slot and advance
    pub fn record_sample(&mut self, x: f32, y: f32) {
        self.samples[self.write_index] = Vec2::new(x, y);
        self.write_index = (self.write_index + 1) % self.capacity();
    }

    /// Most recently recorded sample
    pub fn latest(&self) -> Vec2 {
        let capacity = self.capacity();
        self.samples[(self.write_index + capacity - 1) % capacity]
    }

    /// Samples oldest to newest
    pub fn iter_chronological(&self) -> impl Iterator<Item = Vec2> + '_ {
        let capacity = self.capacity();
        (0..capacity).map(move |offset| self.samples[(self.write_index + offset) % capacity])
    }

    /// Average per-tick displacement over the tracked window, scaled by `throw_scalar`.
    ///
    /// Walks back from the newest non-ignored sample summing consecutive
    /// deltas until it reaches the oldest slot; the wrap seam between the
    /// oldest and newest sample is never counted.
    pub fn estimate_velocity(&self, throw_scalar: f64) -> DVec2 {
        let capacity = self.capacity();
        let deltas = self.tracked - 1;
        let start = (self.write_index + capacity - self.ignored_recent - 1) % capacity;

        let mut accum = DVec2::ZERO;
        let mut index = start;
        for _ in 0..deltas {
            let prev = (index + capacity - 1) % capacity;
            accum += (self.samples[index] - self.samples[prev]).as_dvec2();
            index = prev;
        }

        let velocity = accum / deltas as f64 * throw_scalar;
        trace!(
            "Estimated throw velocity ({:.2}, {:.2}) from {} deltas",
            velocity.x, velocity.y, deltas
        );
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).length() < 1e-4,
            "Expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_write_index_wraps() {
        let mut history = CursorHistory::new(10, 2);
        assert_eq!(history.capacity(), 12);
        for i in 0..12 {
            assert_eq!(history.write_index(), i);
            history.record_sample(i as f32, 0.0);
        }
        assert_eq!(history.write_index(), 0);
        history.record_sample(99.0, 0.0);
        assert_eq!(history.write_index(), 1);
    }

    #[test]
    fn test_keeps_last_capacity_samples_in_order() {
        let mut history = CursorHistory::new(10, 2);
        let k = 5;
        for i in 0..(12 + k) {
            history.record_sample(i as f32, -(i as f32));
        }
        let samples: Vec<Vec2> = history.iter_chronological().collect();
        let expected: Vec<Vec2> = (k..12 + k)
            .map(|i| Vec2::new(i as f32, -(i as f32)))
            .collect();
        assert_eq!(samples, expected);
    }

    #[test]
    fn test_identical_samples_give_zero() {
        let mut history = CursorHistory::new(10, 2);
        for _ in 0..30 {
            history.record_sample(200.0, 150.0);
        }
        assert_eq!(history.estimate_velocity(1.5), DVec2::ZERO);
    }

    #[test]
    fn test_constant_delta_gives_scaled_delta() {
        for extra in 0..13 {
            let mut history = CursorHistory::new(10, 2);
            for i in 0..(12 + extra) {
                history.record_sample(100.0 + 4.0 * i as f32, 300.0 - 2.0 * i as f32);
            }
            assert_close(history.estimate_velocity(1.5), DVec2::new(6.0, -3.0));
        }
    }

    #[test]
    fn test_ignores_recent_stop() {
        let mut history = CursorHistory::new(10, 2);
        for i in 0..10 {
            history.record_sample(10.0 * i as f32, 0.0);
        }
        // Pointer halts for the last two ticks before release
        history.record_sample(90.0, 0.0);
        history.record_sample(90.0, 0.0);
        assert_close(history.estimate_velocity(1.0), DVec2::new(10.0, 0.0));
    }

    #[test]
    fn test_sum_matches_endpoint_difference() {
        // Uneven deltas: accumulated sum must equal newest-tracked minus oldest
        let mut history = CursorHistory::new(10, 2);
        let xs = [0.0, 1.0, 5.0, 6.0, 20.0, 21.0, 21.5, 40.0, 41.0, 60.0, 61.0, 70.0, 72.0, 90.0];
        for x in xs {
            history.record_sample(x, x * 0.5);
        }
        let samples: Vec<Vec2> = history.iter_chronological().collect();
        let newest_tracked = samples[samples.len() - 1 - 2];
        let expected = (newest_tracked - samples[0]).as_dvec2() / 9.0;
        assert_close(history.estimate_velocity(1.0), expected);
    }

    #[test]
    fn test_fill_resets() {
        let mut history = CursorHistory::new(10, 2);
        for i in 0..7 {
            history.record_sample(i as f32 * 50.0, 0.0);
        }
        history.fill(Vec2::new(5.0, 5.0));
        assert_eq!(history.write_index(), 0);
        assert_eq!(history.estimate_velocity(1.5), DVec2::ZERO);
        assert!(history.iter_chronological().all(|s| s == Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_latest_follows_wrap() {
        let mut history = CursorHistory::new(2, 1);
        for i in 0..4 {
            history.record_sample(i as f32, 0.0);
        }
        assert_eq!(history.write_index(), 1);
        assert_eq!(history.latest(), Vec2::new(3.0, 0.0));
        history.fill(Vec2::new(9.0, 9.0));
        assert_eq!(history.latest(), Vec2::new(9.0, 9.0));
    }

    #[test]
    fn test_tiny_window_is_clamped() {
        let mut history = CursorHistory::new(0, 0);
        assert_eq!(history.capacity(), 2);
        history.record_sample(0.0, 0.0);
        history.record_sample(3.0, 1.0);
        assert_close(history.estimate_velocity(1.0), DVec2::new(3.0, 1.0));
    }
}
