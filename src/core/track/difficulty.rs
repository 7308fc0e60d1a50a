//=========================================================================
// Difficulty Curve
//=========================================================================
//
// Distance-derived difficulty level.
//
//   level = floor(forward / level_interval) + 1
//
// Two readings:
//   clamped    → [1, rank_max], drives spacing and the HUD
//   unclamped  → [1, ∞), drives speed-ups past the displayed maximum
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::config::TrackConfig;

//=== DifficultyCurve =====================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyCurve {
    level_interval: f32,
    rank_max: u32,
}

impl DifficultyCurve {
    /// Creates a curve. `level_interval` must be positive and `rank_max`
    /// at least 1 (see `RunnerConfig::validate`).
    pub fn new(level_interval: f32, rank_max: u32) -> Self {
        Self {
            level_interval,
            rank_max: rank_max.max(1),
        }
    }

    pub fn from_config(config: &TrackConfig) -> Self {
        Self::new(config.level_interval, config.level_rank_max)
    }

    pub fn rank_max(&self) -> u32 {
        self.rank_max
    }

    /// Level without the upper clamp. Never below 1.
    pub fn level_unclamped(&self, forward: f32) -> u32 {
        let steps = (forward / self.level_interval).floor();
        if steps.is_nan() || steps <= 0.0 {
            return 1;
        }
        // Float → int casts saturate
        (steps as u32).saturating_add(1)
    }

    /// Level clamped to `[1, rank_max]`.
    pub fn level(&self, forward: f32) -> u32 {
        self.level_unclamped(forward).min(self.rank_max)
    }

    /// Extra forward gap added after an obstacle segment at `level`.
    ///
    /// `interval / rank_max * (rank_max - level)`: strictly decreasing in
    /// the level and zero at the maximum rank.
    pub fn obstacle_extra_spacing(&self, level: u32, obstacle_interval: f32) -> f32 {
        let level = level.clamp(1, self.rank_max);
        obstacle_interval / self.rank_max as f32 * (self.rank_max - level) as f32
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> DifficultyCurve {
        DifficultyCurve::new(100.0, 10)
    }

    #[test]
    fn level_starts_at_one() {
        assert_eq!(curve().level(0.0), 1);
        assert_eq!(curve().level(99.9), 1);
        assert_eq!(curve().level(100.0), 2);
    }

    #[test]
    fn negative_forward_stays_at_one() {
        assert_eq!(curve().level_unclamped(-250.0), 1);
    }

    #[test]
    fn clamped_and_unclamped_scenario() {
        let c = curve();
        assert_eq!(c.level(950.0), 10);
        assert_eq!(c.level_unclamped(950.0), 10);
        assert_eq!(c.level(1050.0), 10);
        assert_eq!(c.level_unclamped(1050.0), 11);
    }

    #[test]
    fn unclamped_is_monotonic_and_clamped_is_bounded() {
        let c = curve();
        let mut previous = 0;
        for step in 0..500 {
            let forward = step as f32 * 7.3;
            let level = c.level_unclamped(forward);
            assert!(level >= previous);
            assert!(c.level(forward) <= c.rank_max());
            previous = level;
        }
    }

    #[test]
    fn spacing_is_non_negative_and_strictly_decreasing() {
        let c = curve();
        let mut previous = f32::INFINITY;
        for level in 1..=10 {
            let spacing = c.obstacle_extra_spacing(level, 50.0);
            assert!(spacing >= 0.0);
            assert!(spacing < previous);
            previous = spacing;
        }
        assert_relative_eq!(c.obstacle_extra_spacing(1, 50.0), 45.0);
        assert_relative_eq!(c.obstacle_extra_spacing(10, 50.0), 0.0);
    }

    #[test]
    fn spacing_never_negative_past_max() {
        assert_eq!(curve().obstacle_extra_spacing(25, 50.0), 0.0);
    }
}
