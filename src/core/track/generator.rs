//=========================================================================
// Track Generator
//=========================================================================
//
// Keeps two independent stream windows full ahead of the player.
//
// Architecture:
//   TrackGenerator
//     ├─ track:     StreamWindow + SegmentCatalog
//     ├─ obstacles: StreamWindow + SegmentCatalog (difficulty-spaced)
//     └─ curve:     DifficultyCurve (shared, geometry is not)
//
// Flow:
//   fill_initial() → place target_len segments per window
//   refill_if_needed(forward) → retire consumed fronts, append at cursor
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use super::{DifficultyCurve, SegmentCatalog, StreamWindow};
use crate::config::TrackConfig;

//=== RefillReport ========================================================

/// Segments replaced by one `refill_if_needed` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefillReport {
    pub track_retired: usize,
    pub obstacles_retired: usize,
}

impl RefillReport {
    pub fn is_empty(&self) -> bool {
        self.track_retired == 0 && self.obstacles_retired == 0
    }
}

//=== WindowKind ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowKind {
    Track,
    Obstacle,
}

//=== TrackGenerator ======================================================

pub struct TrackGenerator {
    track: StreamWindow,
    track_catalog: SegmentCatalog,
    obstacles: StreamWindow,
    obstacle_catalog: SegmentCatalog,
    obstacle_interval: f32,
    curve: DifficultyCurve,
    rng: StdRng,
}

impl TrackGenerator {
    //--- Construction -----------------------------------------------------

    pub fn new(
        config: &TrackConfig,
        track_catalog: SegmentCatalog,
        obstacle_catalog: SegmentCatalog,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            track: StreamWindow::new(config.track_count),
            track_catalog,
            obstacles: StreamWindow::new(config.obstacle_count),
            obstacle_catalog,
            obstacle_interval: config.obstacle_interval,
            curve: DifficultyCurve::from_config(config),
            rng,
        }
    }

    /// Builds both catalogs from the templates listed in the config.
    pub fn from_config(config: &TrackConfig) -> Self {
        Self::new(
            config,
            SegmentCatalog::new(config.track_segments.iter().cloned()),
            SegmentCatalog::new(config.obstacle_segments.iter().cloned()),
        )
    }

    //--- Queries ----------------------------------------------------------

    pub fn track(&self) -> &StreamWindow {
        &self.track
    }

    pub fn obstacles(&self) -> &StreamWindow {
        &self.obstacles
    }

    pub fn curve(&self) -> &DifficultyCurve {
        &self.curve
    }

    pub fn track_catalog(&self) -> &SegmentCatalog {
        &self.track_catalog
    }

    pub fn obstacle_catalog(&self) -> &SegmentCatalog {
        &self.obstacle_catalog
    }

    //--- Generation -------------------------------------------------------

    /// Discards both windows and places `target_len` segments in each.
    ///
    /// The obstacle cursor starts one interval forward so the first stretch
    /// of track is clear.
    pub fn fill_initial(&mut self) {
        self.track.reset(Vec3::ZERO);
        self.obstacles.reset(Vec3::new(0.0, 0.0, self.obstacle_interval));

        for _ in 0..self.track.target_len() {
            if !self.append(WindowKind::Track, 0.0) {
                break;
            }
        }
        for _ in 0..self.obstacles.target_len() {
            if !self.append(WindowKind::Obstacle, 0.0) {
                break;
            }
        }

        debug!(
            "Initial fill: {} track, {} obstacle segments",
            self.track.len(),
            self.obstacles.len()
        );
    }

    /// Retires every front segment the player has passed and appends one
    /// replacement per retirement.
    ///
    /// At most `target_len` segments are replaced per window and call, so
    /// a template without forward advance cannot stall the frame.
    pub fn refill_if_needed(&mut self, forward: f32) -> RefillReport {
        RefillReport {
            track_retired: self.refill_window(WindowKind::Track, forward),
            obstacles_retired: self.refill_window(WindowKind::Obstacle, forward),
        }
    }

    fn refill_window(&mut self, kind: WindowKind, forward: f32) -> usize {
        let limit = self.window(kind).target_len();
        let mut retired = 0;

        while retired < limit && self.window(kind).front_consumed(forward) {
            self.window_mut(kind).retire_front();
            retired += 1;
            self.append(kind, forward);
        }

        if retired == limit && limit > 0 && self.window(kind).front_consumed(forward) {
            warn!("{:?} window still behind the player after {} retirements", kind, retired);
        }

        retired
    }

    /// Places one random template at the window cursor. Returns false when
    /// the catalog is empty.
    fn append(&mut self, kind: WindowKind, forward: f32) -> bool {
        let catalog = match kind {
            WindowKind::Track => &self.track_catalog,
            WindowKind::Obstacle => &self.obstacle_catalog,
        };
        let Some(template) = catalog.choose(&mut self.rng) else {
            return false;
        };

        let mut offset = template.next_offset;
        if kind == WindowKind::Obstacle {
            let level = self.curve.level(forward);
            offset.z += self.curve.obstacle_extra_spacing(level, self.obstacle_interval);
        }

        self.window_mut(kind).place(template, offset);
        true
    }

    fn window(&self, kind: WindowKind) -> &StreamWindow {
        match kind {
            WindowKind::Track => &self.track,
            WindowKind::Obstacle => &self.obstacles,
        }
    }

    fn window_mut(&mut self, kind: WindowKind) -> &mut StreamWindow {
        match kind {
            WindowKind::Track => &mut self.track,
            WindowKind::Obstacle => &mut self.obstacles,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::track::SegmentTemplate;
    use approx::assert_relative_eq;

    fn config() -> TrackConfig {
        TrackConfig {
            track_count: 5,
            obstacle_count: 10,
            obstacle_interval: 50.0,
            level_interval: 100.0,
            level_rank_max: 10,
            seed: Some(3),
            track_segments: vec![
                SegmentTemplate::new("straight", Vec3::new(0.0, 0.0, 30.0)),
                SegmentTemplate::new("long", Vec3::new(0.0, 0.0, 60.0)),
            ],
            obstacle_segments: vec![
                SegmentTemplate::new("cones", Vec3::new(0.0, 0.0, 10.0)),
                SegmentTemplate::new("barrier", Vec3::new(0.0, 0.0, 20.0)),
            ],
        }
    }

    #[test]
    fn initial_fill_reaches_target_lengths() {
        let mut generator = TrackGenerator::from_config(&config());
        generator.fill_initial();

        assert_eq!(generator.track().len(), 5);
        assert_eq!(generator.obstacles().len(), 10);
    }

    #[test]
    fn first_obstacle_starts_one_interval_forward() {
        let mut generator = TrackGenerator::from_config(&config());
        generator.fill_initial();

        let first = generator.obstacles().front().unwrap();
        assert_eq!(first.origin, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(generator.track().front().unwrap().origin, Vec3::ZERO);
    }

    #[test]
    fn obstacle_spacing_at_level_one() {
        let mut cfg = config();
        cfg.obstacle_segments = vec![SegmentTemplate::new("cones", Vec3::new(0.0, 0.0, 10.0))];
        let mut generator = TrackGenerator::from_config(&cfg);
        generator.fill_initial();

        // 10 base + 45 extra spacing at level 1
        let origins: Vec<f32> = generator.obstacles().segments().map(|s| s.origin.z).collect();
        assert_relative_eq!(origins[1] - origins[0], 55.0);
        let first = generator.obstacles().front().unwrap();
        assert_relative_eq!(first.retire_at, 50.0 + 55.0 + 11.0);
    }

    #[test]
    fn obstacles_tighten_at_max_difficulty() {
        let mut cfg = config();
        cfg.obstacle_count = 1;
        cfg.obstacle_segments = vec![SegmentTemplate::new("cones", Vec3::new(0.0, 0.0, 10.0))];
        let mut generator = TrackGenerator::from_config(&cfg);
        generator.fill_initial();

        // Far past the front threshold and beyond max rank: replacement uses
        // zero extra spacing.
        let before = generator.obstacles().cursor().z;
        generator.refill_if_needed(5_000.0);
        let after = generator.obstacles().cursor().z;
        assert_relative_eq!(after - before, 10.0);
    }

    #[test]
    fn window_size_is_invariant_across_refills() {
        let mut generator = TrackGenerator::from_config(&config());
        generator.fill_initial();

        let mut forward = 0.0;
        for _ in 0..2_000 {
            forward += 3.5;
            generator.refill_if_needed(forward);
            assert_eq!(generator.track().len(), 5);
            assert_eq!(generator.obstacles().len(), 10);
        }
    }

    #[test]
    fn refill_keeps_front_ahead_of_player() {
        let mut generator = TrackGenerator::from_config(&config());
        generator.fill_initial();

        let mut forward = 0.0;
        for _ in 0..500 {
            forward += 2.0;
            generator.refill_if_needed(forward);
            assert!(generator.track().front().unwrap().retire_at > forward);
        }
    }

    #[test]
    fn refill_before_threshold_is_noop() {
        let mut generator = TrackGenerator::from_config(&config());
        generator.fill_initial();

        let report = generator.refill_if_needed(0.0);
        assert!(report.is_empty());
    }

    #[test]
    fn refill_catches_up_after_a_jump() {
        let mut generator = TrackGenerator::from_config(&config());
        generator.fill_initial();

        // Past the whole initial track window at once
        let far = generator.track().cursor().z + 100.0;
        let report = generator.refill_if_needed(far);
        assert_eq!(report.track_retired, 5);
        assert_eq!(generator.track().len(), 5);
    }

    #[test]
    fn empty_catalog_produces_empty_window() {
        let mut cfg = config();
        cfg.obstacle_segments.clear();
        let mut generator = TrackGenerator::from_config(&cfg);
        generator.fill_initial();

        assert_eq!(generator.track().len(), 5);
        assert!(generator.obstacles().is_empty());
        assert_eq!(generator.refill_if_needed(10_000.0).obstacles_retired, 0);
    }

    #[test]
    fn zero_advance_templates_do_not_stall() {
        let mut cfg = config();
        cfg.track_segments = vec![SegmentTemplate::new("flat", Vec3::ZERO)];
        let mut generator = TrackGenerator::from_config(&cfg);
        generator.fill_initial();

        let report = generator.refill_if_needed(1.0);
        assert_eq!(report.track_retired, 5);
        assert_eq!(generator.track().len(), 5);
    }
}
