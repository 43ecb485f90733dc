//! The obstacle field: a FIFO of gated columns scrolling right to left
//!
//! Obstacles spawn at the right edge at a fixed frame interval and all move at
//! the same speed, so the queue is always ordered by x and only the front can
//! ever leave the screen.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hits_gated_column};
use super::state::{AudioCue, Cue};
use crate::tuning::Tuning;

/// A column with a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Top of the passable gap
    pub gap_top: f32,
    /// Set once the player's leading edge is past the trailing edge
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// What happened to the field during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// The player touched a column while the run was active
    pub collided: bool,
    /// Obstacles newly passed this tick
    pub passed: u32,
    /// A new obstacle was spawned
    pub spawned: bool,
}

/// Owns every live obstacle plus the RNG that places their gaps
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
    rng: Pcg32,
    speed: f32,
    width: f32,
    gap_height: f32,
    gap_top_min: f32,
    gap_top_max: f32,
    spawn_x: f32,
    spawn_interval: u64,
}

impl ObstacleField {
    /// Create an empty field. `tuning` must already have passed
    /// [`Tuning::validate`]; [`crate::sim::Game`] is the only public way in.
    pub(crate) fn new(tuning: &Tuning, seed: u64) -> Self {
        let (gap_top_min, gap_top_max) = tuning.gap_top_range();
        Self {
            obstacles: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
            speed: tuning.obstacle_speed,
            width: tuning.obstacle_width,
            gap_height: tuning.gap_height,
            gap_top_min,
            gap_top_max,
            spawn_x: tuning.world_width,
            spawn_interval: tuning.spawn_interval_frames,
        }
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacle column width
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_height
    }

    /// Advance one tick.
    ///
    /// Order per tick: move everything, drop columns that left the screen from
    /// the front, then for each remaining column test collision and then the
    /// pass check (independently, both may fire), then maybe spawn.
    /// Scoring is not gated on `active`; spawning and collision are, and a
    /// collision clears `active` for the rest of the tick.
    pub fn tick(
        &mut self,
        frame_count: u64,
        player: &Rect,
        active: bool,
        audio: &mut impl AudioCue,
    ) -> FieldReport {
        let mut report = FieldReport::default();
        let mut active = active;

        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }

        while self
            .obstacles
            .front()
            .is_some_and(|o| o.trailing_edge(self.width) < 0.0)
        {
            self.obstacles.pop_front();
            log::trace!("Recycled obstacle, {} live", self.obstacles.len());
        }

        for obstacle in &mut self.obstacles {
            let trailing = obstacle.trailing_edge(self.width);

            if active
                && hits_gated_column(player, obstacle.x, trailing, obstacle.gap_top, self.gap_height)
            {
                active = false;
                report.collided = true;
                audio.play(Cue::Hit);
            }

            if !obstacle.passed && trailing < player.left() {
                obstacle.passed = true;
                report.passed += 1;
                audio.play(Cue::Score);
            }
        }

        if frame_count % self.spawn_interval == 0 && active {
            self.spawn();
            report.spawned = true;
        }

        report
    }

    /// Push a new obstacle at the right edge with a random gap
    pub fn spawn(&mut self) {
        let gap_top = self
            .rng
            .random_range(self.gap_top_min..=self.gap_top_max)
            .floor()
            .max(self.gap_top_min);
        log::debug!("Spawned obstacle with gap at {}", gap_top);
        self.obstacles.push_back(Obstacle {
            x: self.spawn_x,
            gap_top,
            passed: false,
        });
    }

    /// Remove every obstacle. The RNG stream continues.
    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    /// Insert an obstacle directly (scripted scenarios and tests)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn field() -> ObstacleField {
        ObstacleField::new(&Tuning::default(), 7)
    }

    fn player_at(y: f32) -> Rect {
        Rect::new(PLAYER_X, y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    // Gap 200..350 with the player comfortably inside it
    fn safe_player() -> Rect {
        player_at(250.0)
    }

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            x,
            gap_top: 200.0,
            passed: false,
        }
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let mut field = field();
        field.spawn();
        let obstacle = field.obstacles().next().unwrap();
        assert_eq!(obstacle.x, WORLD_WIDTH);
        assert!(!obstacle.passed);
        assert_eq!(obstacle.gap_top, obstacle.gap_top.floor());
    }

    #[test]
    fn test_spawns_only_on_interval_while_active() {
        let mut field = field();
        let player = safe_player();

        let report = field.tick(99, &player, true, &mut ());
        assert!(!report.spawned);
        let report = field.tick(100, &player, false, &mut ());
        assert!(!report.spawned);
        assert!(field.is_empty());

        let report = field.tick(200, &player, true, &mut ());
        assert!(report.spawned);
        assert_eq!(field.len(), 1);
        // Frame 0 counts as an interval boundary
        assert!(field.tick(0, &player, true, &mut ()).spawned);
    }

    #[test]
    fn test_moves_then_recycles_from_front() {
        let mut field = field();
        field.push(obstacle_at(-78.0));
        field.push(obstacle_at(300.0));
        field.tick(1, &safe_player(), true, &mut ());
        // -80 + 80 = 0 is not off screen yet
        assert_eq!(field.len(), 2);
        field.tick(1, &safe_player(), true, &mut ());
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles().next().unwrap().x, 296.0);
    }

    #[test]
    fn test_passed_exactly_when_trailing_edge_clears_player() {
        let mut field = field();
        field.push(obstacle_at(500.0));
        let player = safe_player();
        let mut score = 0;
        let mut passed_at = None;
        for frame in 1..=300 {
            let report = field.tick(frame, &player, false, &mut ());
            score += report.passed;
            if report.passed > 0 && passed_at.is_none() {
                passed_at = Some(field.obstacles().next().unwrap().x);
            }
        }
        assert_eq!(score, 1);
        // x + 80 < 225 first holds at x = 144 when moving in steps of 2
        let x = passed_at.unwrap();
        assert!(x <= 145.0);
        assert_eq!(x, 144.0);
    }

    #[test]
    fn test_collision_reported_once_and_plays_hit() {
        let mut field = field();
        field.push(obstacle_at(PLAYER_X + 2.0));
        field.push(obstacle_at(PLAYER_X + 10.0));
        let mut cues: Vec<Cue> = Vec::new();
        let report = field.tick(1, &player_at(0.0), true, &mut cues);
        assert!(report.collided);
        assert_eq!(cues, vec![Cue::Hit]);
    }

    #[test]
    fn test_collision_ignored_when_inactive() {
        let mut field = field();
        field.push(obstacle_at(PLAYER_X + 2.0));
        let mut cues: Vec<Cue> = Vec::new();
        let report = field.tick(1, &player_at(0.0), false, &mut cues);
        assert!(!report.collided);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_collision_suppresses_spawn_in_same_tick() {
        let mut field = field();
        field.push(obstacle_at(PLAYER_X + 2.0));
        let report = field.tick(100, &player_at(0.0), true, &mut ());
        assert!(report.collided);
        assert!(!report.spawned);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_collision_and_score_in_same_tick() {
        // One column just cleared behind the player, the next one overlapping it
        let mut field = field();
        field.push(obstacle_at(PLAYER_X - 81.0));
        field.push(obstacle_at(PLAYER_X + 2.0));
        let mut cues: Vec<Cue> = Vec::new();
        let report = field.tick(1, &player_at(0.0), true, &mut cues);
        assert!(report.collided);
        assert_eq!(report.passed, 1);
        assert_eq!(cues, vec![Cue::Score, Cue::Hit]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut field = field();
        field.spawn();
        field.spawn();
        field.reset();
        assert!(field.is_empty());
        field.reset();
        assert!(field.is_empty());
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = ObstacleField::new(&Tuning::default(), 42);
        let mut b = ObstacleField::new(&Tuning::default(), 42);
        for _ in 0..10 {
            a.spawn();
            b.spawn();
        }
        let gaps_a: Vec<f32> = a.obstacles().map(|o| o.gap_top).collect();
        let gaps_b: Vec<f32> = b.obstacles().map(|o| o.gap_top).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn test_spawns_with_zero_margin() {
        let tuning = Tuning {
            gap_margin: 0.0,
            ..Tuning::default()
        };
        tuning.validate().expect("valid tuning");
        let mut field = ObstacleField::new(&tuning, 3);
        for _ in 0..32 {
            field.spawn();
        }
        for obstacle in field.obstacles() {
            assert!((0.0..=400.0).contains(&obstacle.gap_top));
        }
    }

    #[test]
    fn test_spawns_from_single_point_range() {
        let tuning = Tuning {
            gap_height: 550.0,
            gap_margin: 0.0,
            ..Tuning::default()
        };
        tuning.validate().expect("valid tuning");
        assert_eq!(tuning.gap_top_range(), (0.0, 0.0));
        let mut field = ObstacleField::new(&tuning, 9);
        let report = field.tick(0, &safe_player(), true, &mut ());
        assert!(report.spawned);
        assert_eq!(field.obstacles().next().unwrap().gap_top, 0.0);
    }

    proptest! {
        #[test]
        fn prop_spawned_gap_stays_in_range(seed in any::<u64>(), draws in 1usize..64) {
            let tuning = Tuning::default();
            let (lo, hi) = tuning.gap_top_range();
            let mut field = ObstacleField::new(&tuning, seed);
            for _ in 0..draws {
                field.spawn();
            }
            for obstacle in field.obstacles() {
                prop_assert!(obstacle.gap_top >= lo);
                prop_assert!(obstacle.gap_top <= hi);
                prop_assert!(obstacle.gap_top + GAP_HEIGHT <= tuning.floor_y() - GAP_MARGIN);
            }
        }
    }
}
