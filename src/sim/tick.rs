//! Per-frame simulation tick and the Ready / Active / Ended lifecycle
//!
//! One call to [`Game::tick`] corresponds to one rendered frame.

use super::obstacles::ObstacleField;
use super::player::PlayerBody;
use super::scroller::Scroller;
use super::state::{AudioCue, GamePhase, GameSession};
use crate::tuning::{Tuning, TuningError};

/// The whole game: session counters plus every simulated component
#[derive(Debug, Clone)]
pub struct Game {
    pub session: GameSession,
    pub player: PlayerBody,
    pub obstacles: ObstacleField,
    pub background: Scroller,
    pub ground: Scroller,
    tuning: Tuning,
}

impl Game {
    /// Create a game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// Create a game with custom tuning, rejecting unplayable values
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        Self {
            session: GameSession::new(),
            player: PlayerBody::new(&tuning),
            obstacles: ObstacleField::new(&tuning, seed),
            background: Scroller::new(tuning.background_speed, tuning.world_width),
            ground: Scroller::new(tuning.obstacle_speed, tuning.world_width / 2.0),
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best_score(&self) -> u32 {
        self.session.best_score
    }

    pub fn frame_count(&self) -> u64 {
        self.session.frame_count
    }

    /// One discrete activation (key press, click, tap)
    pub fn handle_input(&mut self, audio: &mut impl AudioCue) {
        match self.session.phase {
            GamePhase::Ready => {
                self.session.phase = GamePhase::Active;
                self.player.apply_impulse(audio);
                log::info!("Run started");
            }
            GamePhase::Active => {
                self.player.apply_impulse(audio);
            }
            GamePhase::Ended => {
                self.reset_game();
                self.session.phase = GamePhase::Ready;
            }
        }
    }

    /// Clear the field and player, fold the score into the best score
    pub fn reset_game(&mut self) {
        self.player.reset();
        self.obstacles.reset();
        if self.session.close_run() {
            log::info!("New best score: {}", self.session.best_score);
        }
    }

    /// Advance one frame.
    ///
    /// Scrollers always move. The player and the obstacle field only update
    /// while Active, and either may end the run. The frame counter advances
    /// after the update phase regardless of state.
    pub fn tick(&mut self, audio: &mut impl AudioCue) {
        self.background.tick();
        self.ground.tick();

        if self.session.is_active() {
            if self.player.tick(true, audio) {
                self.end_run("ground");
            }

            let report = self.obstacles.tick(
                self.session.frame_count,
                &self.player.bounds(),
                self.session.is_active(),
                audio,
            );
            self.session.score += report.passed;
            if report.collided {
                self.end_run("obstacle");
            }
        }

        self.session.frame_count += 1;
    }

    fn end_run(&mut self, cause: &str) {
        self.session.phase = GamePhase::Ended;
        log::info!(
            "Run ended by {} at frame {}: score {}, best {}",
            cause,
            self.session.frame_count,
            self.session.score,
            self.session.best_score.max(self.session.score)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacles::Obstacle;
    use crate::sim::state::Cue;

    #[test]
    fn test_ready_to_active_flaps() {
        let mut game = Game::new(12345);
        assert_eq!(game.phase(), GamePhase::Ready);

        let mut cues: Vec<Cue> = Vec::new();
        game.handle_input(&mut cues);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.player.velocity, FLAP_VELOCITY);
        assert_eq!(game.score(), 0);
        assert_eq!(cues, vec![Cue::Flap]);

        // Input while active only flaps
        game.tick(&mut ());
        game.handle_input(&mut cues);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.player.velocity, FLAP_VELOCITY);
        assert_eq!(cues, vec![Cue::Flap, Cue::Flap]);
    }

    #[test]
    fn test_ready_only_scrolls_and_counts_frames() {
        let mut game = Game::new(1);
        for _ in 0..150 {
            game.tick(&mut ());
        }
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.frame_count(), 150);
        assert_eq!(game.player.y, PLAYER_START_Y);
        assert!(game.obstacles.is_empty());
        assert_eq!(game.background.x, -75.0);
    }

    #[test]
    fn test_ground_collision_ends_run() {
        let mut game = Game::new(5);
        game.handle_input(&mut ());

        let mut cues: Vec<Cue> = Vec::new();
        let mut ticks = 0;
        while game.phase() == GamePhase::Active {
            game.tick(&mut cues);
            ticks += 1;
            assert!(ticks < 1000, "run should end on the ground");
        }
        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(game.player.y, game.player.max_y());
        assert_eq!(cues.iter().filter(|c| **c == Cue::Hit).count(), 1);

        // Ended never drifts back to Active on its own
        for _ in 0..300 {
            game.tick(&mut ());
        }
        assert_eq!(game.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_end_to_end_restart() {
        let mut game = Game::new(99);
        game.handle_input(&mut ());
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.score(), 0);

        while game.phase() == GamePhase::Active {
            game.tick(&mut ());
        }
        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(game.best_score(), 0);
        // The field spawned on frame 0 of the run
        assert!(!game.obstacles.is_empty());

        let mut cues: Vec<Cue> = Vec::new();
        game.handle_input(&mut cues);
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.score(), 0);
        assert_eq!(game.frame_count(), 0);
        assert!(game.obstacles.is_empty());
        assert_eq!(game.player.y, PLAYER_START_Y);
        assert_eq!(game.player.velocity, 0.0);
        assert_eq!(game.player.rotation, 0.0);
        // Restarting does not flap
        assert!(cues.is_empty());
    }

    #[test]
    fn test_obstacle_collision_ends_run_same_tick() {
        let mut game = Game::new(3);
        game.handle_input(&mut ());
        // Column arriving over the player with a gap far below it
        game.obstacles.push(Obstacle {
            x: PLAYER_X + 2.0,
            gap_top: 360.0,
            passed: false,
        });
        let mut cues: Vec<Cue> = Vec::new();
        game.tick(&mut cues);
        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(cues, vec![Cue::Hit]);
    }

    #[test]
    fn test_ground_hit_blocks_obstacle_hit_and_spawn() {
        let mut game = Game::new(3);
        game.handle_input(&mut ());
        game.player.y = game.player.max_y();
        game.player.velocity = 1.0;
        game.obstacles.push(Obstacle {
            x: PLAYER_X + 2.0,
            gap_top: 40.0,
            passed: false,
        });
        let mut cues: Vec<Cue> = Vec::new();
        // frame_count is 0, which would otherwise spawn
        game.tick(&mut cues);
        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(cues, vec![Cue::Hit]);
        assert_eq!(game.obstacles.len(), 1);
    }

    #[test]
    fn test_scoring_updates_session() {
        let mut game = Game::new(8);
        game.handle_input(&mut ());
        game.player.y = 250.0;
        game.player.velocity = FLAP_VELOCITY;
        game.obstacles.push(Obstacle {
            x: 146.0,
            gap_top: 200.0,
            passed: false,
        });
        let mut cues: Vec<Cue> = Vec::new();
        game.tick(&mut cues);
        assert_eq!(game.score(), 1);
        assert!(cues.contains(&Cue::Score));

        game.session.phase = GamePhase::Ended;
        game.handle_input(&mut ());
        assert_eq!(game.best_score(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_spawns_every_interval_while_active() {
        // A gap covering nearly the whole sky so the run cannot end on a column
        let tuning = Tuning {
            gap_height: 470.0,
            ..Tuning::default()
        };
        let mut game = Game::with_tuning(tuning, 11).expect("valid tuning");
        game.handle_input(&mut ());
        for _ in 0..201 {
            game.player.y = 250.0;
            game.player.velocity = 0.0;
            game.tick(&mut ());
        }
        assert_eq!(game.phase(), GamePhase::Active);
        // Frames 0, 100 and 200
        assert_eq!(game.obstacles.len(), 3);
        assert_eq!(game.frame_count(), 201);
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let tuning = Tuning {
            spawn_interval_frames: 0,
            ..Tuning::default()
        };
        assert!(Game::with_tuning(tuning, 1).is_err());

        let tuning = Tuning {
            gap_margin: f32::NAN,
            ..Tuning::default()
        };
        assert!(Game::with_tuning(tuning, 1).is_err());

        let tuning = Tuning::from_json(r#"{ "world_height": 1e39 }"#);
        assert!(tuning.is_err());
    }

    #[test]
    fn test_custom_tuning_runs_through_spawn() {
        let tuning = Tuning {
            gap_margin: 0.0,
            spawn_interval_frames: 10,
            ..Tuning::default()
        };
        let mut game = Game::with_tuning(tuning, 21).expect("valid tuning");
        game.handle_input(&mut ());
        game.tick(&mut ());
        assert_eq!(game.obstacles.len(), 1);
        let gap_top = game.obstacles.obstacles().next().unwrap().gap_top;
        assert!((0.0..=400.0).contains(&gap_top));
    }

    #[test]
    fn test_determinism() {
        let mut game1 = Game::new(99999);
        let mut game2 = Game::new(99999);
        let flap_frames = [0usize, 30, 55, 80, 110, 140, 170];

        for frame in 0..240 {
            if flap_frames.contains(&frame) {
                game1.handle_input(&mut ());
                game2.handle_input(&mut ());
            }
            game1.tick(&mut ());
            game2.tick(&mut ());
        }

        assert_eq!(game1.session, game2.session);
        assert_eq!(game1.player, game2.player);
        let gaps1: Vec<f32> = game1.obstacles.obstacles().map(|o| o.gap_top).collect();
        let gaps2: Vec<f32> = game2.obstacles.obstacles().map(|o| o.gap_top).collect();
        assert_eq!(gaps1, gaps2);
    }
}
