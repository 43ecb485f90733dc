//! Lifecycle and scoring state shared by the simulation

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activation
    #[default]
    Ready,
    /// Player is flying, obstacles are moving
    Active,
    /// Run ended by a collision, waiting for an activation to reset
    Ended,
}

/// Fire-and-forget sound cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Player flapped
    Flap,
    /// Player hit the ground or an obstacle
    Hit,
    /// Player cleared an obstacle
    Score,
}

impl Cue {
    /// Short lowercase label for logs
    pub fn name(self) -> &'static str {
        match self {
            Cue::Flap => "flap",
            Cue::Hit => "hit",
            Cue::Score => "score",
        }
    }
}

/// Audio collaborator. Playback is fire-and-forget; overlapping cues may cut
/// each other off.
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}

/// Silent sink
impl AudioCue for () {
    fn play(&mut self, _cue: Cue) {}
}

/// Recording sink (headless runs and tests)
impl AudioCue for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Per-run counters plus the best score seen by this process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Obstacles cleared this run
    pub score: u32,
    /// Highest score of any finished run (in-memory only)
    pub best_score: u32,
    /// Ticks since the last reset, drives obstacle spawning
    pub frame_count: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Fold the finished run into the best score and zero the run counters.
    /// Returns true when the finished run set a new best.
    pub fn close_run(&mut self) -> bool {
        let new_best = self.score > self.best_score;
        self.best_score = self.best_score.max(self.score);
        self.score = 0;
        self.frame_count = 0;
        new_best
    }
}
