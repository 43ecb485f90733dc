//! Demo mode - a simple bot that plays the game
//!
//! Aims for the lower part of the next gap and flaps whenever it sinks past
//! the aim line. Used for attract mode and headless runs.

use super::state::GamePhase;
use super::tick::Game;

/// Frames to linger on the game-over screen before restarting
pub const DEFAULT_RESTART_DELAY: u32 = 90;
/// Distance kept between the player's bottom edge and the gap bottom
pub const DEFAULT_AIM_MARGIN: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    restart_delay: u32,
    aim_margin: f32,
    ended_frames: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_DELAY)
    }
}

impl Autopilot {
    pub fn new(restart_delay: u32) -> Self {
        Self {
            restart_delay,
            aim_margin: DEFAULT_AIM_MARGIN,
            ended_frames: 0,
        }
    }

    /// Y the player's bottom edge should stay above
    pub fn aim_line(&self, game: &Game) -> f32 {
        let player = game.player.bounds();
        let width = game.obstacles.width();
        game.obstacles
            .obstacles()
            .find(|o| o.trailing_edge(width) >= player.left())
            .map(|o| o.gap_top + game.obstacles.gap_height() - self.aim_margin)
            .unwrap_or_else(|| game.tuning().floor_y() - 4.0 * self.aim_margin)
    }

    /// Decide whether to send an activation this frame
    pub fn wants_flap(&mut self, game: &Game) -> bool {
        match game.phase() {
            GamePhase::Ready => {
                self.ended_frames = 0;
                true
            }
            GamePhase::Active => {
                let player = &game.player;
                let next_bottom = player.bounds().bottom() + player.velocity + game.tuning().gravity;
                player.velocity >= 0.0 && next_bottom > self.aim_line(game)
            }
            GamePhase::Ended => {
                self.ended_frames += 1;
                if self.ended_frames >= self.restart_delay {
                    self.ended_frames = 0;
                    true
                } else {
                    false
                }
            }
        }
    }
}
