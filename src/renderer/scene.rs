//! Frame draw list
//!
//! Turns the simulation state into sprite and text calls. Reads the game
//! only; drawing never feeds back into the simulation.

use crate::platform::{Renderer, SpriteId, TextStyle};
use crate::sim::{Game, GamePhase};

pub const SKY_COLOR: &str = "#70c5ce";

/// "Get ready" overlay size
pub const GET_READY_SIZE: (f32, f32) = (300.0, 400.0);
/// "Game over" banner size
pub const GAME_OVER_SIZE: (f32, f32) = (350.0, 90.0);

/// Score line baseline
const SCORE_Y: f32 = 50.0;

/// Issue every draw call for one frame, back to front
pub fn draw_scene(game: &Game, renderer: &mut impl Renderer) {
    let tuning = game.tuning();
    let (width, height) = (tuning.world_width, tuning.world_height);
    let floor_y = tuning.floor_y();
    let center_x = width / 2.0;
    let mid_y = height / 2.0;

    renderer.clear(SKY_COLOR);

    // Backdrop drawn twice for seamless wrapping
    let bg_x = game.background.x;
    renderer.draw_sprite(SpriteId::Background, bg_x, 0.0, width, height);
    renderer.draw_sprite(SpriteId::Background, bg_x + width, 0.0, width, height);

    let column_width = game.obstacles.width();
    let gap = game.obstacles.gap_height();
    for obstacle in game.obstacles.obstacles() {
        renderer.draw_flipped_sprite(
            SpriteId::Obstacle,
            obstacle.x,
            0.0,
            column_width,
            obstacle.gap_top,
        );
        let bottom_top = obstacle.gap_top + gap;
        renderer.draw_sprite(
            SpriteId::Obstacle,
            obstacle.x,
            bottom_top,
            column_width,
            floor_y - bottom_top,
        );
    }

    let ground_x = game.ground.x;
    let ground_height = tuning.ground_height;
    renderer.draw_sprite(SpriteId::Ground, ground_x, floor_y, width, ground_height);
    renderer.draw_sprite(SpriteId::Ground, ground_x + width, floor_y, width, ground_height);

    let player = &game.player;
    renderer.draw_rotated_sprite(
        SpriteId::Player,
        player.bounds().center(),
        player.width,
        player.height,
        player.rotation,
    );

    match game.phase() {
        GamePhase::Ready => {
            let (w, h) = GET_READY_SIZE;
            renderer.draw_sprite(SpriteId::GetReady, center_x - w / 2.0, mid_y - h / 2.0, w, h);
        }
        GamePhase::Active => {
            renderer.draw_text(&game.score().to_string(), center_x, SCORE_Y, TextStyle::Score);
        }
        GamePhase::Ended => {
            renderer.draw_text(&game.score().to_string(), center_x, SCORE_Y, TextStyle::Score);

            let (w, h) = GAME_OVER_SIZE;
            renderer.draw_sprite(SpriteId::GameOver, center_x - w / 2.0, mid_y - 80.0, w, h);

            let score_line = format!("Score: {}", game.score());
            let best_line = format!("Best: {}", game.best_score());
            renderer.draw_text(&score_line, center_x, mid_y + 30.0, TextStyle::Caption);
            renderer.draw_text(&best_line, center_x, mid_y + 60.0, TextStyle::Caption);
            renderer.draw_text("CLICK TO RESTART", center_x, mid_y + 100.0, TextStyle::Caption);
        }
    }
}
