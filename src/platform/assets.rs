//! Sprite manifest and the all-or-nothing load barrier
//!
//! The game loop must not start before every sprite has decoded. There is no
//! timeout and no partial fallback: a failed image keeps the barrier closed.

use serde::{Deserialize, Serialize};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Background,
    Obstacle,
    Player,
    Ground,
    GetReady,
    GameOver,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::Background,
        SpriteId::Obstacle,
        SpriteId::Player,
        SpriteId::Ground,
        SpriteId::GetReady,
        SpriteId::GameOver,
    ];

    /// Dense index, stable with `ALL`
    pub fn index(self) -> usize {
        match self {
            SpriteId::Background => 0,
            SpriteId::Obstacle => 1,
            SpriteId::Player => 2,
            SpriteId::Ground => 3,
            SpriteId::GetReady => 4,
            SpriteId::GameOver => 5,
        }
    }
}

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/samuelcust/flappy-bird-assets/master/sprites";

/// Sprite sources, one entry per `SpriteId`
pub fn manifest() -> Vec<(SpriteId, String)> {
    SpriteId::ALL
        .iter()
        .map(|&id| {
            let file = match id {
                SpriteId::Background => "background-day.png",
                SpriteId::Obstacle => "pipe-green.png",
                SpriteId::Player => "yellowbird-midflap.png",
                SpriteId::Ground => "base.png",
                SpriteId::GetReady => "message.png",
                SpriteId::GameOver => "gameover.png",
            };
            (id, format!("{SPRITE_BASE}/{file}"))
        })
        .collect()
}

/// Tracks which sprites have finished loading
#[derive(Debug, Clone, Default)]
pub struct LoadBarrier {
    loaded: [bool; SpriteId::ALL.len()],
}

impl LoadBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished sprite. Returns true only on the call that completes
    /// the set; repeats of an already-loaded sprite are ignored.
    pub fn mark_loaded(&mut self, id: SpriteId) -> bool {
        let slot = &mut self.loaded[id.index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.is_ready()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.iter().filter(|l| **l).count()
    }

    pub fn total(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.iter().all(|l| *l)
    }
}

/// Sprite loading collaborator. `on_ready` fires exactly once, after the last
/// sprite in `manifest` has loaded, and never if any of them fails.
pub trait AssetLoader {
    fn load_all(&mut self, manifest: Vec<(SpriteId, String)>, on_ready: Box<dyn FnOnce()>);
}
