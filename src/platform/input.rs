//! Mapping raw input events to game commands

use crate::sim::{AudioCue, Game};

/// Source of a discrete activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Key,
    Pointer,
}

/// What the host should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Forward to `Game::handle_input`
    Activate(Activation),
    /// Toggle demo mode
    ToggleDemo,
    /// Toggle sound
    ToggleMute,
}

/// Map a `KeyboardEvent.code`. Auto-repeat from a held key is dropped so one
/// press is one flap.
pub fn command_for_key(code: &str, repeat: bool) -> Option<HostCommand> {
    if repeat {
        return None;
    }
    match code {
        "Space" => Some(HostCommand::Activate(Activation::Key)),
        "KeyI" => Some(HostCommand::ToggleDemo),
        "KeyM" => Some(HostCommand::ToggleMute),
        _ => None,
    }
}

/// Deliver one activation to the game
pub fn activate(game: &mut Game, source: Activation, audio: &mut impl AudioCue) {
    log::trace!("Activation from {:?} in {:?}", source, game.phase());
    game.handle_input(audio);
}
