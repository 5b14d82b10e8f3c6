//! Scene presentation state.
//!
//! The city animates from the first frame; the state only decides whether
//! the loader overlay is still covering it.

use bevy::prelude::*;

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneState>();
    }
}

/// Whether the intro overlay is still showing.
#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum SceneState {
    /// Loader overlay displayed over the animating city.
    #[default]
    Loading,
    /// Overlay dismissed, city fully visible.
    Running,
}
