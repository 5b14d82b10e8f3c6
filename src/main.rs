//! Neon Sprawl - desktop viewer for the procedural neon city.

use bevy::prelude::*;

use neonsprawl::{camera, game_state, input, render, simulation, ui, world};

fn main() {
    // Force Vulkan backend on Windows (DX12 causes crashes on some systems)
    #[cfg(target_os = "windows")]
    std::env::set_var("WGPU_BACKEND", "vulkan");
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Neon Sprawl".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Overlay state
        .add_plugins(game_state::GameStatePlugin)
        // City generation and per-frame animation
        .add_plugins(world::WorldPlugin)
        .add_plugins(simulation::SimulationPlugin)
        .add_plugins(input::InputPlugin)
        // Presentation
        .add_plugins(camera::CameraPlugin)
        .add_plugins(render::RenderPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}
