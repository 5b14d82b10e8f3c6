//! Rendering: mirrors the generated city into Bevy meshes and keeps them in
//! step with the animation every frame.

use bevy::prelude::*;

pub mod building_spawner;
pub mod ground;
pub mod lighting;
pub mod neon_signs;
pub mod particles;
pub mod vehicle_lights;
pub mod window_lights;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(lighting::LightingPlugin)
            .add_plugins(ground::GroundPlugin)
            .add_plugins(building_spawner::BuildingSpawnerPlugin)
            .add_plugins(window_lights::WindowLightsPlugin)
            .add_plugins(neon_signs::NeonSignsPlugin)
            .add_plugins(vehicle_lights::VehicleLightsPlugin)
            .add_plugins(particles::ParticlesPlugin);
    }
}
