//! Flickering windows on the front face of each tower.

use bevy::prelude::*;

use crate::simulation::FrameSet;
use crate::world::entities::Building;
use crate::world::CityWorld;

pub struct WindowLightsPlugin;

impl Plugin for WindowLightsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            update_window_flicker
                .in_set(FrameSet::Sync)
                .run_if(resource_exists::<CityWorld>),
        );
    }
}

/// Links a window entity to its building and slot.
#[derive(Component)]
pub struct WindowLight {
    pub building: usize,
    pub window: usize,
}

/// Opacity the renderer can actually use.
pub fn displayed_opacity(opacity: f32) -> f32 {
    opacity.clamp(0.0, 1.0)
}

/// Spawn one child quad per window of `building`. Returns how many.
pub fn spawn_building_windows(
    parent: &mut ChildBuilder,
    building_index: usize,
    building: &Building,
    window_mesh: &Handle<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> usize {
    for (window_index, window) in building.windows.iter().enumerate() {
        // Each window flickers on its own, so materials are not shared.
        let material = materials.add(StandardMaterial {
            base_color: window.color.with_alpha(displayed_opacity(window.opacity)),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });

        parent.spawn((
            Mesh3d(window_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(window.local_position),
            WindowLight {
                building: building_index,
                window: window_index,
            },
        ));
    }

    building.windows.len()
}

fn update_window_flicker(
    world: Res<CityWorld>,
    window_query: Query<(&WindowLight, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (light, material_handle) in &window_query {
        let Some(window) = world
            .buildings
            .get(light.building)
            .and_then(|b| b.windows.get(light.window))
        else {
            continue;
        };

        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color.set_alpha(displayed_opacity(window.opacity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_flicker_renders_transparent() {
        assert_eq!(displayed_opacity(-0.1), 0.0);
        assert_eq!(displayed_opacity(0.45), 0.45);
        assert_eq!(displayed_opacity(1.3), 1.0);
    }
}
