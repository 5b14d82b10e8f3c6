//! Tower meshes with pulsing emissive glow.
//!
//! Each generated building gets its own box mesh and material. Windows are
//! spawned as children by [`super::window_lights`] so they ride along with
//! the tower transform.

use bevy::prelude::*;

use crate::simulation::FrameSet;
use crate::world::CityWorld;

use super::window_lights::spawn_building_windows;

pub struct BuildingSpawnerPlugin;

impl Plugin for BuildingSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BuildingGlowConfig>()
            .add_systems(Startup, spawn_buildings)
            .add_systems(
                Update,
                update_building_glow
                    .in_set(FrameSet::Sync)
                    .run_if(resource_exists::<CityWorld>),
            );
    }
}

/// Links a tower entity to its slot in [`CityWorld::buildings`].
#[derive(Component)]
pub struct BuildingMesh {
    pub index: usize,
}

#[derive(Resource)]
pub struct BuildingGlowConfig {
    /// Dark facade colour under the glow.
    pub facade_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    /// Scales the `[0, 0.1]` pulse into scene emissive units.
    pub emissive_gain: f32,
}

impl Default for BuildingGlowConfig {
    fn default() -> Self {
        Self {
            facade_color: Color::srgb(0.102, 0.102, 0.180), // #1a1a2e
            metallic: 0.9,
            roughness: 0.1,
            emissive_gain: 20.0,
        }
    }
}

/// Emissive colour for a building tint at the given pulse level.
pub fn glow_emissive(color: Color, intensity: f32, gain: f32) -> LinearRgba {
    let linear = color.to_linear();
    let scale = intensity.max(0.0) * gain;
    LinearRgba::new(linear.red * scale, linear.green * scale, linear.blue * scale, 1.0)
}

fn spawn_buildings(
    mut commands: Commands,
    world: Option<Res<CityWorld>>,
    config: Res<BuildingGlowConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(world) = world else {
        warn!("No city generated; skipping building meshes");
        return;
    };

    let window_mesh = meshes.add(Rectangle::new(0.5, 0.8));
    let mut window_count = 0;

    for (index, building) in world.buildings.iter().enumerate() {
        let mesh = meshes.add(Cuboid::new(building.width, building.height, building.depth));
        let material = materials.add(StandardMaterial {
            base_color: config.facade_color,
            metallic: config.metallic,
            perceptual_roughness: config.roughness,
            emissive: glow_emissive(
                building.color,
                building.emissive_intensity,
                config.emissive_gain,
            ),
            ..default()
        });

        commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(building.position),
                BuildingMesh { index },
            ))
            .with_children(|parent| {
                window_count +=
                    spawn_building_windows(parent, index, building, &window_mesh, &mut materials);
            });
    }

    info!(
        "Spawned {} buildings with {} windows",
        world.buildings.len(),
        window_count
    );
}

fn update_building_glow(
    world: Res<CityWorld>,
    config: Res<BuildingGlowConfig>,
    query: Query<(&BuildingMesh, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (tower, material_handle) in &query {
        let Some(building) = world.buildings.get(tower.index) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.emissive =
                glow_emissive(building.color, building.emissive_intensity, config.emissive_gain);
        }
    }
}
