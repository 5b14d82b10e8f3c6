//! Neon rings hovering above the skyline.
//!
//! Rings are static once spawned. Materials are shared per palette colour
//! so all rings of one colour batch together.

use bevy::prelude::*;

use crate::procgen::sampler::NEON_PALETTE;
use crate::world::CityWorld;

pub struct NeonSignsPlugin;

impl Plugin for NeonSignsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NeonSignConfig>()
            .init_resource::<NeonMaterialPalette>()
            .add_systems(Startup, (initialize_neon_materials, spawn_neon_signs).chain());
    }
}

/// Ring geometry and finish.
#[derive(Resource)]
pub struct NeonSignConfig {
    pub ring_radius: f32,
    pub tube_radius: f32,
    pub opacity: f32,
}

impl Default for NeonSignConfig {
    fn default() -> Self {
        Self {
            ring_radius: 2.0,
            tube_radius: 0.2,
            opacity: 0.9,
        }
    }
}

/// Shared neon materials for GPU batching.
#[derive(Resource, Default)]
pub struct NeonMaterialPalette {
    /// One material per entry of [`NEON_PALETTE`].
    pub materials: Vec<Handle<StandardMaterial>>,
    /// Shared ring mesh.
    pub ring_mesh: Handle<Mesh>,
}

/// Index of `color` in the neon palette, if it is one.
pub fn palette_index(color: Color) -> Option<usize> {
    NEON_PALETTE.iter().position(|c| *c == color)
}

/// Ring orientation: stood upright, then turned about Y.
pub fn ring_rotation(rotation_y: f32) -> Quat {
    Quat::from_rotation_y(rotation_y) * Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)
}

fn neon_material(color: Color, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

fn initialize_neon_materials(
    config: Res<NeonSignConfig>,
    mut palette: ResMut<NeonMaterialPalette>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    palette.ring_mesh = meshes.add(Torus::new(
        config.ring_radius - config.tube_radius,
        config.ring_radius + config.tube_radius,
    ));

    for color in NEON_PALETTE.iter() {
        let material = materials.add(neon_material(*color, config.opacity));
        palette.materials.push(material);
    }

    debug!("Neon palette initialized: {} colors", palette.materials.len());
}

fn spawn_neon_signs(
    mut commands: Commands,
    world: Option<Res<CityWorld>>,
    config: Res<NeonSignConfig>,
    palette: Res<NeonMaterialPalette>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(world) = world else {
        return;
    };

    for sign in &world.signs {
        let material = match palette_index(sign.color).and_then(|i| palette.materials.get(i)) {
            Some(shared) => shared.clone(),
            None => materials.add(neon_material(sign.color, config.opacity)),
        };

        commands.spawn((
            Mesh3d(palette.ring_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(sign.position)
                .with_rotation(ring_rotation(sign.rotation_y)),
        ));
    }

    info!("Spawned {} neon rings", world.signs.len());
}
