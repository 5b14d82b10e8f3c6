//! Rising neon dust.
//!
//! Every particle is a small additive sphere sharing one mesh, so motes keep
//! their world size and shrink with distance. Materials are shared per
//! palette colour. The motes are children of one cloud entity that carries
//! the slow spin.

use bevy::prelude::*;

use crate::procgen::sampler::NEON_PALETTE;
use crate::render::neon_signs::palette_index;
use crate::simulation::FrameSet;
use crate::world::CityWorld;

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParticleConfig>()
            .add_systems(Startup, spawn_particle_cloud)
            .add_systems(
                Update,
                (spin_particle_cloud, update_particle_motes)
                    .in_set(FrameSet::Sync)
                    .run_if(resource_exists::<CityWorld>),
            );
    }
}

/// Parent of every mote. Its rotation is the field spin.
#[derive(Component)]
pub struct ParticleCloud;

/// One particle of the dust field.
#[derive(Component)]
pub struct ParticleMote {
    /// Slot in `CityWorld::particles`.
    pub index: usize,
}

#[derive(Resource)]
pub struct ParticleConfig {
    /// World-space diameter of a mote.
    pub size: f32,
    pub opacity: f32,
    /// Sphere tessellation. Kept coarse, there are thousands of motes.
    pub sectors: u32,
    pub stacks: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            size: 0.5,
            opacity: 0.8,
            sectors: 6,
            stacks: 4,
        }
    }
}

/// Additive unlit material for motes of one colour.
pub fn mote_material(color: Color, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    }
}

fn spawn_particle_cloud(
    mut commands: Commands,
    world: Option<Res<CityWorld>>,
    config: Res<ParticleConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(world) = world else {
        return;
    };

    let mesh = meshes.add(
        Sphere::new(config.size / 2.0)
            .mesh()
            .uv(config.sectors, config.stacks),
    );
    let palette: Vec<Handle<StandardMaterial>> = NEON_PALETTE
        .iter()
        .map(|color| materials.add(mote_material(*color, config.opacity)))
        .collect();

    commands
        .spawn((
            Transform::from_rotation(Quat::from_rotation_y(world.particles.rotation_y)),
            Visibility::default(),
            ParticleCloud,
        ))
        .with_children(|cloud| {
            for (index, particle) in world.particles.particles.iter().enumerate() {
                let material = match palette_index(particle.color).and_then(|i| palette.get(i)) {
                    Some(shared) => shared.clone(),
                    None => materials.add(mote_material(particle.color, config.opacity)),
                };

                cloud.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(particle.position),
                    ParticleMote { index },
                ));
            }
        });

    info!("Spawned particle cloud with {} motes", world.particles.particles.len());
}

fn spin_particle_cloud(
    world: Res<CityWorld>,
    mut clouds: Query<&mut Transform, With<ParticleCloud>>,
) {
    for mut transform in &mut clouds {
        transform.rotation = Quat::from_rotation_y(world.particles.rotation_y);
    }
}

fn update_particle_motes(
    world: Res<CityWorld>,
    mut motes: Query<(&ParticleMote, &mut Transform), Without<ParticleCloud>>,
) {
    for (mote, mut transform) in &mut motes {
        if let Some(particle) = world.particles.particles.get(mote.index) {
            transform.translation = particle.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motes_blend_additively_without_lighting() {
        let material = mote_material(NEON_PALETTE[1], 0.8);
        assert!(material.unlit);
        assert!(matches!(material.alpha_mode, AlphaMode::Add));
        assert!((material.base_color.alpha() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn default_mote_matches_half_unit_points() {
        let config = ParticleConfig::default();
        assert_eq!(config.size, 0.5);
        assert!(config.sectors >= 3 && config.stacks >= 2);
    }
}
