//! Perspective camera that drifts with the pointer and dives on scroll.
//!
//! The camera pose is computed by the frame update; this module only owns
//! the Bevy camera entity and its post-processing stack (bloom, ACES
//! tonemapping, exposure, distance fog).

use bevy::{
    core_pipeline::{
        bloom::{Bloom, BloomCompositeMode, BloomPrefilter},
        tonemapping::Tonemapping,
    },
    pbr::{DistanceFog, FogFalloff},
    prelude::*,
    render::view::ColorGrading,
};

use crate::simulation::FrameSet;
use crate::world::entities::CameraRig;
use crate::world::CityWorld;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraConfig>()
            .init_resource::<BloomConfig>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (follow_camera_rig, update_bloom)
                    .in_set(FrameSet::Sync)
                    .run_if(resource_exists::<CityWorld>),
            );
    }
}

/// Lens and exposure settings.
#[derive(Resource)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Linear exposure multiplier applied before tonemapping.
    pub exposure: f32,
    pub fog_color: Color,
    pub fog_density: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            exposure: 1.5,
            fog_color: Color::srgb(0.039, 0.039, 0.059), // #0a0a0f
            fog_density: 0.002,
        }
    }
}

/// Configuration for bloom effect.
#[derive(Resource)]
pub struct BloomConfig {
    /// Whether bloom is enabled.
    pub enabled: bool,
    pub intensity: f32,
    /// Bloom threshold (luminance above this glows).
    pub threshold: f32,
    /// How soft the threshold is.
    pub threshold_softness: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.25,
            threshold: 0.6,
            threshold_softness: 0.3,
        }
    }
}

/// Marker component for the main city camera.
#[derive(Component)]
pub struct CityCamera;

/// Exposure in stops for a linear multiplier.
pub fn exposure_stops(multiplier: f32) -> f32 {
    multiplier.max(f32::MIN_POSITIVE).log2()
}

/// Camera transform for a rig pose.
pub fn rig_transform(rig: &CameraRig) -> Transform {
    Transform::from_translation(rig.position).looking_at(rig.look_at, Vec3::Y)
}

fn setup_camera(
    mut commands: Commands,
    config: Res<CameraConfig>,
    bloom_config: Res<BloomConfig>,
    world: Option<Res<CityWorld>>,
) {
    let rig = world.map(|w| w.camera).unwrap_or_default();

    let mut grading = ColorGrading::default();
    grading.global.exposure = exposure_stops(config.exposure);

    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true, // Required for bloom
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            ..default()
        }),
        rig_transform(&rig),
        DistanceFog {
            color: config.fog_color,
            falloff: FogFalloff::ExponentialSquared {
                density: config.fog_density,
            },
            ..default()
        },
        Bloom {
            intensity: if bloom_config.enabled { bloom_config.intensity } else { 0.0 },
            prefilter: BloomPrefilter {
                threshold: bloom_config.threshold,
                threshold_softness: bloom_config.threshold_softness,
            },
            composite_mode: BloomCompositeMode::Additive,
            ..default()
        },
        Tonemapping::AcesFitted,
        grading,
        CityCamera,
    ));

    info!(
        "Camera ready: fov {}°, exposure {:.2} stops",
        config.fov_degrees,
        exposure_stops(config.exposure)
    );
}

fn follow_camera_rig(world: Res<CityWorld>, mut query: Query<&mut Transform, With<CityCamera>>) {
    for mut transform in &mut query {
        *transform = rig_transform(&world.camera);
    }
}

fn update_bloom(config: Res<BloomConfig>, mut bloom_query: Query<&mut Bloom, With<CityCamera>>) {
    if !config.is_changed() {
        return;
    }

    for mut bloom in &mut bloom_query {
        bloom.intensity = if config.enabled { config.intensity } else { 0.0 };
        bloom.prefilter.threshold = config.threshold;
        bloom.prefilter.threshold_softness = config.threshold_softness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposure_multiplier_maps_to_stops() {
        assert_eq!(exposure_stops(1.0), 0.0);
        assert!((exposure_stops(2.0) - 1.0).abs() < 1e-6);
        assert!((exposure_stops(1.5) - 0.585).abs() < 1e-3);
    }

    #[test]
    fn rig_transform_looks_at_target() {
        let rig = CameraRig::default();
        let transform = rig_transform(&rig);
        let to_target = (rig.look_at - rig.position).normalize();
        assert!((transform.forward().as_vec3() - to_target).length() < 1e-5);
        assert_eq!(transform.translation, rig.position);
    }
}
