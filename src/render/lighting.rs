//! Night lighting: dim ambient fill, a dark sky and the coloured point
//! lights, two of which orbit the city centre.

use bevy::prelude::*;

use crate::simulation::FrameSet;
use crate::world::entities::CityLight;
use crate::world::CityWorld;

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneLightingConfig>()
            .add_systems(Startup, setup_lighting)
            .add_systems(
                Update,
                update_orbiting_lights
                    .in_set(FrameSet::Sync)
                    .run_if(resource_exists::<CityWorld>),
            );
    }
}

/// Links a point light entity to its slot in [`CityWorld::lights`].
#[derive(Component)]
pub struct CityLightMarker {
    pub index: usize,
}

#[derive(Resource)]
pub struct SceneLightingConfig {
    pub sky_color: Color,
    pub ambient_color: Color,
    /// Relative ambient strength, scaled by `ambient_brightness_scale`.
    pub ambient_strength: f32,
    pub ambient_brightness_scale: f32,
    /// Lumens per unit of [`CityLight::intensity`].
    pub lumens_per_unit: f32,
    pub shadows_enabled: bool,
}

impl Default for SceneLightingConfig {
    fn default() -> Self {
        Self {
            sky_color: Color::srgb(0.039, 0.039, 0.059),      // #0a0a0f
            ambient_color: Color::srgb(0.067, 0.067, 0.133),  // #111122
            ambient_strength: 0.5,
            ambient_brightness_scale: 160.0,
            lumens_per_unit: 500_000.0,
            shadows_enabled: false,
        }
    }
}

/// Bevy point light for a scene light.
pub fn point_light(light: &CityLight, config: &SceneLightingConfig) -> PointLight {
    PointLight {
        color: light.color,
        intensity: light.intensity * config.lumens_per_unit,
        range: light.range,
        shadows_enabled: config.shadows_enabled,
        ..default()
    }
}

fn setup_lighting(
    mut commands: Commands,
    world: Option<Res<CityWorld>>,
    config: Res<SceneLightingConfig>,
) {
    commands.insert_resource(ClearColor(config.sky_color));
    commands.insert_resource(AmbientLight {
        color: config.ambient_color,
        brightness: config.ambient_strength * config.ambient_brightness_scale,
    });

    let Some(world) = world else {
        return;
    };

    for (index, light) in world.lights.iter().enumerate() {
        commands.spawn((
            point_light(light, &config),
            Transform::from_translation(light.position),
            CityLightMarker { index },
        ));
    }
}

fn update_orbiting_lights(
    world: Res<CityWorld>,
    mut query: Query<(&CityLightMarker, &mut Transform), With<PointLight>>,
) {
    for (marker, mut transform) in &mut query {
        let Some(light) = world.lights.get(marker.index) else {
            continue;
        };
        if light.orbit.is_some() {
            transform.translation = light.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::default_lights;

    #[test]
    fn key_lights_are_brighter_than_fill() {
        let config = SceneLightingConfig::default();
        let lights = default_lights();
        let key = point_light(&lights[0], &config);
        let fill = point_light(&lights[2], &config);

        assert_eq!(key.intensity, 1_000_000.0);
        assert_eq!(fill.intensity, 500_000.0);
        assert_eq!(key.range, 100.0);
        assert_eq!(fill.range, 80.0);
    }
}
