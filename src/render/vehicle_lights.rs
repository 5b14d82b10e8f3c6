//! Flying cars drawn as glowing light-trail bars.

use bevy::prelude::*;

use crate::simulation::FrameSet;
use crate::world::entities::TravelAxis;
use crate::world::CityWorld;

pub struct VehicleLightsPlugin;

impl Plugin for VehicleLightsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VehicleLightConfig>()
            .add_systems(Startup, spawn_flying_cars)
            .add_systems(
                Update,
                update_flying_cars
                    .in_set(FrameSet::Sync)
                    .run_if(resource_exists::<CityWorld>),
            );
    }
}

#[derive(Component)]
pub struct FlyingCar {
    /// Slot in [`CityWorld::vehicles`].
    pub index: usize,
}

#[derive(Resource)]
pub struct VehicleLightConfig {
    /// Bar length along the travel axis.
    pub length: f32,
    pub thickness: f32,
    pub opacity: f32,
}

impl Default for VehicleLightConfig {
    fn default() -> Self {
        Self {
            length: 2.0,
            thickness: 0.5,
            opacity: 0.8,
        }
    }
}

/// Bars are modelled along X; cars on Z are turned a quarter.
pub fn heading_rotation(axis: TravelAxis) -> Quat {
    match axis {
        TravelAxis::X => Quat::IDENTITY,
        TravelAxis::Z => Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
    }
}

fn spawn_flying_cars(
    mut commands: Commands,
    world: Option<Res<CityWorld>>,
    config: Res<VehicleLightConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(world) = world else {
        return;
    };

    let bar = meshes.add(Cuboid::new(config.length, config.thickness, config.thickness));

    for (index, car) in world.vehicles.iter().enumerate() {
        let material = materials.add(StandardMaterial {
            base_color: car.color.with_alpha(config.opacity),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });

        commands.spawn((
            Mesh3d(bar.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(car.position).with_rotation(heading_rotation(car.axis)),
            FlyingCar { index },
        ));
    }

    info!("Spawned {} flying cars", world.vehicles.len());
}

fn update_flying_cars(world: Res<CityWorld>, mut query: Query<(&FlyingCar, &mut Transform)>) {
    for (car, mut transform) in &mut query {
        if let Some(vehicle) = world.vehicles.get(car.index) {
            transform.translation = vehicle.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_point_along_travel_axis() {
        let along_x = heading_rotation(TravelAxis::X) * Vec3::X;
        assert!((along_x - Vec3::X).length() < 1e-5);

        let along_z = heading_rotation(TravelAxis::Z) * Vec3::X;
        assert!(along_z.x.abs() < 1e-5);
        assert!((along_z.z.abs() - 1.0).abs() < 1e-5);
    }
}
