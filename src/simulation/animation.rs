//! Per-frame animation of the whole city.
//!
//! Every rule here advances by a fixed amount per call rather than by the
//! frame delta, so motion speed follows the display refresh rate. Elapsed
//! time arrives as `f64` and is reduced to a phase before narrowing.

use bevy::prelude::*;

use crate::input::InputAccumulator;
use crate::world::entities::{
    phase_angle, Building, CameraRig, CityLight, ParticleField, Vehicle, WindowPane,
};
use crate::world::CityWorld;

/// Horizontal camera reach at full pointer deflection.
pub const POINTER_REACH: f32 = 30.0;
/// Fraction of the remaining distance the camera closes each frame.
pub const CAMERA_EASE: f32 = 0.02;
pub const CAMERA_BASE_HEIGHT: f32 = 30.0;
pub const CAMERA_BASE_DISTANCE: f32 = 80.0;
pub const CAMERA_BOB_AMPLITUDE: f32 = 5.0;
pub const CAMERA_BOB_RATE: f32 = 0.5;
/// Camera drop per unit of scroll.
pub const SCROLL_DESCENT: f32 = 0.5;

pub const PARTICLE_RISE: f32 = 0.05;
pub const PARTICLE_CEILING: f32 = 100.0;
pub const PARTICLE_SPIN: f32 = 0.0005;

/// Cars turn around once they pass this distance from the origin.
pub const VEHICLE_BOUNDARY: f32 = 100.0;

/// Advance every entity in `world` by one frame at elapsed time `t` seconds.
pub fn advance_frame(world: &mut CityWorld, t: f64, input: &InputAccumulator) {
    update_camera(&mut world.camera, t, input);
    update_particles(&mut world.particles);

    for building in &mut world.buildings {
        update_building(building, t);
    }

    for vehicle in &mut world.vehicles {
        update_vehicle(vehicle);
    }

    for light in &mut world.lights {
        update_light(light, t);
    }
}

pub fn update_camera(camera: &mut CameraRig, t: f64, input: &InputAccumulator) {
    let target_x = input.pointer.x * POINTER_REACH;
    camera.position.x += (target_x - camera.position.x) * CAMERA_EASE;
    camera.position.y = CAMERA_BASE_HEIGHT
        + phase_angle(t, CAMERA_BOB_RATE, 0.0).sin() * CAMERA_BOB_AMPLITUDE
        - input.scroll_offset * SCROLL_DESCENT;
    camera.position.z = CAMERA_BASE_DISTANCE - input.scroll_offset;
}

pub fn update_particles(field: &mut ParticleField) {
    for particle in &mut field.particles {
        particle.position.y += PARTICLE_RISE;
        if particle.position.y > PARTICLE_CEILING {
            particle.position.y = 0.0;
        }
    }
    field.rotation_y = (field.rotation_y + PARTICLE_SPIN).rem_euclid(std::f32::consts::TAU);
}

/// Glow pulse in `[0, 0.1]`.
pub fn pulse_intensity(t: f64, pulse_speed: f32, pulse_offset: f32) -> f32 {
    0.05 + phase_angle(t, pulse_speed, pulse_offset).sin() * 0.05
}

/// Window flicker in `[-0.1, 0.7]`.
pub fn flicker_opacity(t: f64, flicker_speed: f32, flicker_offset: f32) -> f32 {
    0.3 + phase_angle(t, flicker_speed * 10.0, flicker_offset).sin() * 0.4
}

pub fn update_building(building: &mut Building, t: f64) {
    building.emissive_intensity = pulse_intensity(t, building.pulse_speed, building.pulse_offset);
    for window in &mut building.windows {
        update_window(window, t);
    }
}

pub fn update_window(window: &mut WindowPane, t: f64) {
    window.opacity = flicker_opacity(t, window.flicker_speed, window.flicker_offset);
}

/// Move along the travel axis, turning around past the boundary.
///
/// The car is not pulled back inside; it may sit up to one step past the
/// boundary before heading home.
pub fn update_vehicle(vehicle: &mut Vehicle) {
    let step = vehicle.speed * vehicle.direction;
    let coord = vehicle.axis_coordinate_mut();
    *coord += step;
    if coord.abs() > VEHICLE_BOUNDARY {
        vehicle.direction = -vehicle.direction;
    }
}

pub fn update_light(light: &mut CityLight, t: f64) {
    if let Some(orbit) = light.orbit {
        let offset = orbit.offset_at(t);
        light.position.x = offset.x;
        light.position.z = offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entities::{Orbit, Particle, TravelAxis};
    use crate::world::CityConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn car(axis: TravelAxis, position: Vec3, direction: f32) -> Vehicle {
        Vehicle {
            position,
            color: Color::WHITE,
            speed: 0.5,
            direction,
            axis,
        }
    }

    #[test]
    fn particle_near_ceiling_wraps_to_ground() {
        let mut field = ParticleField {
            particles: vec![Particle {
                position: Vec3::new(3.0, 99.98, -4.0),
                color: Color::WHITE,
            }],
            rotation_y: 0.0,
        };
        update_particles(&mut field);

        let p = field.particles[0].position;
        assert_eq!(p.y, 0.0);
        assert_eq!(p.x, 3.0);
        assert_eq!(p.z, -4.0);
        assert!((field.rotation_y - PARTICLE_SPIN).abs() < 1e-9);
    }

    #[test]
    fn spin_wraps_and_keeps_advancing() {
        let mut field = ParticleField {
            particles: Vec::new(),
            rotation_y: std::f32::consts::TAU - 0.0002,
        };
        update_particles(&mut field);
        assert!((field.rotation_y - 0.0003).abs() < 1e-5);

        // Far outside the wrapped range a step is below f32 resolution;
        // the first update folds it back in and later steps advance again.
        field.rotation_y = 20_000.0;
        update_particles(&mut field);
        assert!((0.0..std::f32::consts::TAU).contains(&field.rotation_y));
        let before = field.rotation_y;
        update_particles(&mut field);
        let advanced = (field.rotation_y - before).rem_euclid(std::f32::consts::TAU);
        assert!((advanced - PARTICLE_SPIN).abs() < 2e-6);
    }

    #[test]
    fn pulse_tracks_exact_value_after_days() {
        let (speed, offset) = (0.023_f32, 1.7_f32);
        for day in [1.0, 4.0, 9.0] {
            let t = day * 86_400.0 + 0.37;
            let exact = 0.05 + (t * f64::from(speed) + f64::from(offset)).sin() * 0.05;
            assert!((f64::from(pulse_intensity(t, speed, offset)) - exact).abs() < 1e-5);
        }
    }

    #[test]
    fn particles_never_exceed_ceiling() {
        let config = CityConfig::default();
        let mut world = CityWorld::generate(&config, &mut StdRng::seed_from_u64(5));
        for _ in 0..2500 {
            update_particles(&mut world.particles);
            assert!(world
                .particles
                .particles
                .iter()
                .all(|p| (0.0..=PARTICLE_CEILING).contains(&p.position.y)));
        }
    }

    #[test]
    fn vehicle_past_boundary_turns_after_overshoot() {
        let mut vehicle = car(TravelAxis::X, Vec3::new(100.1, 30.0, 5.0), 1.0);
        update_vehicle(&mut vehicle);

        assert_eq!(vehicle.direction, -1.0);
        assert!((vehicle.position.x - 100.6).abs() < 1e-4);
        assert_eq!(vehicle.position.z, 5.0);
    }

    #[test]
    fn vehicle_inside_bounds_keeps_heading() {
        let mut vehicle = car(TravelAxis::Z, Vec3::new(0.0, 30.0, -10.0), -1.0);
        update_vehicle(&mut vehicle);

        assert_eq!(vehicle.direction, -1.0);
        assert!((vehicle.position.z - -10.5).abs() < 1e-6);
        assert_eq!(vehicle.position.x, 0.0);
    }

    #[test]
    fn vehicle_shuttles_between_boundaries() {
        let mut vehicle = car(TravelAxis::Z, Vec3::new(0.0, 30.0, 0.0), 1.0);
        let mut turns = 0;
        let mut heading = vehicle.direction;
        for _ in 0..2000 {
            update_vehicle(&mut vehicle);
            assert!(vehicle.position.z.abs() <= VEHICLE_BOUNDARY + vehicle.speed);
            if vehicle.direction != heading {
                turns += 1;
                heading = vehicle.direction;
            }
        }
        assert!(turns >= 2);
    }

    #[test]
    fn building_pulse_stays_in_band() {
        for i in 0..5000 {
            let t = f64::from(i) * 0.731;
            let intensity = pulse_intensity(t, 0.029, 6.2);
            assert!((-1e-6..=0.1 + 1e-6).contains(&intensity), "t={t}: {intensity}");
        }
    }

    #[test]
    fn window_flicker_can_dip_negative() {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..10_000 {
            let opacity = flicker_opacity(f64::from(i) * 0.05, 0.09, 1.0);
            min = min.min(opacity);
            max = max.max(opacity);
        }
        assert!(min < 0.0 && min >= -0.1 - 1e-5);
        assert!(max > 0.6 && max <= 0.7 + 1e-5);
    }

    #[test]
    fn camera_follows_scroll_and_eases_toward_pointer() {
        let mut camera = CameraRig::default();
        let input = InputAccumulator {
            pointer: Vec2::new(1.0, 0.0),
            scroll_offset: 10.0,
        };

        update_camera(&mut camera, 0.0, &input);
        assert!((camera.position.x - 0.6).abs() < 1e-5);
        assert!((camera.position.y - 25.0).abs() < 1e-5);
        assert!((camera.position.z - 70.0).abs() < 1e-5);
        assert_eq!(camera.look_at, Vec3::new(0.0, 20.0, 0.0));

        for _ in 0..1000 {
            update_camera(&mut camera, 0.0, &input);
        }
        assert!((camera.position.x - POINTER_REACH).abs() < 0.01);
    }

    #[test]
    fn camera_bobs_with_time() {
        let mut camera = CameraRig::default();
        let input = InputAccumulator::default();
        update_camera(&mut camera, std::f64::consts::PI, &input);
        assert!((camera.position.y - 35.0).abs() < 1e-4);
        assert_eq!(camera.position.z, 80.0);
    }

    #[test]
    fn orbiting_lights_circle_origin() {
        let mut light = CityLight {
            position: Vec3::new(20.0, 50.0, 20.0),
            color: Color::WHITE,
            intensity: 2.0,
            range: 100.0,
            orbit: Some(Orbit {
                radius: 30.0,
                angular_speed: 0.3,
                phase: std::f32::consts::PI,
            }),
        };
        update_light(&mut light, 0.0);
        assert!(light.position.x.abs() < 1e-4);
        assert!((light.position.z - -30.0).abs() < 1e-4);
        assert_eq!(light.position.y, 50.0);

        update_light(&mut light, 12.3);
        let radius = Vec2::new(light.position.x, light.position.z).length();
        assert!((radius - 30.0).abs() < 1e-3);
    }

    #[test]
    fn static_light_stays_put() {
        let mut light = CityLight {
            position: Vec3::new(0.0, 30.0, 40.0),
            color: Color::WHITE,
            intensity: 1.0,
            range: 80.0,
            orbit: None,
        };
        update_light(&mut light, 99.0);
        assert_eq!(light.position, Vec3::new(0.0, 30.0, 40.0));
    }

    #[test]
    fn full_frame_touches_every_entity() {
        let config = CityConfig::default();
        let mut world = CityWorld::generate(&config, &mut StdRng::seed_from_u64(31));
        let input = InputAccumulator::default();
        let before = world.clone();

        advance_frame(&mut world, 1.5, &input);

        for (b, old) in world.buildings.iter().zip(&before.buildings) {
            let expected = pulse_intensity(1.5, old.pulse_speed, old.pulse_offset);
            assert_eq!(b.emissive_intensity, expected);
            assert_eq!(b.position, old.position);
            for w in &b.windows {
                assert_eq!(w.opacity, flicker_opacity(1.5, w.flicker_speed, w.flicker_offset));
            }
        }
        for (v, old) in world.vehicles.iter().zip(&before.vehicles) {
            let moved = (v.axis_coordinate() - old.axis_coordinate()).abs();
            assert!((moved - old.speed).abs() < 1e-4);
        }
        assert!((world.particles.rotation_y - PARTICLE_SPIN).abs() < 1e-9);
        assert_eq!(world.particles.particles.len(), before.particles.particles.len());
    }
}
