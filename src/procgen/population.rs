//! Fixed-size pools of decorative entities: dust particles, flying cars and
//! hovering neon rings.
//!
//! Pools are independent of each other and of the building layout. Overlap
//! between them is allowed.

use bevy::prelude::*;
use rand::Rng;

use super::sampler::{
    chance, sample_centered, sample_palette, sample_range, sample_sign, NEON_PALETTE,
};
use crate::world::entities::{NeonRing, Particle, ParticleField, TravelAxis, Vehicle};

/// Pool sizes and spawn volumes.
#[derive(Clone, Debug)]
pub struct PopulationConfig {
    pub particle_count: usize,
    /// Particles spawn in `[-h, h)` on X and Z.
    pub particle_half_extent: f32,
    /// Particles spawn in `[0, ceiling)` on Y.
    pub particle_ceiling: f32,

    pub vehicle_count: usize,
    pub vehicle_half_extent: f32,
    pub vehicle_min_altitude: f32,
    pub vehicle_altitude_span: f32,
    pub vehicle_min_speed: f32,
    pub vehicle_speed_span: f32,

    pub sign_count: usize,
    pub sign_half_extent: f32,
    pub sign_min_altitude: f32,
    pub sign_altitude_span: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 5000,
            particle_half_extent: 100.0,
            particle_ceiling: 100.0,

            vehicle_count: 15,
            vehicle_half_extent: 75.0,
            vehicle_min_altitude: 20.0,
            vehicle_altitude_span: 30.0,
            vehicle_min_speed: 0.2,
            vehicle_speed_span: 0.5,

            sign_count: 20,
            sign_half_extent: 50.0,
            sign_min_altitude: 30.0,
            sign_altitude_span: 20.0,
        }
    }
}

pub fn spawn_particles(config: &PopulationConfig, rng: &mut impl Rng) -> ParticleField {
    let particles = (0..config.particle_count)
        .map(|_| Particle {
            position: Vec3::new(
                sample_centered(rng, config.particle_half_extent),
                sample_range(rng, 0.0, config.particle_ceiling),
                sample_centered(rng, config.particle_half_extent),
            ),
            color: sample_palette(rng, &NEON_PALETTE),
        })
        .collect();

    ParticleField {
        particles,
        rotation_y: 0.0,
    }
}

pub fn spawn_vehicles(config: &PopulationConfig, rng: &mut impl Rng) -> Vec<Vehicle> {
    (0..config.vehicle_count)
        .map(|_| {
            let color = sample_palette(rng, &NEON_PALETTE);
            let position = Vec3::new(
                sample_centered(rng, config.vehicle_half_extent),
                sample_range(rng, config.vehicle_min_altitude, config.vehicle_altitude_span),
                sample_centered(rng, config.vehicle_half_extent),
            );
            let speed = sample_range(rng, config.vehicle_min_speed, config.vehicle_speed_span);
            let direction = sample_sign(rng);
            let axis = if chance(rng, 0.5) {
                TravelAxis::X
            } else {
                TravelAxis::Z
            };

            Vehicle {
                position,
                color,
                speed,
                direction,
                axis,
            }
        })
        .collect()
}

pub fn spawn_signs(config: &PopulationConfig, rng: &mut impl Rng) -> Vec<NeonRing> {
    (0..config.sign_count)
        .map(|_| {
            let color = sample_palette(rng, &NEON_PALETTE);
            let position = Vec3::new(
                sample_centered(rng, config.sign_half_extent),
                sample_range(rng, config.sign_min_altitude, config.sign_altitude_span),
                sample_centered(rng, config.sign_half_extent),
            );
            NeonRing {
                position,
                rotation_y: sample_range(rng, 0.0, std::f32::consts::PI),
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn particle_pool_fills_volume() {
        let config = PopulationConfig::default();
        let mut rng = StdRng::seed_from_u64(21);
        let field = spawn_particles(&config, &mut rng);

        assert_eq!(field.particles.len(), 5000);
        assert_eq!(field.rotation_y, 0.0);
        for p in &field.particles {
            assert!((-100.0..100.0).contains(&p.position.x));
            assert!((0.0..100.0).contains(&p.position.y));
            assert!((-100.0..100.0).contains(&p.position.z));
            assert!(NEON_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn vehicles_fly_within_bounds() {
        let config = PopulationConfig::default();
        let mut rng = StdRng::seed_from_u64(22);
        let cars = spawn_vehicles(&config, &mut rng);

        assert_eq!(cars.len(), 15);
        for car in &cars {
            assert!((-75.0..75.0).contains(&car.position.x));
            assert!((20.0..50.0).contains(&car.position.y));
            assert!((-75.0..75.0).contains(&car.position.z));
            assert!((0.2..0.7).contains(&car.speed));
            assert!(car.direction == 1.0 || car.direction == -1.0);
        }
    }

    #[test]
    fn vehicles_use_both_axes_over_a_large_pool() {
        let config = PopulationConfig {
            vehicle_count: 400,
            ..default()
        };
        let mut rng = StdRng::seed_from_u64(23);
        let cars = spawn_vehicles(&config, &mut rng);
        assert!(cars.iter().any(|c| c.axis == TravelAxis::X));
        assert!(cars.iter().any(|c| c.axis == TravelAxis::Z));
    }

    #[test]
    fn signs_hover_above_the_skyline() {
        let config = PopulationConfig::default();
        let mut rng = StdRng::seed_from_u64(24);
        let signs = spawn_signs(&config, &mut rng);

        assert_eq!(signs.len(), 20);
        for sign in &signs {
            assert!((-50.0..50.0).contains(&sign.position.x));
            assert!((30.0..50.0).contains(&sign.position.y));
            assert!((-50.0..50.0).contains(&sign.position.z));
            assert!((0.0..std::f32::consts::PI).contains(&sign.rotation_y));
        }
    }

    #[test]
    fn empty_pools_are_allowed() {
        let config = PopulationConfig {
            particle_count: 0,
            vehicle_count: 0,
            sign_count: 0,
            ..default()
        };
        let mut rng = StdRng::seed_from_u64(25);
        assert!(spawn_particles(&config, &mut rng).particles.is_empty());
        assert!(spawn_vehicles(&config, &mut rng).is_empty());
        assert!(spawn_signs(&config, &mut rng).is_empty());
    }
}
