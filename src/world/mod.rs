//! World management: the scene registry and its one-time generation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::procgen::layout::{generate_layout, LayoutConfig, LayoutStats};
use crate::procgen::population::{spawn_particles, spawn_signs, spawn_vehicles, PopulationConfig};

pub mod entities;

use entities::{Building, CameraRig, CityLight, NeonRing, Orbit, ParticleField, Vehicle};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityConfig>()
            .add_systems(PreStartup, generate_world);
    }
}

/// Global generation settings.
#[derive(Resource, Clone, Debug, Default)]
pub struct CityConfig {
    /// Fixed seed for reproducible cities. `None` draws from entropy.
    pub seed: Option<u64>,
    pub layout: LayoutConfig,
    pub population: PopulationConfig,
}

/// Owns every generated entity. Created once, then mutated in place by the
/// frame update.
#[derive(Resource, Clone, Debug)]
pub struct CityWorld {
    pub buildings: Vec<Building>,
    pub particles: ParticleField,
    pub vehicles: Vec<Vehicle>,
    pub signs: Vec<NeonRing>,
    pub lights: Vec<CityLight>,
    pub camera: CameraRig,
    pub layout_stats: LayoutStats,
}

impl CityWorld {
    /// Generate a full city from `config` using `rng`.
    pub fn generate(config: &CityConfig, rng: &mut impl Rng) -> Self {
        let layout = generate_layout(&config.layout, rng);
        let particles = spawn_particles(&config.population, rng);
        let vehicles = spawn_vehicles(&config.population, rng);
        let signs = spawn_signs(&config.population, rng);

        Self {
            buildings: layout.buildings,
            particles,
            vehicles,
            signs,
            lights: default_lights(),
            camera: CameraRig::default(),
            layout_stats: layout.stats,
        }
    }

    /// Total windows across all buildings.
    pub fn window_count(&self) -> usize {
        self.buildings.iter().map(|b| b.windows.len()).sum()
    }
}

/// Two orbiting key lights and a static yellow fill.
pub fn default_lights() -> Vec<CityLight> {
    vec![
        CityLight {
            position: Vec3::new(20.0, 50.0, 20.0),
            color: Color::srgb(0.0, 0.961, 1.0),
            intensity: 2.0,
            range: 100.0,
            orbit: Some(Orbit {
                radius: 30.0,
                angular_speed: 0.5,
                phase: 0.0,
            }),
        },
        CityLight {
            position: Vec3::new(-20.0, 50.0, -20.0),
            color: Color::srgb(1.0, 0.0, 1.0),
            intensity: 2.0,
            range: 100.0,
            orbit: Some(Orbit {
                radius: 30.0,
                angular_speed: 0.3,
                phase: std::f32::consts::PI,
            }),
        },
        CityLight {
            position: Vec3::new(0.0, 30.0, 40.0),
            color: Color::srgb(1.0, 1.0, 0.0),
            intensity: 1.0,
            range: 80.0,
            orbit: None,
        },
    ]
}

fn generate_world(mut commands: Commands, config: Res<CityConfig>) {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let world = CityWorld::generate(&config, &mut rng);
    let stats = world.layout_stats;

    info!(
        "City generated: {} buildings ({} road cells, {} empty lots of {} scanned), {} windows",
        stats.buildings, stats.road_cells, stats.empty_lots, stats.cells_scanned, stats.windows
    );
    info!(
        "Populated {} particles, {} flying cars, {} neon rings",
        world.particles.particles.len(),
        world.vehicles.len(),
        world.signs.len()
    );

    commands.insert_resource(world);
}
