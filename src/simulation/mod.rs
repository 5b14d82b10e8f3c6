//! Frame-driven animation of the city.
//!
//! One [`animation::advance_frame`] call per display refresh. Input systems
//! run before it and render sync after it, so each frame sees a consistent
//! snapshot.

use bevy::prelude::*;

use crate::input::InputAccumulator;
use crate::world::CityWorld;

pub mod animation;

/// Ordering of the per-frame work.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Window events folded into the input accumulator.
    Input,
    /// Scene state advanced.
    Animate,
    /// Scene state copied into engine transforms and materials.
    Sync,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameCounter>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Animate, FrameSet::Sync).chain(),
            )
            .add_systems(
                Update,
                animate_city
                    .in_set(FrameSet::Animate)
                    .run_if(resource_exists::<CityWorld>),
            );
    }
}

/// Frames animated since startup.
#[derive(Resource, Default)]
pub struct FrameCounter(pub u64);

fn animate_city(
    time: Res<Time>,
    input: Res<InputAccumulator>,
    mut world: ResMut<CityWorld>,
    mut frames: ResMut<FrameCounter>,
) {
    animation::advance_frame(&mut world, time.elapsed_secs_f64(), &input);
    frames.0 += 1;
}
