//! Reflective ground plane and the glowing cyan grid laid over it.

use bevy::{
    prelude::*,
    render::{mesh::PrimitiveTopology, render_asset::RenderAssetUsages},
};

pub struct GroundPlugin;

impl Plugin for GroundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GroundConfig>()
            .add_systems(Startup, spawn_ground);
    }
}

#[derive(Resource)]
pub struct GroundConfig {
    pub plane_size: f32,
    pub plane_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    /// Side length of the grid square.
    pub grid_size: f32,
    pub grid_divisions: u32,
    /// Raised slightly to avoid z-fighting with the plane.
    pub grid_height: f32,
    pub grid_center_color: Color,
    pub grid_line_color: Color,
    pub grid_opacity: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            plane_size: 500.0,
            plane_color: Color::srgb(0.039, 0.039, 0.059), // #0a0a0f
            metallic: 0.8,
            roughness: 0.2,
            grid_size: 200.0,
            grid_divisions: 50,
            grid_height: 0.1,
            grid_center_color: Color::srgb(0.0, 0.961, 1.0), // #00f5ff
            grid_line_color: Color::srgb(0.102, 0.102, 0.180), // #1a1a2e
            grid_opacity: 0.3,
        }
    }
}

/// Line-list vertices and colours for a square grid centred on the origin.
///
/// The two lines through the origin use `center`, the rest use `line`.
/// Odd division counts have no centre line.
pub fn grid_lines(
    size: f32,
    divisions: u32,
    center: Color,
    line: Color,
) -> (Vec<[f32; 3]>, Vec<[f32; 4]>) {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;
    let to_rgba = |c: Color| {
        let linear = c.to_linear();
        [linear.red, linear.green, linear.blue, linear.alpha]
    };

    let mut positions = Vec::with_capacity((divisions as usize + 1) * 4);
    let mut colors = Vec::with_capacity((divisions as usize + 1) * 4);

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if divisions % 2 == 0 && i == divisions / 2 {
            to_rgba(center)
        } else {
            to_rgba(line)
        };

        // Line parallel to Z, then line parallel to X.
        positions.extend_from_slice(&[
            [k, 0.0, -half],
            [k, 0.0, half],
            [-half, 0.0, k],
            [half, 0.0, k],
        ]);
        colors.extend_from_slice(&[color; 4]);
    }

    (positions, colors)
}

fn spawn_ground(
    mut commands: Commands,
    config: Res<GroundConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(config.plane_size, config.plane_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: config.plane_color,
            metallic: config.metallic,
            perceptual_roughness: config.roughness,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    let (positions, colors) = grid_lines(
        config.grid_size,
        config.grid_divisions,
        config.grid_center_color,
        config.grid_line_color,
    );
    let grid = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors);

    commands.spawn((
        Mesh3d(meshes.add(grid)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE.with_alpha(config.grid_opacity),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(0.0, config.grid_height, 0.0),
    ));
}
