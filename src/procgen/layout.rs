//! City block layout: lattice scan, road carving and tower placement.
//!
//! Scans a square lattice of candidate lots, carves periodic road bands out
//! of it, leaves a share of the remaining lots empty and grows a jittered
//! tower with a window grid on each of the rest.

use bevy::prelude::*;
use rand::Rng;

use super::sampler::{chance, sample_centered, sample_palette, sample_range, NEON_PALETTE};
use crate::world::entities::{Building, WindowPane};

/// Settings for the lattice scan and tower dimensions.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Lattice runs from `-extent` to `extent` inclusive on both axes.
    pub lattice_extent: i32,
    /// Spacing between lattice points.
    pub lattice_step: i32,
    /// Period of the road bands.
    pub road_period: i32,
    /// A lattice coordinate is road when `|c| % period < width`.
    pub road_width: i32,
    /// Probability that a non-road lot gets a tower.
    pub lot_occupancy: f32,
    /// Towers are nudged up to this far off their lattice point.
    pub jitter: f32,
    pub min_height: f32,
    pub height_span: f32,
    pub min_footprint: f32,
    pub footprint_span: f32,
    /// Probability that a window cell is lit.
    pub window_probability: f32,
    pub floor_spacing: f32,
    pub column_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lattice_extent: 80,
            lattice_step: 10,
            road_period: 30,
            road_width: 8,
            lot_occupancy: 0.8,
            jitter: 2.0,
            min_height: 10.0,
            height_span: 40.0,
            min_footprint: 2.0,
            footprint_span: 4.0,
            window_probability: 0.7,
            floor_spacing: 2.5,
            column_spacing: 1.2,
        }
    }
}

impl LayoutConfig {
    /// Every lattice point, row-major in `x` then `z`.
    pub fn lattice(&self) -> impl Iterator<Item = IVec2> + '_ {
        let step = self.lattice_step.max(1) as usize;
        (-self.lattice_extent..=self.lattice_extent)
            .step_by(step)
            .flat_map(move |x| {
                (-self.lattice_extent..=self.lattice_extent)
                    .step_by(step)
                    .map(move |z| IVec2::new(x, z))
            })
    }

    /// True when a lattice point falls inside a road band.
    pub fn is_road(&self, cell: IVec2) -> bool {
        let period = self.road_period.max(1);
        cell.x.abs() % period < self.road_width || cell.y.abs() % period < self.road_width
    }

    /// Number of lattice points outside the road bands.
    pub fn buildable_cells(&self) -> usize {
        self.lattice().filter(|cell| !self.is_road(*cell)).count()
    }
}

/// Counters reported after a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub cells_scanned: usize,
    pub road_cells: usize,
    pub empty_lots: usize,
    pub buildings: usize,
    pub windows: usize,
}

/// Result of a layout pass.
#[derive(Clone, Debug, Default)]
pub struct CityLayout {
    pub buildings: Vec<Building>,
    pub stats: LayoutStats,
}

/// Scan the lattice and grow towers on the surviving lots.
pub fn generate_layout(config: &LayoutConfig, rng: &mut impl Rng) -> CityLayout {
    let mut layout = CityLayout::default();

    for cell in config.lattice() {
        layout.stats.cells_scanned += 1;

        if config.is_road(cell) {
            layout.stats.road_cells += 1;
            continue;
        }

        if !chance(rng, config.lot_occupancy) {
            layout.stats.empty_lots += 1;
            continue;
        }

        let x = cell.x as f32 + sample_centered(rng, config.jitter);
        let z = cell.y as f32 + sample_centered(rng, config.jitter);
        let building = grow_building(config, cell, Vec2::new(x, z), rng);

        layout.stats.buildings += 1;
        layout.stats.windows += building.windows.len();
        layout.buildings.push(building);
    }

    layout
}

/// Build one tower at `site` (XZ), windows included.
pub fn grow_building(
    config: &LayoutConfig,
    cell: IVec2,
    site: Vec2,
    rng: &mut impl Rng,
) -> Building {
    let height = sample_range(rng, config.min_height, config.height_span);
    let width = sample_range(rng, config.min_footprint, config.footprint_span);
    let depth = sample_range(rng, config.min_footprint, config.footprint_span);
    let color = sample_palette(rng, &NEON_PALETTE);

    let pulse_speed = sample_range(rng, 0.01, 0.02);
    let pulse_offset = sample_range(rng, 0.0, std::f32::consts::TAU);

    let windows = grow_windows(config, width, height, depth, color, rng);

    Building {
        position: Vec3::new(site.x, height / 2.0, site.y),
        width,
        height,
        depth,
        color,
        pulse_speed,
        pulse_offset,
        emissive_intensity: 0.1,
        lattice_cell: cell,
        windows,
    }
}

/// Window grid for the front (+Z) face of a tower.
///
/// Short or narrow towers produce zero rows or columns and therefore no
/// windows at all.
pub fn grow_windows(
    config: &LayoutConfig,
    width: f32,
    height: f32,
    depth: f32,
    color: Color,
    rng: &mut impl Rng,
) -> Vec<WindowPane> {
    let (rows, cols) = window_grid(width, height);
    let mut windows = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            if !chance(rng, config.window_probability) {
                continue;
            }

            let local_position = Vec3::new(
                (col as f32 - cols as f32 / 2.0 + 0.5) * config.column_spacing,
                (row as f32 - rows as f32 / 2.0 + 0.5) * config.floor_spacing,
                depth / 2.0 + 0.01,
            );
            let base_opacity = sample_range(rng, 0.5, 0.5);

            windows.push(WindowPane {
                local_position,
                color,
                base_opacity,
                flicker_speed: sample_range(rng, 0.0, 0.1),
                flicker_offset: sample_range(rng, 0.0, 100.0),
                opacity: base_opacity,
            });
        }
    }

    windows
}

/// `(rows, cols)` of the window grid for a tower of the given size.
pub fn window_grid(width: f32, height: f32) -> (usize, usize) {
    let rows = (height / 3.0).floor().max(0.0) as usize;
    let cols = (width / 1.5).floor().max(0.0) as usize;
    (rows, cols)
}
