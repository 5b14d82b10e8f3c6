//! Pointer and wheel input folded into a few clamped scalars.
//!
//! Events only ever write the [`InputAccumulator`]. The frame update reads a
//! snapshot of it; nothing here touches scene state.

use bevy::{
    input::mouse::{MouseScrollUnit, MouseWheel},
    prelude::*,
    window::{CursorMoved, PrimaryWindow, WindowResized},
};

use crate::simulation::FrameSet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputAccumulator>()
            .init_resource::<Viewport>()
            .add_systems(Startup, capture_initial_viewport)
            .add_systems(
                Update,
                (track_viewport, track_pointer, track_wheel)
                    .chain()
                    .in_set(FrameSet::Input),
            );
    }
}

/// Scroll offset never leaves this range.
pub const SCROLL_MIN: f32 = -20.0;
pub const SCROLL_MAX: f32 = 50.0;
/// Browser-style wheel delta to scroll units.
pub const WHEEL_SENSITIVITY: f32 = 0.01;
/// How far one button press dives into the city.
pub const NUDGE_STEP: f32 = 20.0;
/// Pixels per wheel line, matching a browser's default line height.
const PIXELS_PER_LINE: f32 = 100.0;

/// Latest pointer position and accumulated scroll, both clamped.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct InputAccumulator {
    /// Normalized pointer, `[-1, 1]` on both axes. Y grows downward.
    pub pointer: Vec2,
    /// Accumulated scroll, `[SCROLL_MIN, SCROLL_MAX]`.
    pub scroll_offset: f32,
}

impl InputAccumulator {
    /// Record a pointer position given in window pixels.
    ///
    /// A zero-sized viewport (minimized window) leaves the pointer untouched.
    pub fn set_pointer(&mut self, position: Vec2, viewport: Viewport) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        let normalized = Vec2::new(
            position.x / viewport.width * 2.0 - 1.0,
            position.y / viewport.height * 2.0 - 1.0,
        );
        self.pointer = normalized.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Accumulate a wheel delta (browser convention: positive scrolls down).
    pub fn apply_wheel(&mut self, delta_y: f32) {
        self.scroll_offset =
            (self.scroll_offset + delta_y * WHEEL_SENSITIVITY).clamp(SCROLL_MIN, SCROLL_MAX);
    }

    /// Dive further into the city, as the overlay buttons do.
    pub fn nudge(&mut self) {
        self.scroll_offset = (self.scroll_offset + NUDGE_STEP).clamp(SCROLL_MIN, SCROLL_MAX);
    }
}

/// Current output surface size in logical pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Convert a Bevy wheel event to a browser-style delta.
///
/// Bevy reports positive `y` for scrolling up; the accumulator expects
/// positive for scrolling down.
pub fn wheel_delta(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => -event.y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => -event.y,
    }
}

fn capture_initial_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    viewport.width = window.width();
    viewport.height = window.height();
}

fn track_viewport(mut resized: EventReader<WindowResized>, mut viewport: ResMut<Viewport>) {
    // Only the last resize of the frame matters.
    if let Some(event) = resized.read().last() {
        viewport.width = event.width;
        viewport.height = event.height;
        debug!("Viewport resized to {}x{}", event.width, event.height);
    }
}

fn track_pointer(
    mut cursor: EventReader<CursorMoved>,
    viewport: Res<Viewport>,
    mut input: ResMut<InputAccumulator>,
) {
    if let Some(event) = cursor.read().last() {
        input.set_pointer(event.position, *viewport);
    }
}

fn track_wheel(mut wheel: EventReader<MouseWheel>, mut input: ResMut<InputAccumulator>) {
    for event in wheel.read() {
        input.apply_wheel(wheel_delta(event));
    }
}
