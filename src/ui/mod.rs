//! Screen overlays: intro loader, dive buttons and a small diagnostics readout.

use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};

use crate::input::InputAccumulator;
use crate::simulation::FrameCounter;

pub mod controls;
pub mod loader;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(loader::LoaderPlugin)
            .add_plugins(controls::ControlsPlugin)
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .init_resource::<DebugConfig>()
            .add_systems(Startup, setup_hud)
            .add_systems(Update, (toggle_hud, update_hud).chain());
    }
}

/// Configuration for the diagnostics readout.
#[derive(Resource)]
pub struct DebugConfig {
    pub show_hud: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self { show_hud: false }
    }
}

/// Marker for the HUD text entity.
#[derive(Component)]
struct HudText;

fn setup_hud(mut commands: Commands, config: Res<DebugConfig>) {
    commands.spawn((
        Text::new("FPS: --"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.0, 0.961, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        },
        if config.show_hud {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        },
        HudText,
    ));
}

/// F3 shows or hides the readout.
fn toggle_hud(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut config: ResMut<DebugConfig>,
    mut query: Query<&mut Visibility, With<HudText>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    config.show_hud = !config.show_hud;
    for mut visibility in &mut query {
        *visibility = if config.show_hud {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    info!("HUD: {}", if config.show_hud { "ON" } else { "OFF" });
}

fn update_hud(
    config: Res<DebugConfig>,
    diagnostics: Res<DiagnosticsStore>,
    frames: Res<FrameCounter>,
    input: Res<InputAccumulator>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    if !config.show_hud {
        return;
    }

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    for mut text in &mut query {
        **text = format!(
            "FPS: {:.0} | frame {} | pointer ({:+.2}, {:+.2}) | scroll {:.1}",
            fps, frames.0, input.pointer.x, input.pointer.y, input.scroll_offset
        );
    }
}
