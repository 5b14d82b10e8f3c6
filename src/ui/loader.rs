//! Intro overlay that fades the city in after a fixed delay.

use bevy::prelude::*;

use crate::game_state::SceneState;

pub struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoaderConfig>()
            .add_systems(Startup, setup_loader)
            .add_systems(Update, tick_loader.run_if(in_state(SceneState::Loading)))
            .add_systems(OnEnter(SceneState::Running), dismiss_loader);
    }
}

#[derive(Resource)]
pub struct LoaderConfig {
    /// Seconds the overlay stays up.
    pub delay_secs: f32,
    pub title: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delay_secs: 2.5,
            title: "INITIALIZING NEON GRID".into(),
        }
    }
}

#[derive(Resource)]
struct LoaderTimer(Timer);

#[derive(Component)]
struct LoaderRoot;

const OVERLAY_BG: Color = Color::srgb(0.039, 0.039, 0.059);
const TITLE_COLOR: Color = Color::srgb(0.0, 0.961, 1.0);

fn setup_loader(mut commands: Commands, config: Res<LoaderConfig>) {
    commands.insert_resource(LoaderTimer(Timer::from_seconds(
        config.delay_secs.max(0.0),
        TimerMode::Once,
    )));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(OVERLAY_BG),
            GlobalZIndex(10),
            LoaderRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(config.title.clone()),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(TITLE_COLOR),
            ));
        });
}

fn tick_loader(
    time: Res<Time>,
    timer: Option<ResMut<LoaderTimer>>,
    mut next_state: ResMut<NextState<SceneState>>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.0.tick(time.delta()).finished() {
        next_state.set(SceneState::Running);
    }
}

fn dismiss_loader(mut commands: Commands, roots: Query<Entity, With<LoaderRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<LoaderTimer>();
    info!("Loader dismissed");
}
