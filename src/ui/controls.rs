//! Overlay buttons that dive the camera deeper into the city.

use bevy::prelude::*;

use crate::input::InputAccumulator;
use crate::simulation::FrameSet;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_controls)
            .add_systems(
                Update,
                (handle_dive_buttons.in_set(FrameSet::Input), update_button_colors),
            );
    }
}

/// Pressing this nudges the scroll offset.
#[derive(Component)]
struct DiveButton;

const BUTTON_BG: Color = Color::srgba(0.04, 0.04, 0.08, 0.7);
const BUTTON_HOVER: Color = Color::srgba(0.0, 0.4, 0.45, 0.8);
const BUTTON_BORDER: Color = Color::srgb(0.0, 0.961, 1.0);
const TEXT_COLOR: Color = Color::srgb(0.85, 1.0, 1.0);

fn setup_controls(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            left: Val::Px(24.0),
            column_gap: Val::Px(12.0),
            flex_direction: FlexDirection::Row,
            ..default()
        })
        .with_children(|row| {
            for label in ["EXPLORE", "DIVE IN"] {
                row.spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_BG),
                    BorderColor(BUTTON_BORDER),
                    DiveButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(label),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(TEXT_COLOR),
                    ));
                });
            }
        });
}

fn handle_dive_buttons(
    interactions: Query<&Interaction, (Changed<Interaction>, With<DiveButton>)>,
    mut input: ResMut<InputAccumulator>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            input.nudge();
            debug!("Dive: scroll offset now {:.1}", input.scroll_offset);
        }
    }
}

fn update_button_colors(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<DiveButton>),
    >,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER,
            Interaction::None => BUTTON_BG,
        };
    }
}
