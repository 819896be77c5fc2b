//! UI plugin - handles the start menu, level-complete and game-over screens, and the HUD.

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use bevy_vector_shapes::prelude::*;

use crate::engine::GameEngine;
use crate::game::{
    ARENA_BORDER_COLOR, ARENA_COLOR, CategoryCount, GameEvent, GameOverUI, GamePhase, LevelCompleteUI,
    LevelText, MenuUI, ScoreText, Z_BACKGROUND,
};

const FONT_PATH: &str = "fonts/FiraSans-Bold.ttf";

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (
                start_game_from_menu,
                advance_from_overlay,
                apply_game_events.after(crate::engine::drive_engine),
            ),
        );
    }
}

// HUD text queries must be disjoint to borrow `Text` mutably twice.
type ScoreTextQuery<'w, 's> = Query<'w, 's, &'static mut Text, (With<ScoreText>, Without<LevelText>)>;
type LevelTextQuery<'w, 's> = Query<'w, 's, &'static mut Text, (With<LevelText>, Without<ScoreText>)>;

/// Initial setup system - camera, arena, HUD and the start menu.
fn setup_system(mut commands: Commands, engine: Res<GameEngine>, asset_server: Res<AssetServer>) {
    // Camera with HDR so the border can bloom
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.15,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));

    // Arena background
    let board = engine.board();
    let arena = Vec2::new(board.width as f32, board.height as f32);
    commands.spawn((
        Sprite {
            color: ARENA_COLOR,
            custom_size: Some(arena),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, Z_BACKGROUND)),
    ));

    // Glowing border just outside the arena
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: ARENA_BORDER_COLOR,
            alpha_mode: ShapeAlphaMode::Add,
            hollow: true,
            thickness: 4.0,
            corner_radii: Vec4::splat(0.02),
            transform: Transform::from_xyz(0.0, 0.0, 0.1),
            ..ShapeConfig::default_2d()
        },
        arena + Vec2::splat(4.0),
    ));

    // Score and level HUD
    let font = asset_server.load(FONT_PATH);
    commands.spawn((
        Text::from("Score: 0"),
        hud_font(&font),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));
    commands.spawn((
        Text::from("Level: 1"),
        hud_font(&font),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        },
        LevelText,
    ));

    // Start menu, removed once the first run begins
    spawn_overlay(
        &mut commands,
        &font,
        MenuUI,
        "RECYCLE SNAKE",
        Color::srgba(0.3, 1.0, 0.3, 1.0),
        &[
            "Arrow Keys or WASD to move".to_string(),
            "Eat only the item matching your head color".to_string(),
            "Any other material ends the game".to_string(),
            "Don't hit the walls or yourself!".to_string(),
        ],
        "Press SPACE to start",
    );
}

fn hud_font(font: &Handle<Font>) -> TextFont {
    TextFont {
        font: font.clone(),
        font_size: 20.0,
        ..default()
    }
}

/// Full-screen dimmed panel: a title, some body lines, and a prompt.
fn spawn_overlay(
    commands: &mut Commands,
    font: &Handle<Font>,
    marker: impl Component,
    title: &str,
    title_color: Color,
    lines: &[String],
    prompt: &str,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from(title),
                TextFont {
                    font: font.clone(),
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for line in lines {
                parent.spawn((
                    Text::from(line.as_str()),
                    TextFont {
                        font: font.clone(),
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                    Node {
                        margin: UiRect::bottom(Val::Px(10.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn((
                Text::from(prompt),
                TextFont {
                    font: font.clone(),
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 0.3, 1.0)),
                Node {
                    margin: UiRect::top(Val::Px(30.0)),
                    ..default()
                },
            ));
        });
}

fn stat_lines(stats: &[CategoryCount]) -> Vec<String> {
    stats
        .iter()
        .map(|row| format!("{}: {}", row.label, row.count))
        .collect()
}

/// System to request the first run. The menu stays up until the sprites have settled.
fn start_game_from_menu(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut engine: ResMut<GameEngine>,
    menu_ui: Query<Entity, With<MenuUI>>,
) {
    if menu_ui.is_empty() {
        return;
    }
    if keyboard_input.just_pressed(KeyCode::Space) {
        engine.start(time.elapsed());
    }
    if engine.is_started() {
        for entity in menu_ui.iter() {
            commands.entity(entity).despawn();
        }
    }
}

/// System to leave the level-complete or game-over screen on SPACE.
fn advance_from_overlay(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut engine: ResMut<GameEngine>,
    overlays: Query<Entity, Or<(With<LevelCompleteUI>, With<GameOverUI>)>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Space) {
        return;
    }
    match engine.phase() {
        Some(GamePhase::LevelComplete) => engine.continue_next_level(time.elapsed()),
        Some(GamePhase::GameOver) => engine.restart(time.elapsed()),
        _ => return,
    }
    for entity in overlays.iter() {
        commands.entity(entity).despawn();
    }
}

/// System to mirror engine events into the HUD and overlays.
fn apply_game_events(
    mut commands: Commands,
    mut events: MessageReader<GameEvent>,
    asset_server: Res<AssetServer>,
    mut score_text: ScoreTextQuery,
    mut level_text: LevelTextQuery,
) {
    for event in events.read() {
        match event {
            GameEvent::ScoreChanged(score) => {
                if let Ok(mut text) = score_text.single_mut() {
                    *text = Text::from(format!("Score: {}", score));
                }
            }
            GameEvent::LevelChanged(level) => {
                if let Ok(mut text) = level_text.single_mut() {
                    *text = Text::from(format!("Level: {}", level));
                }
            }
            GameEvent::LevelComplete { stats } => {
                let font = asset_server.load(FONT_PATH);
                spawn_overlay(
                    &mut commands,
                    &font,
                    LevelCompleteUI,
                    "LEVEL COMPLETE",
                    Color::srgba(0.3, 1.0, 0.3, 1.0),
                    &stat_lines(stats),
                    "Press SPACE to continue",
                );
            }
            GameEvent::GameOver { final_score, stats } => {
                let font = asset_server.load(FONT_PATH);
                let mut lines = vec![format!("Final Score: {}", final_score)];
                lines.extend(stat_lines(stats));
                spawn_overlay(
                    &mut commands,
                    &font,
                    GameOverUI,
                    "GAME OVER",
                    Color::srgba(1.0, 0.3, 0.3, 1.0),
                    &lines,
                    "Press SPACE to restart",
                );
            }
        }
    }
}
