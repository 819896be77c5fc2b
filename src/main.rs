use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

use recycle_snake::audio::LoggedAudio;
use recycle_snake::engine::{EnginePlugin, GameEngine};
use recycle_snake::food::FoodPlugin;
use recycle_snake::game::{BACKGROUND_COLOR, EngineConfig};
use recycle_snake::rendering::{DisplayList, RenderingPlugin};
use recycle_snake::snake::SnakePlugin;
use recycle_snake::ui::UiPlugin;

const WINDOW_MARGIN: u32 = 20;

fn main() -> AppExit {
    let engine = match GameEngine::new(EngineConfig::default(), Box::new(LoggedAudio::default())) {
        Ok(engine) => engine,
        Err(err) => {
            // The log plugin is not up yet.
            eprintln!("invalid engine configuration: {err}");
            return AppExit::error();
        }
    };
    let board = engine.board();

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(
                        board.width as u32 + WINDOW_MARGIN,
                        board.height as u32 + WINDOW_MARGIN,
                    ),
                    title: "Recycle Snake".to_string(),
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(DisplayList::for_board(&board))
        .insert_resource(engine)
        .add_plugins((EnginePlugin, SnakePlugin, FoodPlugin, RenderingPlugin, UiPlugin))
        .run()
}
