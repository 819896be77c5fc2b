//! Recycling snake: eat only the falling item whose material matches the head color.

pub mod audio;
pub mod engine;
pub mod food;
pub mod game;
pub mod level;
pub mod rendering;
pub mod snake;
pub mod ui;
