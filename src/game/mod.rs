//! Core game module containing shared types, configuration, events, errors, and constants.

mod components;
mod config;
mod constants;
mod error;
mod events;
mod resources;

pub use components::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use resources::*;
