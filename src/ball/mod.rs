//! Ball module - puck state and its physics

mod components;
mod physics;

pub use components::*;
pub use physics::*;
