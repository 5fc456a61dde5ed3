//! Player module - bodies, teams, and movement/collision physics

mod components;
mod physics;

pub use components::*;
pub use physics::*;
