//! Match event stream
//!
//! Simulation systems emit [`GameEvent`]s onto the [`EventBus`]; metrics and
//! scenario assertions read them back.

mod bus;
mod types;

pub use bus::{BusEvent, EventBus};
pub use types::GameEvent;
