//! World: the field, its walls and goal mouths, and static obstacles

mod field;
mod obstacle;

pub use field::*;
pub use obstacle::*;
