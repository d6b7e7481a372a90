//! Snake: steer a growing snake to food without hitting walls or itself.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
