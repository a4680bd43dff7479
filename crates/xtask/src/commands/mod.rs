//! xtask command implementations

mod components;
mod simulate;
mod validate;

pub use components::Components;
pub use simulate::Simulate;
pub use validate::Validate;
