//! Configuration and dependency wiring for the demonstration binary.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;
