//! Configuration and dependency wiring for the command line tool.

mod dependencies;

pub use dependencies::{Dependencies, Settings};
