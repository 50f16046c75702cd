//! Infrastructure layer: platform-specific utilities.

pub mod paths;

pub use paths::{config_path, data_dir, favorites_path};
