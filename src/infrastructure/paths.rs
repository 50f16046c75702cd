//! Platform path resolution for config and data files.
//!
//! This module locates the two on-disk slots SpecScout owns: the optional
//! TOML config file and the persisted favorites file. Both follow the
//! platform's conventional directories, falling back to the current directory
//! when the platform reports none (minimal containers, odd CI environments).

use std::path::PathBuf;

/// Returns the data directory for SpecScout storage.
///
/// Resolves to the platform data directory plus `specscout`
/// (`~/.local/share/specscout` on Linux). The favorites file
/// [`favorites_path`] lives inside it.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("specscout")
}

/// Returns the path of the persisted favorites file.
#[must_use]
pub fn favorites_path() -> PathBuf {
    data_dir().join("favorites.json")
}

/// Returns the path of the user config file.
///
/// Resolves to the platform config directory plus `specscout/config.toml`
/// (`~/.config/specscout/config.toml` on Linux). The file is optional;
/// defaults apply when it does not exist.
#[must_use]
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("specscout")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorites_path_is_under_data_dir() {
        assert!(favorites_path().starts_with(data_dir()));
        assert_eq!(
            favorites_path().file_name().unwrap().to_str().unwrap(),
            "favorites.json"
        );
    }
}
