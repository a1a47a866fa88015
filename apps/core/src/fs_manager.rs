//! Portable filesystem layout.
//!
//! Resolves the CharmForge home directory and the fixed subdirectories
//! beneath it (olog data, logs). The home can be pinned with the
//! `CHARMFORGE_HOME` environment variable; otherwise the directory next to
//! the executable is used when it carries a `data/` folder, with the crate
//! directory as the development fallback.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "CHARMFORGE_HOME";

/// Static path resolver for the portable directory layout.
pub struct PortablePathManager;

impl PortablePathManager {
    /// The root directory everything else hangs off.
    pub fn home_dir() -> PathBuf {
        if let Ok(dir) = env::var(HOME_ENV) {
            return PathBuf::from(dir);
        }

        if let Ok(exe) = env::current_exe() {
            if let Some(parent) = exe.parent() {
                if parent.join("data").is_dir() {
                    return parent.to_path_buf();
                }
            }
        }

        // Development fallback: the crate directory, where data/ lives.
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Directory holding bundled data files.
    pub fn data_dir() -> PathBuf {
        Self::home_dir().join("data")
    }

    /// Directory holding the two olog documents.
    pub fn ologs_dir() -> PathBuf {
        Self::data_dir().join("ologs")
    }

    /// Directory for run logs.
    pub fn logs_dir() -> PathBuf {
        Self::home_dir().join("logs")
    }

    /// Creates the writable directories. The data directory is expected to
    /// ship with the binary and is not created here.
    pub fn init() -> std::io::Result<()> {
        std::fs::create_dir_all(Self::logs_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_env_override() {
        temp_env::with_var(HOME_ENV, Some("/tmp/charmforge-test-home"), || {
            assert_eq!(
                PortablePathManager::home_dir(),
                PathBuf::from("/tmp/charmforge-test-home")
            );
            assert_eq!(
                PortablePathManager::ologs_dir(),
                PathBuf::from("/tmp/charmforge-test-home/data/ologs")
            );
        });
    }

    #[test]
    fn test_layout_is_nested_under_home() {
        temp_env::with_var(HOME_ENV, Some("/srv/charm"), || {
            let home = PortablePathManager::home_dir();
            assert!(PortablePathManager::data_dir().starts_with(&home));
            assert!(PortablePathManager::logs_dir().starts_with(&home));
        });
    }
}
