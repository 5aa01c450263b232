//! Platform directories and path expansion.
//!
//! Locations follow the platform conventions from the `directories` crate, e.g. on
//! Linux:
//!
//! | Purpose | Path |
//! |---------|------|
//! | config  | `~/.config/userdeck/config.toml` |
//! | logs    | `~/.local/share/userdeck/` |

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const APPLICATION: &str = "userdeck";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APPLICATION)
}

/// Default configuration file, or `None` when no home directory can be found.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Directory for trace and log files.
///
/// # Returns
///
/// The platform data directory for `userdeck` (for example
/// `~/.local/share/userdeck` on Linux), or `<temp dir>/userdeck` when no home
/// directory can be found. The directory is not created here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || std::env::temp_dir().join(APPLICATION),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, and all paths when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use userdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path").to_str(), Some("/absolute/path"));
/// assert!(!expand_tilde("~/themes/nord.toml").starts_with("~"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_is_named_config_toml() {
        if let Some(path) = default_config_file() {
            assert!(path.ends_with(CONFIG_FILE));
        }
    }

    #[test]
    fn data_dir_is_application_specific() {
        assert!(get_data_dir().to_string_lossy().contains("userdeck"));
    }

    #[test]
    fn tilde_only_expands_as_prefix() {
        assert_eq!(expand_tilde("themes/~x.toml"), PathBuf::from("themes/~x.toml"));
        if let Some(dirs) = BaseDirs::new() {
            assert_eq!(expand_tilde("~"), dirs.home_dir());
            assert_eq!(expand_tilde("~/a.toml"), dirs.home_dir().join("a.toml"));
        }
    }
}
