//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "gridline";
const APPLICATION: &str = "gridline";

/// File name of the default view file inside the config directory.
pub const VIEW_FILE: &str = "view.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory for configuration files.
///
/// - Linux: `$XDG_CONFIG_HOME/gridline` or `~/.config/gridline`
/// - macOS: `~/Library/Application Support/dev.gridline.gridline`
/// - Windows: `C:\Users\<User>\AppData\Roaming\gridline\gridline\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path of the view file used when `--view` is not given.
pub fn default_view_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(VIEW_FILE))
}
