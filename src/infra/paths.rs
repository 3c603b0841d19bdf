// src/infra/paths.rs — XDG-compliant path management
//
// All paths respect the CVSCAN_HOME environment variable for isolation.
// When CVSCAN_HOME is set, config, data and downloads live under that
// directory. When unset, config uses ~/.cvscan/, data uses
// XDG_DATA_HOME/cvscan and downloads go to the user's download directory.

use directories::{BaseDirs, ProjectDirs, UserDirs};
use std::path::PathBuf;

/// Returns the CVSCAN_HOME override, if set.
fn cvscan_home() -> Option<PathBuf> {
    std::env::var_os("CVSCAN_HOME").map(PathBuf::from)
}

/// Home directory, falling back to the working directory on exotic systems.
pub fn dirs_home() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $CVSCAN_HOME/ or ~/.cvscan/
pub fn config_dir() -> PathBuf {
    if let Some(home) = cvscan_home() {
        return home;
    }
    dirs_home().join(".cvscan")
}

/// Data directory: $CVSCAN_HOME/data/ or ~/.local/share/cvscan/
pub fn data_dir() -> PathBuf {
    if let Some(home) = cvscan_home() {
        return home.join("data");
    }
    ProjectDirs::from("", "", "cvscan")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| config_dir().join("data"))
}

/// Default download directory for exported CVs.
pub fn download_dir() -> PathBuf {
    if let Some(home) = cvscan_home() {
        return home.join("downloads");
    }
    UserDirs::new()
        .and_then(|u| u.download_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| dirs_home().join("Downloads"))
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Log file used while the terminal UI owns the screen.
pub fn log_file_path() -> PathBuf {
    data_dir().join("cvscan.log")
}
