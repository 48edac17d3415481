//! Filesystem helpers for application data and configuration files.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Application dot-directory under the user's home directory
pub static CHART_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = home.join(".chart_engine");
    if !path.exists() {
        let _ = fs::create_dir_all(&path);
    }
    path
});

/// Get path for a file under the app directory
pub fn get_file_path(filename: &str) -> PathBuf {
    CHART_DIR.join(filename)
}

/// Get path for a folder under the app directory, creating it if needed
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = CHART_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}
