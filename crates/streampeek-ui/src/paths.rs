// src/paths.rs
// Single source of truth for where StreamPeek stores its data files.

use std::path::PathBuf;

/// `%APPDATA%\StreamPeek` on Windows, `~/.local/share/streampeek` elsewhere.
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let base = std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir());
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share"))
        .unwrap_or_else(|_| std::env::temp_dir());
    #[cfg(target_os = "windows")]
    return base.join("StreamPeek");
    #[cfg(not(target_os = "windows"))]
    base.join("streampeek")
}

pub fn settings_file() -> PathBuf {
    app_data_dir().join("settings.json")
}

pub fn follows_file() -> PathBuf {
    app_data_dir().join("follows.json")
}
