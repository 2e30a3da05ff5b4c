use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "multiavatar";
pub const DEFAULT_CONFIG_FILE: &str = "view.toml";

pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

pub fn xdg_config_home() -> Option<PathBuf> {
    if let Some(path) = env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(path));
    }
    Some(home_dir()?.join(".config"))
}

pub fn config_load_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(config_home) = xdg_config_home() {
        candidates.push(config_home.join(CONFIG_DIR_NAME).join(DEFAULT_CONFIG_FILE));
    }
    candidates.push(
        PathBuf::from("/etc")
            .join(CONFIG_DIR_NAME)
            .join(DEFAULT_CONFIG_FILE),
    );
    candidates
}

pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .find(|path| path.is_file())
        .map(PathBuf::as_path)
}
