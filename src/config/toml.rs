use crate::error::{AvatarError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::path::Path;

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AvatarError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_from_str<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<T> {
    toml::from_str(raw).map_err(|err| AvatarError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub fn load_from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = read_to_string(path)?;
    parse_from_str(path, &raw)
}

pub fn to_string_pretty<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    toml::to_string_pretty(value).map_err(|err| AvatarError::ConfigWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub fn save_to_file_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let write_error = |err: std::io::Error| AvatarError::ConfigWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let output = to_string_pretty(path, value)?;
    fs::write(path, output).map_err(write_error)
}
