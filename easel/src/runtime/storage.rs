use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories_next::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

const UPDATE_INFO_FILE: &str = "update_info.json";

pub fn config_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|base| base.config_dir().join("Easel"))
}

pub fn screenshot_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|base| base.home_dir().join("Easel").join("Screenshots"))
}

/// Bookkeeping for the once-a-day update check.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpdateInfo {
    /// Unix seconds of the last check, successful or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<i64>,
    /// Versions up to and including this one are never offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_past: Option<String>,
}

fn update_info_path(dir: &Path) -> PathBuf {
    dir.join(UPDATE_INFO_FILE)
}

/// Missing file means nothing has been recorded yet.
pub fn load_update_info(dir: &Path) -> Result<UpdateInfo> {
    match fs::read_to_string(update_info_path(dir)) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(UpdateInfo::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_update_info(dir: &Path, info: &UpdateInfo) -> Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(info)?;
    fs::write(update_info_path(dir), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("easel-storage-test")
            .join(name)
            .join(std::process::id().to_string());
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = temp_dir("missing");
        assert_eq!(load_update_info(&dir).unwrap(), UpdateInfo::default());
    }

    #[test]
    fn save_then_load() {
        let dir = temp_dir("save");
        let info = UpdateInfo {
            last_attempt: Some(1_700_000_000),
            skip_past: Some("1.2.0".to_string()),
        };
        save_update_info(&dir, &info).unwrap();
        assert_eq!(load_update_info(&dir).unwrap(), info);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(UPDATE_INFO_FILE), "{not json").unwrap();
        assert!(load_update_info(&dir).is_err());
    }
}
