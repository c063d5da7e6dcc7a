use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 400;
pub const DEFAULT_STEPS_PER_SECOND: f64 = 30.0;
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 60;
pub const DEFAULT_MODAL_POOL_SIZE: usize = 3;
pub const DEFAULT_TITLE: &str = "Easel";
pub const DEFAULT_MAX_SHAPE_COUNT: usize = 1000;

const ENV_NO_UPDATE: &str = "EASEL_NO_UPDATE";
const ENV_MODAL_BIN: &str = "EASEL_MODAL_BIN";
const ENV_UPDATE_URL: &str = "EASEL_UPDATE_URL";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Window caption and modal title. Falls back to the executable name.
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub steps_per_second: f64,
    /// Upper bound on how long one loop iteration waits for input.
    pub refresh_delay_ms: u64,
    pub inspector_enabled: bool,
    pub always_show_inspector: bool,
    pub modal_pool_size: usize,
    /// Explicit path to the text-input helper executable.
    pub modal_command: Option<PathBuf>,
    /// Limit on shapes held by the top-level group, nested ones included.
    pub max_shape_count: usize,
    pub update: UpdateConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            steps_per_second: DEFAULT_STEPS_PER_SECOND,
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
            inspector_enabled: true,
            always_show_inspector: false,
            modal_pool_size: DEFAULT_MODAL_POOL_SIZE,
            modal_command: None,
            max_shape_count: DEFAULT_MAX_SHAPE_COUNT,
            update: UpdateConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateConfig {
    pub enabled: bool,
    /// Plain-text file holding the newest published version. No check
    /// runs while unset.
    pub url: Option<String>,
    /// Program that receives the candidate version on stdin and answers
    /// `update` when the running program should exit.
    pub updater: Option<PathBuf>,
    pub timeout_ms: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            updater: None,
            timeout_ms: 3000,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str::<Self>(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `EASEL_*` environment overrides on top of `self`.
    pub fn with_env(mut self) -> Self {
        if env::var_os(ENV_NO_UPDATE).is_some() {
            self.update.enabled = false;
        }
        if let Some(path) = env::var_os(ENV_MODAL_BIN) {
            self.modal_command = Some(PathBuf::from(path));
        }
        if let Ok(url) = env::var(ENV_UPDATE_URL) {
            if !url.is_empty() {
                self.update.url = Some(url);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::usage(format!(
                "Window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        validate_max_shape_count(self.max_shape_count)?;
        validate_steps_per_second(self.steps_per_second)
    }

    pub fn resolved_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        env::current_exe()
            .ok()
            .and_then(|path| {
                path.file_stem().map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}

pub fn validate_steps_per_second(value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::usage(format!(
            "stepsPerSecond must be a positive number, got {}",
            value
        )))
    }
}

pub fn validate_max_shape_count(value: usize) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(Error::usage("maxShapeCount must be at least 1"))
    }
}
