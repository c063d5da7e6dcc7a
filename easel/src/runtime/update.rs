//! Once-a-day check for a newer release.
//!
//! Nothing here is fatal: callers log the returned error and carry on.

use std::cmp::Ordering;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use super::storage;
use crate::core::config::UpdateConfig;
use crate::core::error::{Error, Result};
use crate::core::logging::{debug, info};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ANSWER_UPDATE: &str = "update";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UpdateStatus {
    Disabled,
    /// Checked less than a day ago.
    Throttled,
    UpToDate { remote: String },
    /// The installed version is at or below the recorded `skip_past`.
    Skipped { remote: String },
    /// Newer version found but no updater is configured.
    Available { remote: String },
    Declined { remote: String },
    /// The updater took over; the program should exit.
    Updating { remote: String },
}

pub fn check_for_update(config: &UpdateConfig) -> Result<UpdateStatus> {
    if !config.enabled || config.url.is_none() {
        return Ok(UpdateStatus::Disabled);
    }
    let dir = storage::config_dir()
        .ok_or_else(|| Error::Update("no config directory".to_string()))?;
    check_with(config, &dir, Utc::now(), fetch_remote_version)
}

/// [`check_for_update`] with the storage location, clock and fetcher
/// supplied by the caller.
pub fn check_with(
    config: &UpdateConfig,
    dir: &Path,
    now: DateTime<Utc>,
    fetch: impl FnOnce(&str, Duration) -> Result<String>,
) -> Result<UpdateStatus> {
    if !config.enabled {
        return Ok(UpdateStatus::Disabled);
    }
    let Some(url) = config.url.as_deref() else {
        return Ok(UpdateStatus::Disabled);
    };

    let mut info = storage::load_update_info(dir)?;
    if let Some(last) = info.last_attempt.and_then(|s| DateTime::from_timestamp(s, 0)) {
        if now - last < TimeDelta::days(1) {
            debug!("Update check skipped, last attempt at {}", last);
            return Ok(UpdateStatus::Throttled);
        }
    }

    info.last_attempt = Some(now.timestamp());
    storage::save_update_info(dir, &info)?;

    let remote = fetch(url, Duration::from_millis(config.timeout_ms))?
            .trim()
            .to_string();
    if remote.is_empty() {
        return Err(Error::Update("empty version response".to_string()));
    }

    // `skip_past` silences offers until this install moves beyond it.
    if let Some(skip_past) = &info.skip_past {
        if compare_versions(VERSION, skip_past) != Ordering::Greater {
            return Ok(UpdateStatus::Skipped { remote });
        }
    }

    if compare_versions(&remote, VERSION) != Ordering::Greater {
        return Ok(UpdateStatus::UpToDate { remote });
    }

    info!("Version {} is available (running {})", remote, VERSION);

    let Some(updater) = &config.updater else {
        return Ok(UpdateStatus::Available { remote });
    };

    if run_updater(updater, &remote)? {
        Ok(UpdateStatus::Updating { remote })
    } else {
        Ok(UpdateStatus::Declined { remote })
    }
}

/// Compares dotted versions segment by segment, numerically where both
/// segments are numbers. Missing segments count as zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.trim().split('.');
    let mut right = b.trim().split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let l = l.unwrap_or("0");
                let r = r.unwrap_or("0");
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn fetch_remote_version(url: &str, timeout: Duration) -> Result<String> {
    debug!("Fetching {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Update(e.to_string()))?;
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|e| Error::Update(e.to_string()))
}

/// Hands the candidate version to the updater and reports whether it
/// answered `update`.
fn run_updater(updater: &Path, version: &str) -> Result<bool> {
    let mut child = Command::new(updater)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        writeln!(stdin, "{}", version)?;
    }

    let mut answer = String::new();
    if let Some(mut stdout) = child.stdout.take() {
        stdout.read_to_string(&mut answer)?;
    }
    child.wait()?;

    Ok(answer.trim() == ANSWER_UPDATE)
}
