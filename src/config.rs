//! Configuration management
//!
//! The host persists one JSON blob for the engine. Every struct carries
//! `#[serde(default)]` so partial or empty blobs deserialize to usable
//! defaults; parse failures warn and fall back to defaults.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Local, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{ALL_LOGS_NAME, DEFAULT_LOG_PREFIX, DEFAULT_ROLLOVER_TIME};
use crate::error::{ChatLogError, Result};

// =============================================================================
// File naming
// =============================================================================

/// Placement of the channel name relative to the timestamp in file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FileNameOrder {
    /// `<prefix>-<channel>-<date>.log`
    #[default]
    PrefixGroupDate,
    /// `<prefix>-<date>-<channel>.log`
    PrefixDateGroup,
}

// =============================================================================
// Per-channel configuration
// =============================================================================

/// Behavior class of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// The catch-all channel: every labeled category from every user
    All,
    /// User-defined group with per-category and per-user filtering
    #[default]
    Group,
    /// Group that stops accepting (and deactivates) once its event ends
    Event,
}

/// Configuration for one named log channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Channel name, also used as the file-name component
    pub name: String,
    pub kind: LogKind,
    pub is_active: bool,
    /// Debug escape hatch: accept every message regardless of category
    pub include_all: bool,
    /// Per-category include flags, keyed by chat-type code
    pub chat_types: HashMap<u16, bool>,
    /// Render player references as `Name@World`
    pub include_world: bool,
    /// Accept messages from the current player
    pub include_self: bool,
    /// Accept messages from every user, not just the user table
    pub include_all_users: bool,
    /// Custom format template; `None` uses the kind default
    pub format: Option<String>,
    /// Custom message timestamp format; `None` uses the default
    pub time_format: Option<String>,
    /// Maximum line width; non-positive disables wrapping
    pub wrap_width: i32,
    /// Continuation-line indent; negative aligns with the body column
    pub wrap_indent: i32,
    /// Display overrides keyed by full `Name@World`
    pub users: HashMap<String, String>,
    /// Event start; only meaningful for `LogKind::Event`
    pub event_start: Option<DateTime<Local>>,
    /// Event duration in minutes
    pub event_length_minutes: i64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: LogKind::default(),
            is_active: true,
            include_all: false,
            chat_types: HashMap::new(),
            include_world: false,
            include_self: true,
            include_all_users: false,
            format: None,
            time_format: None,
            wrap_width: 0,
            wrap_indent: -1,
            users: HashMap::new(),
            event_start: None,
            event_length_minutes: 0,
        }
    }
}

impl LogConfig {
    /// Create a channel configuration with defaults for everything else.
    pub fn new(name: impl Into<String>, kind: LogKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    /// True when this is an event log whose end time has passed.
    pub fn event_expired(&self, now: DateTime<Local>) -> bool {
        if self.kind != LogKind::Event {
            return false;
        }
        match self.event_start {
            Some(start) => now >= start + Duration::minutes(self.event_length_minutes.max(0)),
            None => false,
        }
    }
}

// =============================================================================
// Engine configuration
// =============================================================================

/// The host-persisted configuration blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory receiving the log files
    pub log_directory: String,
    /// File-name prefix shared by every channel
    pub log_file_prefix: String,
    pub file_name_order: FileNameOrder,
    /// Time of day at which files roll, as `H:mm`
    pub rollover_time: String,
    /// Channel name to channel configuration
    pub logs: HashMap<String, LogConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self {
            log_directory: "logs".to_string(),
            log_file_prefix: DEFAULT_LOG_PREFIX.to_string(),
            file_name_order: FileNameOrder::default(),
            rollover_time: DEFAULT_ROLLOVER_TIME.to_string(),
            logs: HashMap::new(),
        };
        config.ensure_catch_all();
        config
    }
}

impl Config {
    /// The catch-all channel always exists, stays a catch-all and accepts
    /// every user. Called after every load and before every dispatch.
    pub fn ensure_catch_all(&mut self) {
        let log = self
            .logs
            .entry(ALL_LOGS_NAME.to_string())
            .or_insert_with(|| LogConfig::new(ALL_LOGS_NAME, LogKind::All));
        log.name = ALL_LOGS_NAME.to_string();
        log.kind = LogKind::All;
        log.include_all_users = true;
    }

    /// Deserialize a host-supplied blob, falling back to defaults on parse
    /// errors.
    pub fn from_json(blob: &str) -> Config {
        match serde_json::from_str::<Config>(blob) {
            Ok(mut config) => {
                config.ensure_catch_all();
                config
            }
            Err(e) => {
                warn!(error = %e, "config blob parse error, using defaults");
                Config::default()
            }
        }
    }

    /// Serialize for the host to persist.
    pub fn to_json(&self) -> String {
        // Config is always serializable (all fields are serde-compatible)
        serde_json::to_string_pretty(self).expect("Config serialization failed")
    }

    /// Load config from a file, or return defaults if missing or unreadable.
    pub fn load(path: &Path) -> Config {
        if !path.exists() {
            return Config::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => Config::from_json(&content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                Config::default()
            }
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()).map_err(|e| ChatLogError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Parse an `H:mm` rollover time, warning and falling back to the 06:00
/// default on malformed input.
pub fn parse_rollover_time(value: &str) -> NaiveTime {
    match NaiveTime::parse_from_str(value, "%H:%M") {
        Ok(time) => time,
        Err(e) => {
            warn!(value, error = %e, "invalid rollover time, using default");
            NaiveTime::parse_from_str(DEFAULT_ROLLOVER_TIME, "%H:%M").unwrap_or_default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
