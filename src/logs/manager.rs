//! Log dispatch and rollover
//!
//! The manager owns the configuration, one writer per channel and the
//! shared rollover state. Dispatch is synchronous: the host delivers one
//! event at a time, the manager runs each operation to completion, and
//! every writer applies its own filter independently.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::chat::ChatMessage;
use crate::config::{parse_rollover_time, Config, FileNameOrder};
use crate::error::Result;

use super::writer::ChatLog;

// =============================================================================
// Rollover state
// =============================================================================

/// Shared rollover state. One instance governs every writer so all files
/// roll together; it is rebuilt whenever a governing value changes.
#[derive(Debug, Clone)]
pub struct RolloverState {
    pub directory: PathBuf,
    pub prefix: String,
    pub order: FileNameOrder,
    /// Wall-clock time of day at which files roll
    pub rollover: NaiveTime,
    /// When the current file set was opened; part of every derived file name
    pub opened_at: DateTime<Local>,
}

impl RolloverState {
    fn from_config(config: &Config, now: DateTime<Local>) -> Self {
        Self {
            directory: PathBuf::from(&config.log_directory),
            prefix: config.log_file_prefix.clone(),
            order: config.file_name_order,
            rollover: parse_rollover_time(&config.rollover_time),
            opened_at: now,
        }
    }

    /// True when directory, prefix, ordering or rollover time differ from
    /// the current configuration.
    fn governing_changed(&self, config: &Config) -> bool {
        self.directory != PathBuf::from(&config.log_directory)
            || self.prefix != config.log_file_prefix
            || self.order != config.file_name_order
            || self.rollover != parse_rollover_time(&config.rollover_time)
    }
}

/// Most recent occurrence of the rollover time at or before `now`.
fn rollover_boundary(rollover: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(rollover);
    if now >= today {
        today
    } else {
        today - Duration::days(1)
    }
}

// =============================================================================
// Manager
// =============================================================================

/// Owns every per-channel writer and routes each incoming message through
/// rollover checks and the writers' filters.
pub struct LogManager {
    config: Config,
    state: RolloverState,
    logs: HashMap<String, ChatLog>,
    /// Full `Name@World` of the current player, for include-self filtering
    player_name: Option<String>,
    debug: bool,
}

impl LogManager {
    pub fn new(mut config: Config) -> Self {
        config.ensure_catch_all();
        let state = RolloverState::from_config(&config, Local::now());
        Self {
            config,
            state,
            logs: HashMap::new(),
            player_name: None,
            debug: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Settings panels mutate the configuration in place; the next dispatch
    /// detects governing changes and rolls the files.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn set_player_name(&mut self, name: Option<String>) {
        self.player_name = name;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Flip debug mode, returning the new value.
    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    /// Dispatch one message to every configured channel.
    ///
    /// Order matters: governing-configuration changes roll all files first,
    /// then the wall clock is checked against the rollover time, then each
    /// writer is fetched (or created) and applies its own filter.
    pub fn log_message(&mut self, msg: &ChatMessage) -> Result<()> {
        self.config.ensure_catch_all();

        if self.state.governing_changed(&self.config) {
            debug!("governing configuration changed, rolling all logs");
            self.close_all();
            self.state = RolloverState::from_config(&self.config, msg.when);
        }
        if self.rollover_due(msg.when) {
            debug!("rollover time passed, rolling all logs");
            self.close_all();
            self.state.opened_at = msg.when;
        }

        // Expired event logs deactivate so they do not reopen.
        for cfg in self.config.logs.values_mut() {
            if cfg.is_active && cfg.event_expired(msg.when) {
                debug!(name = %cfg.name, "event log expired, deactivating");
                cfg.is_active = false;
            }
        }

        let player = self.player_name.as_deref();
        for (name, cfg) in &self.config.logs {
            let log = self
                .logs
                .entry(name.clone())
                .or_insert_with(|| ChatLog::new(name.clone()));
            log.log(cfg, &self.state, player, msg)?;
        }
        Ok(())
    }

    fn rollover_due(&self, now: DateTime<Local>) -> bool {
        let boundary = rollover_boundary(self.state.rollover, now.naive_local());
        self.state.opened_at.naive_local() < boundary
    }

    /// Close every open file. The next accepted message reopens lazily.
    pub fn close_all(&mut self) {
        for log in self.logs.values_mut() {
            log.close();
        }
    }

    /// Number of channels currently holding an open file handle.
    pub fn open_count(&self) -> usize {
        self.logs.values().filter(|log| log.is_open()).count()
    }

    /// Fixed-width table of channel name, open state and file path.
    pub fn dump_logs(&self) -> Vec<String> {
        let mut rows = vec![format!("{:<20} {:<6} {}", "Channel", "Open", "Path")];
        let mut names: Vec<&String> = self.logs.keys().collect();
        names.sort();
        for name in names {
            let log = &self.logs[name];
            rows.push(format!(
                "{:<20} {:<6} {}",
                log.name(),
                if log.is_open() { "open" } else { "closed" },
                log.path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ));
        }
        rows
    }
}

impl Drop for LogManager {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatString;
    use crate::config::{LogConfig, LogKind};
    use crate::constants::ALL_LOGS_NAME;
    use chrono::TimeZone;
    use std::fs;
    use std::path::Path;

    // === Helper functions ===

    fn unique_temp_dir() -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("chat-scribe-manager-{}-{}", pid, ts))
    }

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.log_directory = dir.to_string_lossy().to_string();
        config
    }

    fn say_at(when: DateTime<Local>) -> ChatMessage {
        ChatMessage {
            code: 10,
            label: "say".to_string(),
            sender_id: 1,
            sender: ChatString::from_player("Wolf Gold", "Zalera"),
            body: ChatString::from_text("hello"),
            when,
        }
    }

    fn log_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .into_iter()
            .flatten()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|x| x == "log").unwrap_or(false))
            .collect()
    }

    // === Rollover boundary ===

    #[test]
    fn test_boundary_is_today_when_time_passed() {
        let rollover = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        let now = NaiveDateTime::parse_from_str("2026-08-28 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let expected =
            NaiveDateTime::parse_from_str("2026-08-28 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(rollover_boundary(rollover, now), expected);
    }

    #[test]
    fn test_boundary_is_yesterday_before_time() {
        let rollover = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        let now = NaiveDateTime::parse_from_str("2026-08-28 05:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let expected =
            NaiveDateTime::parse_from_str("2026-08-27 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(rollover_boundary(rollover, now), expected);
    }

    // === Dispatch ===

    #[test]
    fn test_dispatch_opens_catch_all() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let mut manager = LogManager::new(config_in(&dir));

        manager.log_message(&say_at(Local::now())).unwrap();
        assert_eq!(manager.open_count(), 1);
        assert_eq!(log_files(&dir).len(), 1);

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_change_rolls_all_logs() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let mut manager = LogManager::new(config_in(&dir));

        manager.log_message(&say_at(Local::now())).unwrap();
        assert_eq!(manager.open_count(), 1);

        manager.config_mut().log_file_prefix = "other".to_string();
        manager.log_message(&say_at(Local::now())).unwrap();

        assert_eq!(manager.open_count(), 1);
        let files = log_files(&dir);
        assert_eq!(files.len(), 2);
        assert!(files
            .iter()
            .any(|p| p.file_name().unwrap().to_string_lossy().starts_with("other-")));

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_time_rollover_rolls_all_logs() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let mut manager = LogManager::new(config_in(&dir));

        let now = Local::now();
        manager.log_message(&say_at(now)).unwrap();
        // One day later is always past the next rollover boundary
        manager.log_message(&say_at(now + Duration::days(1))).unwrap();

        assert_eq!(manager.open_count(), 1);
        assert_eq!(log_files(&dir).len(), 2);

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_rollover_with_no_open_handles_is_noop() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let mut manager = LogManager::new(config_in(&dir));
        assert_eq!(manager.open_count(), 0);

        // Governing change with nothing open only refreshes the state
        manager.config_mut().log_file_prefix = "other".to_string();
        manager.log_message(&say_at(Local::now())).unwrap();

        assert_eq!(manager.open_count(), 1);
        assert_eq!(log_files(&dir).len(), 1);

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }

    // === Event expiry ===

    #[test]
    fn test_expired_event_log_deactivates() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let start = Local.with_ymd_and_hms(2026, 8, 1, 20, 0, 0).unwrap();

        let mut config = config_in(&dir);
        let mut event = LogConfig::new("raid-night", LogKind::Event);
        event.include_all_users = true;
        event.chat_types.insert(10, true);
        event.event_start = Some(start);
        event.event_length_minutes = 60;
        config.logs.insert("raid-night".to_string(), event);

        let mut manager = LogManager::new(config);
        manager
            .log_message(&say_at(start + Duration::minutes(90)))
            .unwrap();

        assert!(!manager.config().logs["raid-night"].is_active);
        // Only the catch-all wrote a file
        assert_eq!(manager.open_count(), 1);

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }

    // === Catch-all guarantee ===

    #[test]
    fn test_dispatch_restores_removed_catch_all() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let mut manager = LogManager::new(config_in(&dir));

        manager.config_mut().logs.remove(ALL_LOGS_NAME);
        manager.log_message(&say_at(Local::now())).unwrap();

        assert!(manager.config().logs.contains_key(ALL_LOGS_NAME));
        assert_eq!(manager.open_count(), 1);

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }

    // === Dump ===

    #[test]
    fn test_dump_logs_lists_open_state() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let mut manager = LogManager::new(config_in(&dir));

        manager.log_message(&say_at(Local::now())).unwrap();
        let rows = manager.dump_logs();

        assert!(rows[0].starts_with("Channel"));
        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("all"));
        assert!(rows[1].contains("open"));
        assert!(rows[1].contains(".log"));

        manager.close_all();
        let rows = manager.dump_logs();
        assert!(rows[1].contains("closed"));

        drop(manager);
        let _ = fs::remove_dir_all(&dir);
    }
}
