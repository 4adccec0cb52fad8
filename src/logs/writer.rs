//! Per-channel log writer
//!
//! Each configured channel owns one writer. The writer applies the channel's
//! filter, formats and wraps accepted messages, and appends them to its
//! file, opening it lazily after a rollover. Open failures degrade the
//! writer to a no-op sink until the next rollover; writes are flushed after
//! every message to minimize loss on a crash.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::warn;

use crate::chat::ChatMessage;
use crate::config::{LogConfig, LogKind};
use crate::constants::{
    DEFAULT_ALL_FORMAT, DEFAULT_GROUP_FORMAT, DEFAULT_TIME_FORMAT, FILE_NAME_COUNTER_MAX,
    FILE_TIMESTAMP_FORMAT, LOG_FILE_EXT, SENDER_COLUMN_WIDTH, TIME_COLUMN_WIDTH,
};
use crate::error::{ChatLogError, Result};

use super::format::{apply_template, continuation_indent, day_banner, FormatSlots};
use super::manager::RolloverState;
use super::wrap::wrap;

/// File handle states for one channel.
enum Handle {
    /// No file open
    Closed,
    /// Appending to `path`
    Open { file: BufWriter<File>, path: PathBuf },
    /// Open failed; drop lines until the next rollover
    Noop,
}

/// One channel's writer: filter, format, append.
pub struct ChatLog {
    name: String,
    handle: Handle,
    /// Last calendar date a line was written; a change emits a day banner
    last_date: Option<NaiveDate>,
}

impl ChatLog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: Handle::Closed,
            last_date: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        matches!(self.handle, Handle::Open { .. })
    }

    /// Resolved file path while open.
    pub fn path(&self) -> Option<&Path> {
        match &self.handle {
            Handle::Open { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Filter, format and append one message. Rejected messages and degraded
    /// writers return `Ok`; only file-name exhaustion is a hard error.
    pub fn log(
        &mut self,
        cfg: &LogConfig,
        state: &RolloverState,
        player: Option<&str>,
        msg: &ChatMessage,
    ) -> Result<()> {
        if !should_log(cfg, msg, player) {
            return Ok(());
        }
        self.ensure_open(state)?;

        let date = msg.when.date_naive();
        let mut out: Vec<String> = Vec::new();
        if self.last_date != Some(date) {
            out.push(day_banner(date));
        }
        render_message(cfg, msg, &mut out);

        if let Handle::Open { file, path } = &mut self.handle {
            for line in &out {
                if let Err(e) = writeln!(file, "{}", line) {
                    warn!(path = %path.display(), error = %e, "write failed, dropping line");
                }
            }
            let _ = file.flush();
            self.last_date = Some(date);
        }
        Ok(())
    }

    /// Flush and drop the file handle. The next accepted message reopens
    /// with a freshly derived name.
    pub fn close(&mut self) {
        if let Handle::Open { file, .. } = &mut self.handle {
            let _ = file.flush();
        }
        self.handle = Handle::Closed;
        self.last_date = None;
    }

    fn ensure_open(&mut self, state: &RolloverState) -> Result<()> {
        if !matches!(self.handle, Handle::Closed) {
            return Ok(());
        }
        // Leaf-only creation: a missing parent fails silently and the open
        // below degrades the writer.
        if !state.directory.exists() {
            let _ = fs::create_dir(&state.directory);
        }
        let path = derive_path(state, &self.name)?;
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                self.handle = Handle::Open {
                    file: BufWriter::new(file),
                    path,
                };
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "cannot open log file, channel degraded until next rollover"
                );
                self.handle = Handle::Noop;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Decide whether a message is written to a channel.
///
/// Inactive channels reject everything, even in debug mode. The catch-all
/// accepts every labeled category from every user; group and event channels
/// apply their per-category flags and user rules.
pub(crate) fn should_log(cfg: &LogConfig, msg: &ChatMessage, player: Option<&str>) -> bool {
    if !cfg.is_active {
        return false;
    }
    if cfg.include_all {
        return true;
    }
    if msg.label.is_empty() {
        return false;
    }
    match cfg.kind {
        LogKind::All => true,
        LogKind::Group | LogKind::Event => {
            if !cfg.chat_types.get(&msg.code).copied().unwrap_or(false) {
                return false;
            }
            if cfg.include_all_users {
                return true;
            }
            let sender = msg.sender.as_text(true);
            if cfg.users.contains_key(&sender) {
                return true;
            }
            cfg.include_self && player.is_some_and(|p| p == sender)
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render an accepted message into one or more output lines.
pub(crate) fn render_message(cfg: &LogConfig, msg: &ChatMessage, out: &mut Vec<String>) {
    let body_lines = wrap(&msg.body.as_text(cfg.include_world), cfg.wrap_width);

    let raw_sender = msg.sender.as_text(true);
    // Overrides are keyed by the full pre-override name; blank overrides
    // fall back to the cleaned name.
    let sender = match cfg.users.get(&raw_sender) {
        Some(display) if !display.trim().is_empty() => display.clone(),
        _ => msg.sender.as_text(cfg.include_world),
    };
    let tagged = format!("{} [{}]", sender, msg.label);

    let time_format = cfg.time_format.as_deref().unwrap_or(DEFAULT_TIME_FORMAT);
    let time = msg.when.format(time_format).to_string();

    // Group and event lines are columnar: right-padded time and sender.
    let (time, tagged_sender) = match cfg.kind {
        LogKind::All => (time, tagged),
        LogKind::Group | LogKind::Event => (
            format!("{:<width$}", time, width = TIME_COLUMN_WIDTH),
            format!("{:<width$}", tagged, width = SENDER_COLUMN_WIDTH),
        ),
    };

    let slots = FormatSlots {
        category: msg.label.clone(),
        category_short: msg.label.clone(),
        raw_sender,
        sender,
        tagged_sender,
        body: body_lines[0].clone(),
        time,
    };
    let template = cfg.format.as_deref().unwrap_or(match cfg.kind {
        LogKind::All => DEFAULT_ALL_FORMAT,
        LogKind::Group | LogKind::Event => DEFAULT_GROUP_FORMAT,
    });

    let first = apply_template(template, &slots);
    let indent = continuation_indent(&first, &slots.body, cfg.wrap_indent);
    out.push(first);
    for line in &body_lines[1..] {
        out.push(format!("{}{}", " ".repeat(indent), line));
    }
}

// =============================================================================
// File naming
// =============================================================================

/// Derive the next unused file path for a channel from the shared rollover
/// state, trying numeric suffixes on collision.
fn derive_path(state: &RolloverState, name: &str) -> Result<PathBuf> {
    use crate::config::FileNameOrder;

    let date = state.opened_at.format(FILE_TIMESTAMP_FORMAT);
    let base = match state.order {
        FileNameOrder::PrefixGroupDate => format!("{}-{}-{}", state.prefix, name, date),
        FileNameOrder::PrefixDateGroup => format!("{}-{}-{}", state.prefix, date, name),
    };

    let candidate = state.directory.join(format!("{}.{}", base, LOG_FILE_EXT));
    if !candidate.exists() {
        return Ok(candidate);
    }
    for counter in 1..=FILE_NAME_COUNTER_MAX {
        let candidate = state
            .directory
            .join(format!("{}-{}.{}", base, counter, LOG_FILE_EXT));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(ChatLogError::FileNameExhausted {
        directory: state.directory.clone(),
        base,
    })
}
