//! Engine-wide constants
//!
//! Centralized defaults to avoid duplication and ensure consistency.

// =============================================================================
// Channels
// =============================================================================

/// Name of the always-present catch-all log channel
pub const ALL_LOGS_NAME: &str = "all";

// =============================================================================
// Files
// =============================================================================

/// Default file-name prefix for log files
pub const DEFAULT_LOG_PREFIX: &str = "chat";

/// Extension for log files (without the dot)
pub const LOG_FILE_EXT: &str = "log";

/// Timestamp component of a log file name
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Highest suffix tried when a derived file name already exists
pub const FILE_NAME_COUNTER_MAX: u32 = 9999;

// =============================================================================
// Rollover
// =============================================================================

/// Default time-of-day at which log files roll over (`H:mm`)
pub const DEFAULT_ROLLOVER_TIME: &str = "06:00";

// =============================================================================
// Formatting
// =============================================================================

/// Date format used by the day-separator banner
pub const BANNER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of `=` characters on each side of the day-separator banner
pub const BANNER_BAR_WIDTH: usize = 30;

/// Default message timestamp format for group and event logs
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %p";

/// Width of the right-padded time column in group and event lines
pub const TIME_COLUMN_WIDTH: usize = 9;

/// Width of the right-padded tagged-sender column in group and event lines
pub const SENDER_COLUMN_WIDTH: usize = 30;

/// Default format template for the catch-all log
pub const DEFAULT_ALL_FORMAT: &str = "{category}:{raw_sender}:{body}";

/// Default format template for group and event logs
pub const DEFAULT_GROUP_FORMAT: &str = "{time}{tagged_sender} {body}";
