//! Message formatting
//!
//! Template substitution, the day-separator banner, and continuation-line
//! indentation shared by all per-channel writers.

use chrono::NaiveDate;

use crate::constants::{BANNER_BAR_WIDTH, BANNER_DATE_FORMAT};

/// Values available to a format template.
///
/// `category` and `category_short` both resolve to the classifier output;
/// templates may use either name.
#[derive(Debug, Clone)]
pub struct FormatSlots {
    pub category: String,
    pub category_short: String,
    /// Sender rendered as text before any display override
    pub raw_sender: String,
    /// Sender after the display-override lookup
    pub sender: String,
    /// `sender [label]` composite
    pub tagged_sender: String,
    /// First wrapped body line
    pub body: String,
    /// Formatted message timestamp
    pub time: String,
}

/// Substitute the seven slots into a format template.
pub fn apply_template(template: &str, slots: &FormatSlots) -> String {
    template
        .replace("{category_short}", &slots.category_short)
        .replace("{category}", &slots.category)
        .replace("{raw_sender}", &slots.raw_sender)
        .replace("{tagged_sender}", &slots.tagged_sender)
        .replace("{sender}", &slots.sender)
        .replace("{body}", &slots.body)
        .replace("{time}", &slots.time)
}

/// Day-separator banner written before the first line of a new calendar day.
pub fn day_banner(date: NaiveDate) -> String {
    let bar = "=".repeat(BANNER_BAR_WIDTH);
    format!("{} {} {}", bar, date.format(BANNER_DATE_FORMAT), bar)
}

/// Left padding for wrapped continuation lines.
///
/// An explicit non-negative indent wins; otherwise continuation lines align
/// with the column where the body begins in the first formatted line.
pub fn continuation_indent(first_line: &str, first_body_line: &str, configured: i32) -> usize {
    if configured >= 0 {
        return configured as usize;
    }
    if first_body_line.is_empty() {
        return 0;
    }
    match first_line.find(first_body_line) {
        Some(byte_idx) => first_line[..byte_idx].chars().count(),
        None => 0,
    }
}
