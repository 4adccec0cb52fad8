//! Chat log writing subsystem
//!
//! Centralizes everything between "message accepted" and "line on disk":
//! - `wrap` - word wrapping
//! - `format` - templates, day banners and continuation indentation
//! - `writer` - one writer per configured channel
//! - `manager` - shared rollover state and dispatch

pub mod format;
pub mod manager;
pub mod wrap;
pub mod writer;

pub use manager::{LogManager, RolloverState};
pub use wrap::wrap;
pub use writer::ChatLog;
