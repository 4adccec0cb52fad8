//! chat-scribe - game-chat log engine
//!
//! The core of a chat-logging client plugin: the host delivers chat events
//! and persists a JSON configuration blob; this crate classifies each event,
//! filters it per configured channel, formats and word-wraps accepted
//! messages, and appends them to rotating per-channel log files.
//!
//! Everything host-side (plugin lifecycle, GUI, localization, world data)
//! stays outside; the seams are narrow: deliver a classified event, carry
//! the wall clock on it, read and write files, emit diagnostics through
//! `tracing`.
//!
//! ```no_run
//! use chat_scribe::{ChatMessage, ChatPiece, Config, LogManager};
//!
//! let mut manager = LogManager::new(Config::default());
//! let msg = ChatMessage::from_event(
//!     10,
//!     false,
//!     1,
//!     vec![ChatPiece::Player {
//!         name: "Wolf Gold".into(),
//!         world: "Zalera".into(),
//!     }],
//!     vec![ChatPiece::Text("This is the body.".into())],
//!     chrono::Local::now(),
//! );
//! let _ = manager.log_message(&msg);
//! ```

pub mod chat;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logs;

pub use chat::{ChatMessage, ChatPiece, ChatString};
pub use commands::{execute_command, DiagnosticCommand};
pub use config::{Config, FileNameOrder, LogConfig, LogKind};
pub use error::{ChatLogError, Result};
pub use logs::LogManager;

/// Initialize internal tracing for engine diagnostics
///
/// Call early, before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
