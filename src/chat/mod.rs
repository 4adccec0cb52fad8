//! Chat event model
//!
//! - `types` - category code to label classification
//! - `string` - structured sender/body strings parsed from host payloads
//! - `message` - the immutable per-event record

pub mod message;
pub mod string;
pub mod types;

pub use message::ChatMessage;
pub use string::{ChatPiece, ChatString};
pub use types::type_label;
