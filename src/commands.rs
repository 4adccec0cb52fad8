//! Diagnostic command surface
//!
//! Translates host-dispatched diagnostic commands into manager calls,
//! returning the lines to show the user.

use crate::logs::LogManager;

/// Commands the host command dispatcher can route to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCommand {
    /// Flip debug mode
    ToggleDebug,
    /// Table of channels with open state and file path
    DumpLogs,
    /// Table of debug flag states
    ListFlags,
}

impl DiagnosticCommand {
    /// Parse a command word from the host's command dispatcher.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "debug" => Some(Self::ToggleDebug),
            "dump" => Some(Self::DumpLogs),
            "flags" => Some(Self::ListFlags),
            _ => None,
        }
    }
}

/// Execute a diagnostic command against the manager.
pub fn execute_command(manager: &mut LogManager, cmd: DiagnosticCommand) -> Vec<String> {
    match cmd {
        DiagnosticCommand::ToggleDebug => {
            let on = manager.toggle_debug();
            vec![format!(
                "Debug mode {}",
                if on { "enabled" } else { "disabled" }
            )]
        }
        DiagnosticCommand::DumpLogs => manager.dump_logs(),
        DiagnosticCommand::ListFlags => vec![
            format!("{:<12} {}", "Flag", "Value"),
            format!("{:<12} {}", "debug", manager.debug()),
        ],
    }
}
