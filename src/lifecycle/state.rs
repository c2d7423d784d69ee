use chrono::Utc;
use hook_framework::Phase;
use std::fmt;
use std::sync::OnceLock;

/// Where the plugin is in its lifecycle.
///
/// `Unstarted → Constructing → Phase(..)… → Steady → Deactivating → Stopped`.
/// Deactivation may interrupt the sequence at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unstarted,
    Constructing,
    /// Inside (or just past) the named host phase.
    Phase(Phase),
    /// The last phase of the host sequence completed.
    Steady,
    Deactivating,
    Stopped,
}

impl BootstrapState {
    /// Deactivation is final; later phases must not revive the plugin.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BootstrapState::Deactivating | BootstrapState::Stopped)
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapState::Unstarted => f.write_str("unstarted"),
            BootstrapState::Constructing => f.write_str("constructing"),
            BootstrapState::Phase(phase) => write!(f, "phase:{phase}"),
            BootstrapState::Steady => f.write_str("steady"),
            BootstrapState::Deactivating => f.write_str("deactivating"),
            BootstrapState::Stopped => f.write_str("stopped"),
        }
    }
}

static INIT_TIMESTAMP: OnceLock<i64> = OnceLock::new();

/// UTC seconds at the first bootstrap in this process. Later calls return
/// the same value.
pub fn init_timestamp() -> i64 {
    *INIT_TIMESTAMP.get_or_init(|| Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_captured_once() {
        let first = init_timestamp();
        let second = init_timestamp();

        assert_eq!(first, second);
    }

    #[test]
    fn test_terminal_states() {
        assert!(BootstrapState::Stopped.is_terminal());
        assert!(!BootstrapState::Phase(Phase::Init).is_terminal());
        assert_eq!(BootstrapState::Phase(Phase::Init).to_string(), "phase:init");
    }
}
