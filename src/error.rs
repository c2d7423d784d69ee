use crate::config::ConfigError;
use hook_framework::HostError;
use thiserror::Error;

/// Errors raised by the subscriptions bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A host call failed. Passed on untouched.
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("No scheduler is registered under `{0}`")]
    UnknownScheduler(String),

    #[error("The subsystem factory cannot build `{0}`")]
    UnknownSubsystem(String),

    #[error("The plugin has already been bootstrapped")]
    AlreadyBootstrapped,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Phase callbacks report [`HostError`]. Host errors go back unchanged,
/// everything else is wrapped.
impl From<BootstrapError> for HostError {
    fn from(err: BootstrapError) -> Self {
        match err {
            BootstrapError::Host(inner) => inner,
            other => HostError::callback(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_errors_pass_through_unchanged() {
        let err: HostError = BootstrapError::Host(HostError::DuplicateEntityType("x".into())).into();
        assert!(matches!(err, HostError::DuplicateEntityType(key) if key == "x"));

        let err: HostError = BootstrapError::UnknownScheduler("Nope".into()).into();
        assert!(matches!(err, HostError::Callback(_)));
        assert!(err.to_string().contains("Nope"));
    }
}
