//! # Subsystem Construction Contract
//!
//! The host knows nothing about the subsystems a plugin brings up, and the
//! plugin's orchestrator only knows their construction contract: a subsystem
//! is *constructed* by a [`SubsystemFactory`] and then *initialized* once,
//! with the host available for registering its own hooks.

use crate::error::HostError;
use crate::host::Host;

/// A unit of plugin functionality brought up during bootstrap.
pub trait Subsystem {
    /// Stable identifier, usually the id it was built from.
    fn name(&self) -> &str;

    /// Second half of construction. The default does nothing.
    fn initialize(&mut self, _host: &Host) -> Result<(), HostError> {
        Ok(())
    }
}

/// Produces subsystems by id.
///
/// Returning `None` means the factory does not know the id, which the
/// orchestrator treats as a wiring bug.
pub trait SubsystemFactory {
    fn build(&self, id: &str) -> Option<Box<dyn Subsystem>>;
}

impl<F> SubsystemFactory for F
where
    F: Fn(&str) -> Option<Box<dyn Subsystem>>,
{
    fn build(&self, id: &str) -> Option<Box<dyn Subsystem>> {
        self(id)
    }
}
