//! # Lifecycle Phases
//!
//! The host drives every plugin through a fixed sequence of named phases.
//! Plugins bind callbacks to a phase at a priority; the host fires each phase
//! at most once and runs the bound callbacks in priority order.
//!
//! [`PhaseDispatcher`] holds the bindings and enforces the firing rules. It is
//! owned by the [`Host`](crate::Host), which is the only caller of
//! [`PhaseDispatcher::begin`].

use crate::error::HostError;
use crate::host::Host;
use crate::priority::{HandlerId, HandlerList};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// A named point in the host lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    AfterSetupTheme,
    PluginsLoaded,
    /// Out-of-band signal sent when the plugin is switched off.
    Deactivate,
}

impl Phase {
    /// The reference host's normal sequence. `Deactivate` is not part of it.
    pub const SEQUENCE: [Phase; 3] = [Phase::Init, Phase::AfterSetupTheme, Phase::PluginsLoaded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::AfterSetupTheme => "after_setup_theme",
            Phase::PluginsLoaded => "plugins_loaded",
            Phase::Deactivate => "deactivate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zero-argument unit of work bound to a phase. It receives the host so it
/// can call back into host services.
pub type PhaseCallback = Rc<dyn Fn(&Host) -> Result<(), HostError>>;

/// Phase bindings plus the record of which phases have fired.
pub struct PhaseDispatcher {
    sequence: Vec<Phase>,
    bindings: RefCell<HashMap<Phase, HandlerList<PhaseCallback>>>,
    fired: RefCell<Vec<Phase>>,
}

impl PhaseDispatcher {
    pub fn new(sequence: Vec<Phase>) -> Self {
        Self {
            sequence,
            bindings: RefCell::new(HashMap::new()),
            fired: RefCell::new(Vec::new()),
        }
    }

    pub fn sequence(&self) -> &[Phase] {
        &self.sequence
    }

    pub fn bind(&self, phase: Phase, priority: i32, callback: PhaseCallback) -> HandlerId {
        if self.has_fired(phase) {
            warn!(%phase, priority, "Binding to a phase that already fired");
        }
        debug!(%phase, priority, "Phase binding added");
        self.bindings
            .borrow_mut()
            .entry(phase)
            .or_default()
            .insert(priority, callback)
    }

    pub fn has_fired(&self, phase: Phase) -> bool {
        self.fired.borrow().contains(&phase)
    }

    pub fn binding_count(&self, phase: Phase) -> usize {
        self.bindings
            .borrow()
            .get(&phase)
            .map(HandlerList::len)
            .unwrap_or(0)
    }

    /// Marks `phase` as fired and returns its callbacks in dispatch order.
    ///
    /// Sequence phases must fire in order and at most once. `Deactivate` may
    /// fire at any point, but only once.
    pub fn begin(&self, phase: Phase) -> Result<Vec<PhaseCallback>, HostError> {
        if self.has_fired(phase) {
            return Err(HostError::PhaseOrder {
                phase,
                reason: "already fired".into(),
            });
        }
        if let Some(pos) = self.sequence.iter().position(|p| *p == phase) {
            if let Some(missing) = self.sequence[..pos].iter().find(|p| !self.has_fired(**p)) {
                return Err(HostError::PhaseOrder {
                    phase,
                    reason: format!("{missing} has not fired yet"),
                });
            }
        } else if phase != Phase::Deactivate {
            return Err(HostError::PhaseOrder {
                phase,
                reason: "not part of this host's sequence".into(),
            });
        }
        self.fired.borrow_mut().push(phase);
        Ok(self
            .bindings
            .borrow()
            .get(&phase)
            .map(HandlerList::snapshot)
            .unwrap_or_default())
    }
}
