//! # Test Doubles & Testing Guide
//!
//! Bootstrap code is all about *order*: which subsystem came up first, which
//! hook ran before which. The types here record that order so tests can assert
//! on it without building real subsystems.
//!
//! ## When to use which double
//!
//! | Double | Use case |
//! |--------|----------|
//! | [`CallLog`] | Record any sequence of events from closures, handlers, subsystems |
//! | [`RecordingFactory`] | Stand in for the real subsystem catalog during bootstrap |
//!
//! ## Recording handler order
//!
//! ```rust
//! use hook_framework::mock::CallLog;
//! use hook_framework::{Host, Phase};
//!
//! let host = Host::default();
//! let log = CallLog::new();
//!
//! for (priority, tag) in [(9, "statuses"), (6, "entity-type"), (3, "translations")] {
//!     let log = log.clone();
//!     host.bind(Phase::Init, priority, move |_: &Host| {
//!         log.record(tag);
//!         Ok(())
//!     });
//! }
//!
//! log.expect("translations").expect("entity-type").expect("statuses");
//! host.run_phase(Phase::Init).unwrap();
//! log.verify();
//! ```
//!
//! ## Simulating subsystem failures
//!
//! ```rust
//! use hook_framework::mock::RecordingFactory;
//! use hook_framework::{Host, Subsystem, SubsystemFactory};
//!
//! let factory = RecordingFactory::new().fail_initialize("retry_manager");
//! let host = Host::default();
//!
//! let mut subsystem = factory.build("retry_manager").unwrap();
//! assert!(subsystem.initialize(&host).is_err());
//! assert_eq!(factory.log().calls(), vec!["construct:retry_manager", "initialize:retry_manager"]);
//! ```

use crate::error::HostError;
use crate::host::Host;
use crate::subsystem::{Subsystem, SubsystemFactory};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

/// An ordered, shareable record of calls with optional expectations.
///
/// Clones share the same record.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
    expectations: Rc<RefCell<VecDeque<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn contains(&self, call: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == call)
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Queues an expected call. Expectations must appear in the record in the
    /// order they were queued; other calls may be interleaved.
    pub fn expect(&self, call: impl Into<String>) -> &Self {
        self.expectations.borrow_mut().push_back(call.into());
        self
    }

    /// Panics unless every queued expectation was met, in order.
    pub fn verify(&self) {
        let calls = self.calls.borrow();
        let mut remaining = calls.iter();
        let expectations = self.expectations.borrow();
        for expected in expectations.iter() {
            if !remaining.any(|c| c == expected) {
                panic!("Expected call `{expected}` not found in order. Recorded: {calls:?}");
            }
        }
    }
}

/// Failure injected by [`RecordingFactory::fail_initialize`].
#[derive(Debug, thiserror::Error)]
#[error("Injected failure initializing {0}")]
pub struct InjectedFailure(pub String);

/// A subsystem that only records its lifecycle.
pub struct RecordingSubsystem {
    id: String,
    log: CallLog,
    fail: bool,
}

impl Subsystem for RecordingSubsystem {
    fn name(&self) -> &str {
        &self.id
    }

    fn initialize(&mut self, _host: &Host) -> Result<(), HostError> {
        self.log.record(format!("initialize:{}", self.id));
        if self.fail {
            return Err(HostError::callback(InjectedFailure(self.id.clone())));
        }
        Ok(())
    }
}

/// Builds a [`RecordingSubsystem`] for any id unless told otherwise.
#[derive(Default)]
pub struct RecordingFactory {
    log: CallLog,
    unknown: HashSet<String>,
    failing: HashSet<String>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares an existing log, so factory events interleave with others.
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Makes `build(id)` return `None`.
    pub fn without(mut self, id: impl Into<String>) -> Self {
        self.unknown.insert(id.into());
        self
    }

    /// Makes the subsystem built for `id` fail in `initialize`.
    pub fn fail_initialize(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Ids constructed so far, in order.
    pub fn constructed(&self) -> Vec<String> {
        self.log
            .calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("construct:").map(str::to_owned))
            .collect()
    }
}

impl SubsystemFactory for RecordingFactory {
    fn build(&self, id: &str) -> Option<Box<dyn Subsystem>> {
        if self.unknown.contains(id) {
            return None;
        }
        self.log.record(format!("construct:{id}"));
        Some(Box::new(RecordingSubsystem {
            id: id.to_owned(),
            log: self.log.clone(),
            fail: self.failing.contains(id),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_interleaved_calls() {
        let log = CallLog::new();
        log.expect("a").expect("c");
        log.record("a");
        log.record("b");
        log.record("c");

        log.verify();
        assert_eq!(log.position("b"), Some(1));
    }

    #[test]
    #[should_panic(expected = "Expected call `a`")]
    fn test_verify_rejects_wrong_order() {
        let log = CallLog::new();
        log.expect("b").expect("a");
        log.record("a");
        log.record("b");

        log.verify();
    }

    #[test]
    fn test_factory_unknown_ids() {
        let factory = RecordingFactory::new().without("missing");

        assert!(factory.build("missing").is_none());
        assert!(factory.build("present").is_some());
        assert_eq!(factory.constructed(), vec!["present"]);
    }
}
