//! # Extension Point Registry
//!
//! Named, typed hooks that let independent plugins observe or transform values
//! without knowing about each other.
//!
//! ## Point Kinds
//!
//! - [`FilterPoint<T>`]: every handler receives the current value and returns
//!   the next one. The final value is handed back to whoever fired the point.
//! - [`ActionPoint<A>`]: every handler is called with a shared reference to the
//!   arguments. Nothing is returned.
//!
//! ## Dispatch Rules
//!
//! Handlers run in ascending priority, ties in registration order. Firing a
//! point with no handlers is legal: a filter returns its input untouched and
//! an action does nothing.
//!
//! A handler registered while its point is firing (for example from inside
//! another handler) does not join the firing that is in progress:
//!
//! ```rust
//! use hook_framework::{ExtensionRegistry, FilterPoint, DEFAULT_PRIORITY};
//! use std::rc::Rc;
//!
//! const GREETING: FilterPoint<String> = FilterPoint::new("greeting");
//!
//! let hooks = Rc::new(ExtensionRegistry::new());
//! let inner = hooks.clone();
//! hooks
//!     .add_filter(&GREETING, DEFAULT_PRIORITY, move |value: String| {
//!         // Only visible on the next firing.
//!         let _ = inner.add_filter(&GREETING, DEFAULT_PRIORITY, |v: String| v + "!");
//!         value + " world"
//!     })
//!     .unwrap();
//!
//! assert_eq!(hooks.apply_filters(&GREETING, "hello".to_string()), "hello world");
//! assert_eq!(hooks.apply_filters(&GREETING, "hello".to_string()), "hello world!");
//! ```
//!
//! ## Typing
//!
//! A point name is bound to one kind and one value type the first time it is
//! used. Registering a handler for the same name with a different kind or type
//! fails with [`HostError::PointMismatch`].

use crate::error::HostError;
use crate::priority::{HandlerId, HandlerList};
use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::{debug, error};

/// Whether a point transforms a value or just announces something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Filter,
    Action,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointKind::Filter => write!(f, "filter"),
            PointKind::Action => write!(f, "action"),
        }
    }
}

/// A named filter point carrying values of type `T`.
pub struct FilterPoint<T> {
    name: Cow<'static, str>,
    _value: PhantomData<fn(T) -> T>,
}

impl<T> FilterPoint<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _value: PhantomData,
        }
    }

    /// Builds a point whose name is only known at runtime (e.g. it embeds a
    /// plugin basename).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for FilterPoint<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FilterPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterPoint").field(&self.name).finish()
    }
}

/// A named action point whose handlers receive `&A`.
pub struct ActionPoint<A> {
    name: Cow<'static, str>,
    _args: PhantomData<fn(&A)>,
}

impl<A> ActionPoint<A> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _args: PhantomData,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _args: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<A> Clone for ActionPoint<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _args: PhantomData,
        }
    }
}

impl<A> fmt::Debug for ActionPoint<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionPoint").field(&self.name).finish()
    }
}

type FilterFn<T> = Box<dyn Fn(T) -> T>;
type ActionFn<A> = Box<dyn Fn(&A)>;

struct Slot {
    kind: PointKind,
    value_type: TypeId,
    type_name: &'static str,
    handlers: HandlerList<Rc<dyn Any>>,
    fired: usize,
}

impl Slot {
    fn new(kind: PointKind, value_type: TypeId, type_name: &'static str) -> Self {
        Self {
            kind,
            value_type,
            type_name,
            handlers: HandlerList::new(),
            fired: 0,
        }
    }

    fn check(
        &self,
        name: &str,
        kind: PointKind,
        value_type: TypeId,
        type_name: &'static str,
    ) -> Result<(), HostError> {
        if self.kind == kind && self.value_type == value_type {
            return Ok(());
        }
        Err(HostError::PointMismatch {
            name: name.to_owned(),
            expected: format!("{}<{}>", self.kind, self.type_name),
            found: format!("{}<{}>", kind, type_name),
        })
    }
}

/// Registry of every extension point in the process.
///
/// All methods take `&self`; the registry is meant to be shared (usually
/// through the [`Host`](crate::Host)) by every plugin and subsystem.
#[derive(Default)]
pub struct ExtensionRegistry {
    slots: RefCell<HashMap<String, Slot>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler on a filter point.
    pub fn add_filter<T: 'static>(
        &self,
        point: &FilterPoint<T>,
        priority: i32,
        handler: impl Fn(T) -> T + 'static,
    ) -> Result<HandlerId, HostError> {
        let handler: FilterFn<T> = Box::new(handler);
        self.register::<T>(point.name(), PointKind::Filter, priority, Rc::new(handler))
    }

    /// Registers a handler on an action point.
    pub fn add_action<A: 'static>(
        &self,
        point: &ActionPoint<A>,
        priority: i32,
        handler: impl Fn(&A) + 'static,
    ) -> Result<HandlerId, HostError> {
        let handler: ActionFn<A> = Box::new(handler);
        self.register::<A>(point.name(), PointKind::Action, priority, Rc::new(handler))
    }

    fn register<V: 'static>(
        &self,
        name: &str,
        kind: PointKind,
        priority: i32,
        handler: Rc<dyn Any>,
    ) -> Result<HandlerId, HostError> {
        let mut slots = self.slots.borrow_mut();
        let slot = slots
            .entry(name.to_owned())
            .or_insert_with(|| Slot::new(kind, TypeId::of::<V>(), type_name::<V>()));
        slot.check(name, kind, TypeId::of::<V>(), type_name::<V>())?;
        let id = slot.handlers.insert(priority, handler);
        debug!(point = name, %kind, priority, "Handler registered");
        Ok(id)
    }

    /// Threads `value` through every handler of `point` and returns the result.
    pub fn apply_filters<T: 'static>(&self, point: &FilterPoint<T>, value: T) -> T {
        let Some(handlers) = self.begin_dispatch::<T>(point.name(), PointKind::Filter) else {
            return value;
        };
        handlers.iter().fold(value, |value, handler| {
            match handler.as_ref().downcast_ref::<FilterFn<T>>() {
                Some(filter) => filter(value),
                None => value,
            }
        })
    }

    /// Calls every handler of `point` with `args`.
    pub fn do_action<A: 'static>(&self, point: &ActionPoint<A>, args: &A) {
        let Some(handlers) = self.begin_dispatch::<A>(point.name(), PointKind::Action) else {
            return;
        };
        for handler in &handlers {
            if let Some(action) = handler.as_ref().downcast_ref::<ActionFn<A>>() {
                action(args);
            }
        }
    }

    /// Counts the firing and snapshots the handlers. The borrow is released
    /// before any handler runs.
    fn begin_dispatch<V: 'static>(&self, name: &str, kind: PointKind) -> Option<Vec<Rc<dyn Any>>> {
        let mut slots = self.slots.borrow_mut();
        let slot = slots
            .entry(name.to_owned())
            .or_insert_with(|| Slot::new(kind, TypeId::of::<V>(), type_name::<V>()));
        if let Err(e) = slot.check(name, kind, TypeId::of::<V>(), type_name::<V>()) {
            error!(point = name, error = %e, "Dispatch skipped");
            return None;
        }
        slot.fired += 1;
        debug!(point = name, %kind, handlers = slot.handlers.len(), "Dispatch");
        Some(slot.handlers.snapshot())
    }

    /// Removes a handler previously returned by `add_filter` / `add_action`.
    pub fn remove(&self, name: &str, id: HandlerId) -> bool {
        self.slots
            .borrow_mut()
            .get_mut(name)
            .map(|slot| slot.handlers.remove(id))
            .unwrap_or(false)
    }

    pub fn has_handlers(&self, name: &str) -> bool {
        self.handler_count(name) > 0
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.slots
            .borrow()
            .get(name)
            .map(|slot| slot.handlers.len())
            .unwrap_or(0)
    }

    /// How many times the point has fired so far.
    pub fn fired_count(&self, name: &str) -> usize {
        self.slots
            .borrow()
            .get(name)
            .map(|slot| slot.fired)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::DEFAULT_PRIORITY;
    use std::cell::Cell;

    const WORDS: FilterPoint<Vec<String>> = FilterPoint::new("words");
    const PING: ActionPoint<u32> = ActionPoint::new("ping");

    #[test]
    fn test_filter_identity_without_handlers() {
        let hooks = ExtensionRegistry::new();
        let value = vec!["a".to_string()];

        assert_eq!(hooks.apply_filters(&WORDS, value.clone()), value);
        assert_eq!(hooks.fired_count("words"), 1);
    }

    #[test]
    fn test_filter_runs_by_priority_then_registration() {
        let hooks = ExtensionRegistry::new();
        let push = |tag: &'static str| move |mut v: Vec<String>| {
            v.push(tag.to_string());
            v
        };
        hooks.add_filter(&WORDS, 20, push("late")).unwrap();
        hooks.add_filter(&WORDS, DEFAULT_PRIORITY, push("first")).unwrap();
        hooks.add_filter(&WORDS, DEFAULT_PRIORITY, push("second")).unwrap();
        hooks.add_filter(&WORDS, 1, push("early")).unwrap();

        let result = hooks.apply_filters(&WORDS, Vec::new());
        assert_eq!(result, vec!["early", "first", "second", "late"]);
    }

    #[test]
    fn test_action_sees_args_and_counts_firings() {
        let hooks = ExtensionRegistry::new();
        let total = Rc::new(Cell::new(0));
        let seen = total.clone();
        hooks
            .add_action(&PING, DEFAULT_PRIORITY, move |n: &u32| seen.set(seen.get() + n))
            .unwrap();

        hooks.do_action(&PING, &3);
        hooks.do_action(&PING, &4);

        assert_eq!(total.get(), 7);
        assert_eq!(hooks.fired_count("ping"), 2);
    }

    #[test]
    fn test_kind_and_type_are_fixed_per_name() {
        let hooks = ExtensionRegistry::new();
        hooks.add_action(&PING, DEFAULT_PRIORITY, |_: &u32| {}).unwrap();

        let as_filter: FilterPoint<u32> = FilterPoint::new("ping");
        let err = hooks
            .add_filter(&as_filter, DEFAULT_PRIORITY, |v: u32| v)
            .unwrap_err();
        assert!(matches!(err, HostError::PointMismatch { .. }));

        let other_type: ActionPoint<String> = ActionPoint::new("ping");
        assert!(hooks.add_action(&other_type, DEFAULT_PRIORITY, |_: &String| {}).is_err());
        assert_eq!(hooks.handler_count("ping"), 1);
    }

    #[test]
    fn test_removed_handler_no_longer_runs() {
        let hooks = ExtensionRegistry::new();
        let id = hooks
            .add_filter(&WORDS, DEFAULT_PRIORITY, |mut v: Vec<String>| {
                v.push("x".into());
                v
            })
            .unwrap();

        assert!(hooks.remove("words", id));
        assert!(!hooks.has_handlers("words"));
        assert!(hooks.apply_filters(&WORDS, Vec::new()).is_empty());
    }
}
