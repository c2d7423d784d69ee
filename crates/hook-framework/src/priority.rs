//! # Priority-Ordered Handler Lists
//!
//! Both phase bindings and extension-point handlers are kept in a
//! [`HandlerList`]: ascending priority, ties in registration order.

/// Priority used when a caller does not pick one.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Identifies a registered handler so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct Entry<H> {
    id: HandlerId,
    priority: i32,
    handler: H,
}

/// A stable, priority-ordered list of handlers.
pub struct HandlerList<H> {
    entries: Vec<Entry<H>>,
    next_id: u64,
}

impl<H> Default for HandlerList<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<H> HandlerList<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after every entry whose priority is lower or equal, which keeps
    /// equal priorities in registration order.
    pub fn insert(&mut self, priority: i32, handler: H) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        let pos = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(
            pos,
            Entry {
                id,
                priority,
                handler,
            },
        );
        id
    }

    pub fn remove(&mut self, id: HandlerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn priorities(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.priority).collect()
    }
}

impl<H: Clone> HandlerList<H> {
    /// Copies the handlers out in dispatch order.
    ///
    /// Dispatchers iterate over the snapshot, never over the live list, so a
    /// handler registered mid-dispatch only joins the next dispatch.
    pub fn snapshot(&self) -> Vec<H> {
        self.entries.iter().map(|e| e.handler.clone()).collect()
    }
}
