//! Buffer table with shared handles

use crate::buffer::{Buffer, Position};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

/// Shared, non-owning reference to a buffer
///
/// Every caller that opens the same name gets a clone of the same handle;
/// there is never a private copy to go stale.
pub type BufferHandle = Rc<RefCell<Buffer>>;

/// Read-only view of a buffer for display purposes
///
/// Always reflects the latest mutation, since it is taken from the single
/// instance at the moment of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub name: String,
    pub content: String,
    pub insertion_point: Position,
    pub line_count: usize,
    pub modified: bool,
}

/// Table of named buffers, in creation order
///
/// Buffers are created on first reference and persist for the process
/// lifetime; there is no destruction within the session.
#[derive(Debug, Default)]
pub struct BufferStore {
    entries: Vec<BufferHandle>,
}

impl BufferStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the buffer for `name`, creating an empty one if absent.
    /// Same underlying instance for every caller.
    pub fn open(&mut self, name: &str) -> BufferHandle {
        if let Some(handle) = self.handle(name) {
            return handle;
        }
        let handle = Rc::new(RefCell::new(Buffer::new(name)));
        self.entries.push(Rc::clone(&handle));
        handle
    }

    /// Returns the existing handle for `name`, if any
    pub fn handle(&self, name: &str) -> Option<BufferHandle> {
        self.entries
            .iter()
            .find(|h| h.borrow().name() == name)
            .map(Rc::clone)
    }

    /// Returns a snapshot of the buffer for `name`, if present
    pub fn get(&self, name: &str) -> Option<BufferSnapshot> {
        self.handle(name).map(|h| {
            let buf = h.borrow();
            BufferSnapshot {
                name: buf.name().into(),
                content: buf.as_string(),
                insertion_point: buf.insertion_point(),
                line_count: buf.line_count(),
                modified: buf.modified(),
            }
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handle(name).is_some()
    }

    /// Buffer names in creation order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|h| h.borrow().name().into())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
