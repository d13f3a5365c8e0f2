//! Bidirectional mapping between user node identifiers and engine handles.
//!
//! The two directions are only ever updated together, so at all times
//! `lookup_user(lookup_handle(n)?)? == n` for every registered `n`. The
//! reverse direction is ordered by handle, which is also the order in which
//! the engine enumerates its nodes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::engine::EngineHandle;
use crate::error::{GraphError, Result};

/// Anything usable as a node identifier.
pub trait UserNode: Eq + Hash + Clone + fmt::Debug {}

impl<T: Eq + Hash + Clone + fmt::Debug> UserNode for T {}

/// Outcome of [`IdentifierRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// The node was already known under this handle.
    Existing(EngineHandle),
    /// The node was added under a freshly allocated handle.
    New(EngineHandle),
}

impl Registered {
    pub fn handle(self) -> EngineHandle {
        match self {
            Registered::Existing(h) | Registered::New(h) => h,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, Registered::New(_))
    }
}

/// Two maps kept in lockstep: node -> handle and handle -> node.
#[derive(Debug, Clone)]
pub struct IdentifierRegistry<N> {
    handles: HashMap<N, EngineHandle>,
    users: BTreeMap<EngineHandle, N>,
}

impl<N: UserNode> IdentifierRegistry<N> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            users: BTreeMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: HashMap::with_capacity(capacity),
            users: BTreeMap::new(),
        }
    }

    /// Return the handle of `node`, allocating one if the node is new.
    ///
    /// `allocate` is only called for unknown nodes. If it fails, or returns a
    /// handle that is already mapped, the registry is left untouched.
    pub fn register<F>(&mut self, node: N, allocate: F) -> Result<Registered>
    where
        F: FnOnce() -> Result<EngineHandle>,
    {
        if let Some(&handle) = self.handles.get(&node) {
            return Ok(Registered::Existing(handle));
        }

        let handle = allocate()?;
        if let Some(existing) = self.users.get(&handle) {
            return Err(GraphError::DuplicateHandle {
                handle,
                existing: format!("{:?}", existing),
            });
        }

        tracing::trace!("Registered {:?} as handle {}", node, handle);
        self.handles.insert(node.clone(), handle);
        self.users.insert(handle, node);
        Ok(Registered::New(handle))
    }

    pub fn lookup_handle(&self, node: &N) -> Result<EngineHandle> {
        self.handles
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::unknown_node(node))
    }

    pub fn lookup_user(&self, handle: EngineHandle) -> Result<&N> {
        self.users
            .get(&handle)
            .ok_or(GraphError::UnknownHandle { handle })
    }

    /// Remove both directions for `node` and return its former handle.
    pub fn remove(&mut self, node: &N) -> Result<EngineHandle> {
        let handle = self
            .handles
            .remove(node)
            .ok_or_else(|| GraphError::unknown_node(node))?;
        self.users.remove(&handle);
        tracing::trace!("Unregistered {:?} (handle {})", node, handle);
        Ok(handle)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.handles.contains_key(node)
    }

    pub fn contains_handle(&self, handle: EngineHandle) -> bool {
        self.users.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.users.clear();
    }

    /// `(handle, node)` pairs in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = (EngineHandle, &N)> + '_ {
        self.users.iter().map(|(&h, n)| (h, n))
    }

    /// Nodes in ascending handle order.
    pub fn users(&self) -> impl Iterator<Item = &N> + '_ {
        self.users.values()
    }

    /// Handles in ascending order.
    pub fn handles(&self) -> impl Iterator<Item = EngineHandle> + '_ {
        self.users.keys().copied()
    }
}

impl<N: UserNode> Default for IdentifierRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}
