//! Eager compatibility view.
//!
//! Some callers index into results or ask for their length straight away.
//! [`CompatibilityView`] serves them by collecting the lazy queries of a
//! [`GraphAdapter`] into `Vec`s. It holds nothing but a borrow of the graph.
//!
//! Every method is deprecated in favour of its lazy original. The first call
//! of each method in a process logs a warning.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::engine::{Engine, EngineHandle};
use crate::error::Result;
use crate::graph::GraphAdapter;
use crate::registry::UserNode;

static NOTIFIED: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Log a deprecation warning the first time `method` is used.
fn warn_deprecated(method: &'static str) {
    let Ok(mut notified) = NOTIFIED.lock() else {
        return;
    };
    if notified.insert(method) {
        tracing::warn!(
            "CompatibilityView::{} is deprecated; collect GraphAdapter::{} instead",
            method,
            method
        );
    }
}

/// Eager wrapper over a [`GraphAdapter`].
#[derive(Debug)]
pub struct CompatibilityView<'a, N, E> {
    graph: &'a GraphAdapter<N, E>,
}

impl<N, E> Clone for CompatibilityView<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for CompatibilityView<'_, N, E> {}

impl<'a, N: UserNode, E: Engine> CompatibilityView<'a, N, E> {
    pub fn new(graph: &'a GraphAdapter<N, E>) -> Self {
        Self { graph }
    }

    /// The wrapped graph.
    pub fn graph(&self) -> &'a GraphAdapter<N, E> {
        self.graph
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::nodes`")]
    pub fn nodes(&self) -> Vec<N> {
        warn_deprecated("nodes");
        self.graph.nodes().cloned().collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::neighbors`")]
    pub fn neighbors(&self, node: &N) -> Result<Vec<N>> {
        warn_deprecated("neighbors");
        Ok(self.graph.neighbors(node)?.cloned().collect())
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::successors`")]
    pub fn successors(&self, node: &N) -> Result<Vec<N>> {
        warn_deprecated("successors");
        Ok(self.graph.successors(node)?.cloned().collect())
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::predecessors`")]
    pub fn predecessors(&self, node: &N) -> Result<Vec<N>> {
        warn_deprecated("predecessors");
        Ok(self.graph.predecessors(node)?.cloned().collect())
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::adjacency`")]
    pub fn adjacency(&self, node: &N) -> Result<Vec<(N, f64)>> {
        warn_deprecated("adjacency");
        Ok(self
            .graph
            .adjacency(node)?
            .map(|(n, w)| (n.clone(), w))
            .collect())
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::degrees`")]
    pub fn degrees(&self) -> Vec<(N, usize)> {
        warn_deprecated("degrees");
        self.graph
            .degrees()
            .map(|(n, d)| (n.clone(), d))
            .collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::edges`")]
    pub fn edges(&self) -> Vec<(N, N)> {
        warn_deprecated("edges");
        self.graph
            .edges()
            .map(|(s, t)| (s.clone(), t.clone()))
            .collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::weighted_edges`")]
    pub fn weighted_edges(&self) -> Vec<(N, N, f64)> {
        warn_deprecated("weighted_edges");
        self.graph
            .weighted_edges()
            .map(|(s, t, w)| (s.clone(), t.clone(), w))
            .collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::selfloop_edges`")]
    pub fn selfloop_edges(&self) -> Vec<(N, N)> {
        warn_deprecated("selfloop_edges");
        self.graph
            .selfloop_edges()
            .map(|(s, t)| (s.clone(), t.clone()))
            .collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::nodes_with_selfloops`")]
    pub fn nodes_with_selfloops(&self) -> Vec<N> {
        warn_deprecated("nodes_with_selfloops");
        self.graph.nodes_with_selfloops().cloned().collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::to_user_nodes`")]
    pub fn to_user_nodes<I>(&self, handles: I) -> Result<Vec<N>>
    where
        I: IntoIterator<Item = EngineHandle>,
        I::IntoIter: 'a,
    {
        warn_deprecated("to_user_nodes");
        self.graph
            .to_user_nodes(handles)
            .map(|node| node.cloned())
            .collect()
    }

    #[deprecated(since = "0.2.0", note = "use `GraphAdapter::to_networkit_nodes`")]
    pub fn to_networkit_nodes<I>(&self, nodes: I) -> Result<Vec<EngineHandle>>
    where
        I: IntoIterator,
        I::Item: Borrow<N>,
        I::IntoIter: 'a,
    {
        warn_deprecated("to_networkit_nodes");
        self.graph.to_networkit_nodes(nodes).collect()
    }
}
