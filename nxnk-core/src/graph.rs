//! networkx-shaped graph adapter.
//!
//! [`GraphAdapter`] lets callers address nodes by any hashable value while
//! the [`Engine`] underneath only knows dense integer handles. Every call
//! translates at the boundary:
//!
//! ```text
//! caller (user nodes) -> GraphAdapter -> Engine (handles) -> GraphAdapter -> caller
//! ```
//!
//! # Key Features
//!
//! - **Atomic registration**: a node exists in both the registry and the
//!   engine, or in neither, even when an edge insertion fails halfway.
//! - **Lazy queries**: `neighbors`, `degrees`, `nodes`, `edges` and the
//!   escape hatches return iterators that translate one item at a time.
//!   Each call starts a fresh pass. The iterators borrow the graph, so it
//!   cannot be mutated while one is alive.
//! - **No parallel edges**: adding an existing edge updates its weight.
//!
//! # Example
//!
//! ```
//! use nxnk_core::Graph;
//!
//! let mut g = Graph::new();
//! g.add_edge("A", "B").unwrap();
//! g.add_edge("B", "C").unwrap();
//!
//! let mut around_b: Vec<_> = g.neighbors(&"B").unwrap().copied().collect();
//! around_b.sort();
//! assert_eq!(around_b, vec!["A", "C"]);
//! assert_eq!(g.degree(&"B").unwrap(), 2);
//! ```

use std::borrow::Borrow;
use std::collections::BTreeSet;

use petgraph::{Directed, EdgeType, Undirected};

use crate::config::{GraphConfig, SelfLoops};
use crate::engine::{
    DirectedEngine, Engine, EngineHandle, HandleIter, PetgraphEngine, UndirectedEngine,
};
use crate::error::{GraphError, Result};
use crate::registry::{IdentifierRegistry, Registered, UserNode};
use crate::view::CompatibilityView;

/// Undirected graph over user nodes of type `N`.
pub type Graph<N> = GraphAdapter<N, UndirectedEngine>;

/// Directed graph over user nodes of type `N`.
pub type DiGraph<N> = GraphAdapter<N, DirectedEngine>;

/// Graph addressed by user nodes, stored in a handle-addressed engine.
///
/// The adapter owns both the engine and the [`IdentifierRegistry`]; nothing
/// else can mutate either.
#[derive(Debug, Clone)]
pub struct GraphAdapter<N, E = UndirectedEngine> {
    engine: E,
    registry: IdentifierRegistry<N>,
    config: GraphConfig,
}

impl<N: UserNode, Ty: EdgeType> GraphAdapter<N, PetgraphEngine<Ty>> {
    /// Create an empty graph with the default (weighted) policy.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph whose edges all weigh 1.0.
    pub fn unweighted() -> Self {
        Self::with_config(GraphConfig::unweighted())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let engine = match config.capacity {
            Some(capacity) => PetgraphEngine::with_capacity(capacity, capacity),
            None => PetgraphEngine::new(),
        };
        Self::with_engine(engine, config)
    }

    /// Rebuild this graph into a petgraph engine of another direction type.
    ///
    /// Node order is preserved. When going from undirected to directed each
    /// edge becomes a pair of opposite edges.
    fn rebuild<T: EdgeType>(&self) -> Result<GraphAdapter<N, PetgraphEngine<T>>> {
        let mut target = GraphAdapter::<N, PetgraphEngine<T>>::with_config(self.config.clone());
        rebuild_into(self, &mut target)?;
        Ok(target)
    }

    /// Copy into an undirected graph.
    ///
    /// Handles are assigned by the new engine and generally differ from
    /// this graph's handles.
    pub fn to_undirected(&self) -> Result<Graph<N>> {
        self.rebuild::<Undirected>()
    }

    /// Copy into a directed graph.
    pub fn to_directed(&self) -> Result<DiGraph<N>> {
        self.rebuild::<Directed>()
    }
}

impl<N: UserNode, Ty: EdgeType> Default for GraphAdapter<N, PetgraphEngine<Ty>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: UserNode, E: Engine> GraphAdapter<N, E> {
    /// Wrap an engine. Whatever the engine already holds is discarded, since
    /// the registry has no user nodes for it.
    pub fn with_engine(mut engine: E, config: GraphConfig) -> Self {
        if engine.node_count() > 0 {
            tracing::debug!(
                "Discarding {} pre-existing engine nodes",
                engine.node_count()
            );
            engine.clear();
        }
        let registry = match config.capacity {
            Some(capacity) => IdentifierRegistry::with_capacity(capacity),
            None => IdentifierRegistry::new(),
        };
        tracing::debug!(
            "Created graph adapter (directed: {}, config: {:?})",
            engine.is_directed(),
            config
        );
        Self {
            engine,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Read access to the engine, for running algorithms on handles.
    ///
    /// Translate with [`GraphAdapter::to_networkit_nodes`] before and
    /// [`GraphAdapter::to_user_nodes`] after.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn registry(&self) -> &IdentifierRegistry<N> {
        &self.registry
    }

    pub fn is_directed(&self) -> bool {
        self.engine.is_directed()
    }

    /// Eager twin of this graph's lazy queries.
    pub fn eager(&self) -> CompatibilityView<'_, N, E> {
        CompatibilityView::new(self)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn register(&mut self, node: N) -> Result<Registered> {
        let engine = &mut self.engine;
        self.registry.register(node, || engine.add_node())
    }

    /// Undo registrations made earlier in a failed operation.
    fn rollback(&mut self, fresh: &[Registered]) {
        for handle in fresh.iter().rev().filter(|r| r.is_new()).map(|r| r.handle()) {
            tracing::warn!("Rolling back registration of handle {}", handle);
            if let Ok(node) = self.registry.lookup_user(handle).cloned() {
                let _ = self.registry.remove(&node);
            }
            let _ = self.engine.remove_node(handle);
        }
    }

    /// Add a node and return its handle. Adding a known node returns its
    /// existing handle.
    pub fn add_node(&mut self, node: N) -> Result<EngineHandle> {
        self.register(node).map(Registered::handle)
    }

    /// Add several nodes, returning their handles in input order.
    pub fn add_nodes_from<I>(&mut self, nodes: I) -> Result<Vec<EngineHandle>>
    where
        I: IntoIterator<Item = N>,
    {
        nodes.into_iter().map(|node| self.add_node(node)).collect()
    }

    /// Validate one edge against the weight and self-loop policy, returning
    /// the weight to store.
    fn check_edge(&self, source: &N, target: &N, weight: f64) -> Result<f64> {
        let weight = self.config.effective_weight(weight)?;
        if source == target && self.config.self_loops == SelfLoops::Reject {
            return Err(GraphError::SelfLoop {
                node: format!("{:?}", source),
            });
        }
        Ok(weight)
    }

    /// Validate a whole batch before any of it is added.
    fn check_edges<'n, I>(&self, edges: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = (&'n N, &'n N)>,
        N: 'n,
    {
        self.config.effective_weight(weight)?;
        for (source, target) in edges {
            self.check_edge(source, target, weight)?;
        }
        Ok(())
    }

    /// Add an edge with weight 1.0, registering both endpoints if needed.
    pub fn add_edge(&mut self, source: N, target: N) -> Result<()> {
        self.add_weighted_edge(source, target, 1.0)
    }

    /// Add an edge, or update its weight if it already exists.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidWeight`] for NaN or negative weights
    /// - [`GraphError::SelfLoop`] when `source == target` and self loops are
    ///   rejected
    ///
    /// On error no node or edge is added.
    pub fn add_weighted_edge(&mut self, source: N, target: N, weight: f64) -> Result<()> {
        let weight = self.check_edge(&source, &target, weight)?;

        let s = self.register(source)?;
        let t = match self.register(target) {
            Ok(t) => t,
            Err(e) => {
                self.rollback(&[s]);
                return Err(e);
            }
        };

        let (sh, th) = (s.handle(), t.handle());
        let result = if self.engine.contains_edge(sh, th) {
            self.engine.set_weight(sh, th, weight)
        } else {
            self.engine.add_edge(sh, th, weight)
        };

        if let Err(e) = result {
            self.rollback(&[s, t]);
            return Err(e);
        }
        Ok(())
    }

    /// Add unit-weight edges from `(source, target)` pairs.
    pub fn add_edges_from<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        for (source, target) in edges {
            self.add_edge(source, target)?;
        }
        Ok(())
    }

    /// Add edges from `(source, target, weight)` triples.
    pub fn add_weighted_edges_from<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        for (source, target, weight) in edges {
            self.add_weighted_edge(source, target, weight)?;
        }
        Ok(())
    }

    /// Join consecutive nodes with edges of the given weight.
    ///
    /// Every edge is checked against the graph policy first, so a rejected
    /// weight or self loop leaves the graph unchanged.
    pub fn add_path<I>(&mut self, nodes: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        let nodes: Vec<N> = nodes.into_iter().collect();
        self.check_edges(nodes.windows(2).map(|w| (&w[0], &w[1])), weight)?;
        self.extend_path(nodes, weight)
    }

    fn extend_path(&mut self, nodes: Vec<N>, weight: f64) -> Result<()> {
        let Some(first) = nodes.first() else {
            return Ok(());
        };
        self.add_node(first.clone())?;
        for pair in nodes.windows(2) {
            self.add_weighted_edge(pair[0].clone(), pair[1].clone(), weight)?;
        }
        Ok(())
    }

    /// Like [`GraphAdapter::add_path`], then close the last node back to the
    /// first. A single node becomes a self loop.
    pub fn add_cycle<I>(&mut self, nodes: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        let nodes: Vec<N> = nodes.into_iter().collect();
        let (Some(first), Some(last)) = (nodes.first().cloned(), nodes.last().cloned()) else {
            return Ok(());
        };
        let closing = std::iter::once((&last, &first));
        self.check_edges(
            nodes.windows(2).map(|w| (&w[0], &w[1])).chain(closing),
            weight,
        )?;
        self.extend_path(nodes, weight)?;
        self.add_weighted_edge(last, first, weight)
    }

    /// Join the first node to every other node.
    ///
    /// Checked up front like [`GraphAdapter::add_path`].
    pub fn add_star<I>(&mut self, nodes: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        let mut nodes = nodes.into_iter();
        let Some(hub) = nodes.next() else {
            return Ok(());
        };
        let leaves: Vec<N> = nodes.collect();
        self.check_edges(leaves.iter().map(|leaf| (&hub, leaf)), weight)?;
        self.add_node(hub.clone())?;
        for leaf in leaves {
            self.add_weighted_edge(hub.clone(), leaf, weight)?;
        }
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, node: &N) -> Result<()> {
        let handle = self.registry.lookup_handle(node)?;
        self.engine.remove_node(handle)?;
        self.registry.remove(node)?;
        Ok(())
    }

    /// Remove the given nodes, skipping unknown ones. Returns how many were
    /// removed.
    pub fn remove_nodes_from<I>(&mut self, nodes: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<N>,
    {
        let mut removed = 0;
        for node in nodes {
            match self.remove_node(node.borrow()) {
                Ok(()) => removed += 1,
                Err(GraphError::UnknownNode { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }

    /// Remove the edge between two nodes. The nodes stay.
    pub fn remove_edge(&mut self, source: &N, target: &N) -> Result<()> {
        let s = self.registry.lookup_handle(source)?;
        let t = self.registry.lookup_handle(target)?;
        if !self.engine.contains_edge(s, t) {
            return Err(GraphError::unknown_edge(source, target));
        }
        self.engine.remove_edge(s, t)
    }

    /// Remove the given edges, skipping missing ones. Returns how many were
    /// removed.
    pub fn remove_edges_from<'a, I>(&mut self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a N, &'a N)>,
        N: 'a,
    {
        let mut removed = 0;
        for (source, target) in edges {
            match self.remove_edge(source, target) {
                Ok(()) => removed += 1,
                Err(e) if e.is_lookup_miss() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.registry.clear();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn has_node(&self, node: &N) -> bool {
        self.registry.contains(node)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.has_node(node)
    }

    pub fn has_edge(&self, source: &N, target: &N) -> bool {
        match (
            self.registry.lookup_handle(source),
            self.registry.lookup_handle(target),
        ) {
            (Ok(s), Ok(t)) => self.engine.contains_edge(s, t),
            _ => false,
        }
    }

    /// Weight of the edge between two nodes.
    pub fn edge_weight(&self, source: &N, target: &N) -> Result<f64> {
        let s = self.registry.lookup_handle(source)?;
        let t = self.registry.lookup_handle(target)?;
        self.engine
            .weight(s, t)
            .ok_or_else(|| GraphError::unknown_edge(source, target))
    }

    fn translate<'a>(&'a self, handles: HandleIter<'a>) -> NodeIter<'a, N> {
        NodeIter {
            handles,
            registry: &self.registry,
        }
    }

    /// Adjacent nodes (successors for directed graphs), translated lazily.
    pub fn neighbors(&self, node: &N) -> Result<NodeIter<'_, N>> {
        let handle = self.registry.lookup_handle(node)?;
        Ok(self.translate(self.engine.neighbors(handle)))
    }

    pub fn successors(&self, node: &N) -> Result<NodeIter<'_, N>> {
        self.neighbors(node)
    }

    /// Nodes with an edge into `node`. Same as `neighbors` when undirected.
    pub fn predecessors(&self, node: &N) -> Result<NodeIter<'_, N>> {
        let handle = self.registry.lookup_handle(node)?;
        Ok(self.translate(self.engine.predecessors(handle)))
    }

    /// `(neighbor, weight)` pairs, the networkx `G[node]` view.
    pub fn adjacency(&self, node: &N) -> Result<impl Iterator<Item = (&N, f64)> + '_> {
        let handle = self.registry.lookup_handle(node)?;
        let registry = &self.registry;
        Ok(self
            .engine
            .neighbor_weights(handle)
            .filter_map(move |(h, w)| registry.lookup_user(h).ok().map(|n| (n, w))))
    }

    /// Whether `node` has at least one outgoing edge. False for unknown nodes.
    pub fn has_successor(&self, node: &N) -> bool {
        self.registry
            .lookup_handle(node)
            .map(|h| self.engine.neighbors(h).next().is_some())
            .unwrap_or(false)
    }

    /// Whether `node` has at least one incoming edge. False for unknown nodes.
    pub fn has_predecessor(&self, node: &N) -> bool {
        self.registry
            .lookup_handle(node)
            .map(|h| self.engine.predecessors(h).next().is_some())
            .unwrap_or(false)
    }

    /// Number of edge endpoints at `node`; a self loop counts twice.
    pub fn degree(&self, node: &N) -> Result<usize> {
        let handle = self.registry.lookup_handle(node)?;
        Ok(self.engine.degree(handle))
    }

    pub fn in_degree(&self, node: &N) -> Result<usize> {
        let handle = self.registry.lookup_handle(node)?;
        Ok(self.engine.in_degree(handle))
    }

    pub fn out_degree(&self, node: &N) -> Result<usize> {
        let handle = self.registry.lookup_handle(node)?;
        Ok(self.engine.out_degree(handle))
    }

    /// `(node, degree)` for every node, in handle order.
    pub fn degrees(&self) -> Degrees<'_, N, E> {
        Degrees {
            handles: self.engine.nodes(),
            registry: &self.registry,
            engine: &self.engine,
        }
    }

    pub fn number_of_nodes(&self) -> usize {
        self.engine.node_count()
    }

    pub fn number_of_edges(&self) -> usize {
        self.engine.edge_count()
    }

    /// Number of edges; networkx's name for [`GraphAdapter::number_of_edges`].
    pub fn size(&self) -> usize {
        self.number_of_edges()
    }

    /// 1 if an edge joins the two nodes, 0 otherwise.
    pub fn number_of_edges_between(&self, source: &N, target: &N) -> usize {
        usize::from(self.has_edge(source, target))
    }

    pub fn number_of_selfloops(&self) -> usize {
        self.engine.edges().filter(|(s, t, _)| s == t).count()
    }

    /// Self-loop edges as `(node, node)` pairs.
    pub fn selfloop_edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.engine
            .edges()
            .filter(|(s, t, _)| s == t)
            .filter_map(move |(s, _, _)| self.registry.lookup_user(s).ok())
            .map(|node| (node, node))
    }

    pub fn nodes_with_selfloops(&self) -> impl Iterator<Item = &N> + '_ {
        self.selfloop_edges().map(|(node, _)| node)
    }

    /// All nodes, in handle order.
    pub fn nodes(&self) -> NodeIter<'_, N> {
        self.translate(self.engine.nodes())
    }

    /// All edges as `(source, target)`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.weighted_edges().map(|(s, t, _)| (s, t))
    }

    /// All edges as `(source, target, weight)`.
    pub fn weighted_edges(&self) -> impl Iterator<Item = (&N, &N, f64)> + '_ {
        self.engine.edges().filter_map(move |(s, t, w)| {
            let source = self.registry.lookup_user(s).ok()?;
            let target = self.registry.lookup_user(t).ok()?;
            Some((source, target, w))
        })
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn iter(&self) -> NodeIter<'_, N> {
        self.nodes()
    }

    // ------------------------------------------------------------------
    // Escape hatches
    // ------------------------------------------------------------------

    /// Translate engine handles to user nodes, one per item.
    pub fn to_user_nodes<'a, I>(&'a self, handles: I) -> impl Iterator<Item = Result<&'a N>> + 'a
    where
        I: IntoIterator<Item = EngineHandle>,
        I::IntoIter: 'a,
    {
        handles
            .into_iter()
            .map(move |handle| self.registry.lookup_user(handle))
    }

    /// Translate user nodes to engine handles, one per item.
    pub fn to_networkit_nodes<'a, I>(
        &'a self,
        nodes: I,
    ) -> impl Iterator<Item = Result<EngineHandle>> + 'a
    where
        I: IntoIterator,
        I::Item: Borrow<N>,
        I::IntoIter: 'a,
    {
        nodes
            .into_iter()
            .map(move |node| self.registry.lookup_handle(node.borrow()))
    }
}

impl<N: UserNode, E: Engine + Default> GraphAdapter<N, E> {
    /// Induced subgraph on the given nodes. Unknown nodes are skipped.
    pub fn subgraph<I>(&self, nodes: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<N>,
    {
        let keep: BTreeSet<EngineHandle> = nodes
            .into_iter()
            .filter_map(|node| self.registry.lookup_handle(node.borrow()).ok())
            .collect();

        let mut sub = Self::with_engine(E::default(), self.config.clone());
        for &handle in &keep {
            sub.add_node(self.registry.lookup_user(handle)?.clone())?;
        }
        for (s, t, w) in self.engine.edges() {
            if keep.contains(&s) && keep.contains(&t) {
                let source = self.registry.lookup_user(s)?.clone();
                let target = self.registry.lookup_user(t)?.clone();
                sub.add_weighted_edge(source, target, w)?;
            }
        }
        Ok(sub)
    }
}

/// Copy every node (in handle order) and edge of `source` into `target`.
fn rebuild_into<N, S, T>(source: &GraphAdapter<N, S>, target: &mut GraphAdapter<N, T>) -> Result<()>
where
    N: UserNode,
    S: Engine,
    T: Engine,
{
    let mirror = target.is_directed() && !source.is_directed();
    for node in source.nodes() {
        target.add_node(node.clone())?;
    }
    for (s, t, w) in source.weighted_edges() {
        target.add_weighted_edge(s.clone(), t.clone(), w)?;
        if mirror && s != t {
            target.add_weighted_edge(t.clone(), s.clone(), w)?;
        }
    }
    tracing::debug!(
        "Rebuilt graph with {} nodes and {} edges",
        target.number_of_nodes(),
        target.number_of_edges()
    );
    Ok(())
}

/// Lazily translated sequence of nodes.
///
/// Each item costs one registry lookup. Handles the registry does not know
/// are skipped.
pub struct NodeIter<'a, N> {
    handles: HandleIter<'a>,
    registry: &'a IdentifierRegistry<N>,
}

impl<'a, N: UserNode> Iterator for NodeIter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let registry = self.registry;
        self.handles
            .by_ref()
            .find_map(|handle| registry.lookup_user(handle).ok())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.handles.size_hint().1)
    }
}

/// Lazily computed `(node, degree)` pairs.
pub struct Degrees<'a, N, E> {
    handles: HandleIter<'a>,
    registry: &'a IdentifierRegistry<N>,
    engine: &'a E,
}

impl<'a, N: UserNode, E: Engine> Iterator for Degrees<'a, N, E> {
    type Item = (&'a N, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (registry, engine) = (self.registry, self.engine);
        self.handles.by_ref().find_map(|handle| {
            registry
                .lookup_user(handle)
                .ok()
                .map(|node| (node, engine.degree(handle)))
        })
    }
}

impl<'a, N: UserNode, E: Engine> IntoIterator for &'a GraphAdapter<N, E> {
    type Item = &'a N;
    type IntoIter = NodeIter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn create_test_graph() -> Graph<&'static str> {
        // n joined to a, b, c; a joined to b
        let mut g = Graph::new();
        g.add_edges_from([("n", "a"), ("n", "b"), ("n", "c"), ("a", "b")])
            .unwrap();
        g
    }

    #[test]
    fn test_compound_adds_check_weight_first() {
        let mut g: Graph<&str> = Graph::new();

        assert!(matches!(
            g.add_path(["a", "b"], f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            g.add_cycle(["a", "b", "c"], -1.0),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            g.add_star(["hub", "x"], f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            g.add_path(["lonely"], f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(g.is_empty());
        assert_eq!(g.engine().node_count(), 0);
    }

    #[test]
    fn test_compound_adds_reject_self_loops_atomically() {
        let mut g: Graph<&str> =
            Graph::with_config(GraphConfig::default().with_self_loops(SelfLoops::Reject));

        assert!(matches!(
            g.add_path(["a", "b", "b", "c"], 1.0),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            g.add_cycle(["solo"], 1.0),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            g.add_cycle(["a", "b", "a"], 1.0),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            g.add_star(["hub", "x", "hub"], 1.0),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(g.is_empty());
        assert_eq!(g.number_of_edges(), 0);

        // A clean retry goes through.
        g.add_star(["hub", "x", "y"], 1.0).unwrap();
        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.degree(&"hub").unwrap(), 2);
    }

    #[test]
    fn test_single_node_cycle_is_self_loop() {
        let mut g = Graph::new();
        g.add_cycle(["solo"], 1.0).unwrap();
        assert!(g.has_edge(&"solo", &"solo"));
        assert_eq!(g.number_of_selfloops(), 1);
    }

    #[test]
    fn test_add_node_returns_existing_handle() {
        let mut g: Graph<String> = Graph::new();
        let first = g.add_node("x".to_string()).unwrap();
        let second = g.add_node("x".to_string()).unwrap();
        assert_eq!(first, second);
        assert_eq!(g.number_of_nodes(), 1);
    }

    #[test]
    fn test_add_edge_registers_endpoints() {
        let g = create_test_graph();
        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.number_of_edges(), 4);
        assert!(g.has_node(&"c"));
        assert!(g.has_edge(&"b", &"a"));
        assert!(!g.has_edge(&"b", &"c"));
    }

    #[test]
    fn test_degree() {
        let g = create_test_graph();
        assert_eq!(g.degree(&"n").unwrap(), 3);
        assert_eq!(g.degree(&"c").unwrap(), 1);
        assert!(matches!(
            g.degree(&"zzz"),
            Err(GraphError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_degrees_match_degree() {
        let g = create_test_graph();
        let degrees: Vec<_> = g.degrees().collect();
        assert_eq!(degrees.len(), 4);
        for (node, degree) in degrees {
            assert_eq!(g.degree(node).unwrap(), degree);
        }
    }

    #[test]
    fn test_neighbors_are_restartable() {
        let g = create_test_graph();
        let first: HashSet<_> = g.neighbors(&"n").unwrap().copied().collect();
        let second: HashSet<_> = g.neighbors(&"n").unwrap().copied().collect();
        assert_eq!(first, HashSet::from(["a", "b", "c"]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_edge_updates_weight() {
        let mut g = Graph::new();
        g.add_weighted_edge(1, 2, 2.5).unwrap();
        assert_eq!(g.edge_weight(&1, &2).unwrap(), 2.5);

        g.add_weighted_edge(2, 1, 4.0).unwrap();
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(g.edge_weight(&1, &2).unwrap(), 4.0);
    }

    #[test]
    fn test_unweighted_ignores_weight() {
        let mut g = Graph::unweighted();
        g.add_weighted_edge("u", "v", 2.5).unwrap();
        assert_eq!(g.edge_weight(&"u", &"v").unwrap(), 1.0);
    }

    #[test]
    fn test_invalid_weight_adds_nothing() {
        let mut g = Graph::new();
        let err = g.add_weighted_edge("u", "v", f64::NAN).unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { .. }));
        let err = g.add_weighted_edge("u", "v", -0.5).unwrap_err();
        assert_eq!(err, GraphError::InvalidWeight { weight: -0.5 });
        assert!(g.is_empty());
    }

    #[test]
    fn test_self_loop_policy() {
        let mut g = Graph::new();
        g.add_edge("s", "s").unwrap();
        assert_eq!(g.number_of_selfloops(), 1);
        assert_eq!(g.degree(&"s").unwrap(), 2);
        assert_eq!(g.nodes_with_selfloops().collect::<Vec<_>>(), vec![&"s"]);

        let mut strict =
            Graph::with_config(GraphConfig::default().with_self_loops(SelfLoops::Reject));
        let err = strict.add_edge("s", "s").unwrap_err();
        assert!(matches!(err, GraphError::SelfLoop { .. }));
        assert!(!strict.has_node(&"s"));
    }

    #[test]
    fn test_remove_node() {
        let mut g = create_test_graph();
        let handle = g.registry().lookup_handle(&"n").unwrap();
        g.remove_node(&"n").unwrap();

        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.number_of_edges(), 1);
        assert!(matches!(
            g.registry().lookup_handle(&"n"),
            Err(GraphError::UnknownNode { .. })
        ));
        assert_eq!(
            g.registry().lookup_user(handle),
            Err(GraphError::UnknownHandle { handle })
        );
        assert!(matches!(
            g.remove_node(&"n"),
            Err(GraphError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_remove_nodes_from_skips_unknown() {
        let mut g = create_test_graph();
        let removed = g.remove_nodes_from(["a", "ghost", "b"]).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(g.nodes().copied().collect::<Vec<_>>(), vec!["n", "c"]);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = create_test_graph();
        g.remove_edge(&"b", &"a").unwrap();
        assert!(!g.has_edge(&"a", &"b"));
        assert!(g.has_node(&"a"));
        assert!(matches!(
            g.remove_edge(&"a", &"b"),
            Err(GraphError::UnknownEdge { .. })
        ));

        let removed = g
            .remove_edges_from([(&"n", &"a"), (&"n", &"ghost"), (&"a", &"c")])
            .unwrap();
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_directed_neighbors() {
        let mut g: DiGraph<&str> = DiGraph::new();
        g.add_edge("a", "b").unwrap();
        g.add_edge("c", "b").unwrap();

        assert!(g.is_directed());
        assert_eq!(g.neighbors(&"b").unwrap().count(), 0);
        let preds: HashSet<_> = g.predecessors(&"b").unwrap().copied().collect();
        assert_eq!(preds, HashSet::from(["a", "c"]));
        assert!(g.has_successor(&"a"));
        assert!(!g.has_successor(&"b"));
        assert!(g.has_predecessor(&"b"));
        assert!(!g.has_predecessor(&"a"));
        assert!(!g.has_predecessor(&"ghost"));
        assert_eq!(g.in_degree(&"b").unwrap(), 2);
        assert_eq!(g.out_degree(&"b").unwrap(), 0);
        assert_eq!(g.degree(&"b").unwrap(), 2);
    }

    #[test]
    fn test_path_cycle_star() {
        let mut g = Graph::new();
        g.add_path([1, 2, 3, 4], 1.0).unwrap();
        assert_eq!(g.number_of_edges(), 3);

        g.add_cycle([1, 2, 3, 4], 2.0).unwrap();
        assert_eq!(g.number_of_edges(), 4);
        assert_eq!(g.edge_weight(&4, &1).unwrap(), 2.0);

        g.add_star([0, 1, 2, 3], 1.0).unwrap();
        assert_eq!(g.degree(&0).unwrap(), 3);

        g.add_path([9], 1.0).unwrap();
        assert!(g.has_node(&9));
        g.add_star(Vec::<i32>::new(), 1.0).unwrap();
    }

    #[test]
    fn test_adjacency() {
        let mut g = Graph::new();
        g.add_weighted_edge("a", "b", 0.5).unwrap();
        g.add_weighted_edge("c", "a", 3.0).unwrap();
        let mut adj: Vec<_> = g.adjacency(&"a").unwrap().map(|(n, w)| (*n, w)).collect();
        adj.sort_by(|x, y| x.0.cmp(y.0));
        assert_eq!(adj, vec![("b", 0.5), ("c", 3.0)]);
    }

    #[test]
    fn test_nodes_follow_handle_order() {
        let mut g = Graph::new();
        g.add_nodes_from(["z", "y", "x"]).unwrap();
        g.remove_node(&"y").unwrap();
        // The freed slot is reused by the next node.
        g.add_node("w").unwrap();
        assert_eq!(g.nodes().copied().collect::<Vec<_>>(), vec!["z", "w", "x"]);
        assert_eq!((&g).into_iter().count(), 3);
    }

    #[test]
    fn test_escape_hatches() {
        let g = create_test_graph();
        let handles: Vec<_> = g
            .to_networkit_nodes(["a", "b", "c"])
            .collect::<Result<_>>()
            .unwrap();
        let back: Vec<_> = g
            .to_user_nodes(handles)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(back, vec![&"a", &"b", &"c"]);

        let err = g.to_networkit_nodes([&"nope"]).collect::<Result<Vec<_>>>();
        assert!(matches!(err, Err(GraphError::UnknownNode { .. })));
        let err = g.to_user_nodes([999]).collect::<Result<Vec<_>>>();
        assert_eq!(err, Err(GraphError::UnknownHandle { handle: 999 }));
    }

    #[test]
    fn test_subgraph() {
        let g = create_test_graph();
        let sub = g.subgraph(["n", "a", "b", "ghost"]).unwrap();
        assert_eq!(sub.number_of_nodes(), 3);
        assert_eq!(sub.number_of_edges(), 3);
        assert!(!sub.has_node(&"c"));
        // The source graph is untouched.
        assert_eq!(g.number_of_nodes(), 4);
    }

    #[test]
    fn test_to_directed_and_back() {
        let mut g = create_test_graph();
        g.add_node("isolated").unwrap();

        let d = g.to_directed().unwrap();
        assert!(d.is_directed());
        assert_eq!(d.number_of_nodes(), 5);
        assert_eq!(d.number_of_edges(), 8);
        assert!(d.has_edge(&"a", &"n") && d.has_edge(&"n", &"a"));

        let u = d.to_undirected().unwrap();
        assert!(!u.is_directed());
        assert_eq!(u.number_of_edges(), 4);
        assert_eq!(u.number_of_nodes(), 5);
    }

    #[test]
    fn test_clone_keeps_handles() {
        let g = create_test_graph();
        let copy = g.clone();
        for node in g.nodes() {
            assert_eq!(
                g.registry().lookup_handle(node).unwrap(),
                copy.registry().lookup_handle(node).unwrap()
            );
        }
    }

    #[test]
    fn test_clear() {
        let mut g = create_test_graph();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.number_of_edges(), 0);
        g.add_edge("fresh", "start").unwrap();
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_number_of_edges_between() {
        let g = create_test_graph();
        assert_eq!(g.number_of_edges_between(&"n", &"a"), 1);
        assert_eq!(g.number_of_edges_between(&"c", &"a"), 0);
        assert_eq!(g.number_of_edges_between(&"ghost", &"a"), 0);
        assert_eq!(g.size(), 4);
    }
}
