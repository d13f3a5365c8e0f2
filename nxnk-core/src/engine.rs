//! Handle-addressed graph engine.
//!
//! The adapter never stores adjacency itself. Storage, degree queries and
//! traversal live behind the [`Engine`] trait, which speaks only in dense
//! integer handles. [`PetgraphEngine`] is the default implementation, backed
//! by a petgraph `StableGraph` so that handles survive removal of other nodes.
//!
//! # Handle recycling
//!
//! `StableGraph` reuses the slot of a removed node for the next node added.
//! A handle is therefore only meaningful until the node it names is removed.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction, EdgeType, Undirected};

use crate::error::{GraphError, Result};

/// Dense integer node identifier assigned by the engine.
pub type EngineHandle = usize;

/// Boxed handle iterator returned by engine queries.
pub type HandleIter<'a> = Box<dyn Iterator<Item = EngineHandle> + 'a>;

/// Storage and traversal collaborator addressed exclusively by handles.
///
/// Implementations must never hand out a handle that is currently live.
/// Removing a node removes all of its incident edges.
pub trait Engine {
    /// Whether edges have a direction.
    fn is_directed(&self) -> bool;

    /// Create a node and return its handle.
    fn add_node(&mut self) -> Result<EngineHandle>;

    /// Delete a node together with its incident edges.
    fn remove_node(&mut self, node: EngineHandle) -> Result<()>;

    fn contains_node(&self, node: EngineHandle) -> bool;

    /// Add a new edge. Callers check [`Engine::contains_edge`] first; engines
    /// are free to store parallel edges.
    fn add_edge(&mut self, source: EngineHandle, target: EngineHandle, weight: f64) -> Result<()>;

    /// Overwrite the weight of an existing edge.
    fn set_weight(&mut self, source: EngineHandle, target: EngineHandle, weight: f64)
        -> Result<()>;

    fn remove_edge(&mut self, source: EngineHandle, target: EngineHandle) -> Result<()>;

    fn contains_edge(&self, source: EngineHandle, target: EngineHandle) -> bool;

    /// Weight of the edge from `source` to `target`, if any.
    fn weight(&self, source: EngineHandle, target: EngineHandle) -> Option<f64>;

    /// Successors in a directed graph, all adjacent nodes otherwise.
    fn neighbors(&self, node: EngineHandle) -> HandleIter<'_>;

    /// Predecessors in a directed graph, all adjacent nodes otherwise.
    fn predecessors(&self, node: EngineHandle) -> HandleIter<'_>;

    /// Neighbors paired with the weight of the connecting edge.
    fn neighbor_weights(
        &self,
        node: EngineHandle,
    ) -> Box<dyn Iterator<Item = (EngineHandle, f64)> + '_>;

    fn out_degree(&self, node: EngineHandle) -> usize;

    fn in_degree(&self, node: EngineHandle) -> usize;

    /// Number of edge endpoints at `node`. A self loop counts twice.
    fn degree(&self, node: EngineHandle) -> usize;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// All live handles in ascending order.
    fn nodes(&self) -> HandleIter<'_>;

    /// All edges as `(source, target, weight)`.
    fn edges(&self) -> Box<dyn Iterator<Item = (EngineHandle, EngineHandle, f64)> + '_>;

    /// Drop every node and edge.
    fn clear(&mut self);
}

/// Undirected engine used by [`crate::Graph`].
pub type UndirectedEngine = PetgraphEngine<Undirected>;

/// Directed engine used by [`crate::DiGraph`].
pub type DirectedEngine = PetgraphEngine<Directed>;

/// [`Engine`] backed by a petgraph `StableGraph` with `f64` edge weights.
#[derive(Debug, Clone)]
pub struct PetgraphEngine<Ty: EdgeType> {
    graph: StableGraph<(), f64, Ty>,
}

impl<Ty: EdgeType> PetgraphEngine<Ty> {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(node_count, edge_count),
        }
    }

    /// The underlying petgraph graph, for running petgraph algorithms on
    /// handles directly.
    pub fn graph(&self) -> &StableGraph<(), f64, Ty> {
        &self.graph
    }

    fn index(&self, node: EngineHandle) -> Result<NodeIndex> {
        let idx = NodeIndex::new(node);
        if self.graph.contains_node(idx) {
            Ok(idx)
        } else {
            Err(GraphError::UnknownHandle { handle: node })
        }
    }

    fn find_edge(&self, source: EngineHandle, target: EngineHandle) -> Option<EdgeIndex> {
        self.graph
            .find_edge(NodeIndex::new(source), NodeIndex::new(target))
    }

    fn edge_index(&self, source: EngineHandle, target: EngineHandle) -> Result<EdgeIndex> {
        self.index(source)?;
        self.index(target)?;
        self.find_edge(source, target)
            .ok_or_else(|| GraphError::unknown_edge(&source, &target))
    }
}

impl<Ty: EdgeType> Default for PetgraphEngine<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> Engine for PetgraphEngine<Ty> {
    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn add_node(&mut self) -> Result<EngineHandle> {
        Ok(self.graph.add_node(()).index())
    }

    fn remove_node(&mut self, node: EngineHandle) -> Result<()> {
        let idx = self.index(node)?;
        self.graph.remove_node(idx);
        Ok(())
    }

    fn contains_node(&self, node: EngineHandle) -> bool {
        self.graph.contains_node(NodeIndex::new(node))
    }

    fn add_edge(&mut self, source: EngineHandle, target: EngineHandle, weight: f64) -> Result<()> {
        let s = self.index(source)?;
        let t = self.index(target)?;
        self.graph.add_edge(s, t, weight);
        Ok(())
    }

    fn set_weight(
        &mut self,
        source: EngineHandle,
        target: EngineHandle,
        weight: f64,
    ) -> Result<()> {
        let edge = self.edge_index(source, target)?;
        if let Some(w) = self.graph.edge_weight_mut(edge) {
            *w = weight;
        }
        Ok(())
    }

    fn remove_edge(&mut self, source: EngineHandle, target: EngineHandle) -> Result<()> {
        let edge = self.edge_index(source, target)?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    fn contains_edge(&self, source: EngineHandle, target: EngineHandle) -> bool {
        self.find_edge(source, target).is_some()
    }

    fn weight(&self, source: EngineHandle, target: EngineHandle) -> Option<f64> {
        self.find_edge(source, target)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    fn neighbors(&self, node: EngineHandle) -> HandleIter<'_> {
        Box::new(
            self.graph
                .neighbors(NodeIndex::new(node))
                .map(|idx| idx.index()),
        )
    }

    fn predecessors(&self, node: EngineHandle) -> HandleIter<'_> {
        let idx = NodeIndex::new(node);
        if self.graph.is_directed() {
            Box::new(
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .map(|n| n.index()),
            )
        } else {
            Box::new(self.graph.neighbors(idx).map(|n| n.index()))
        }
    }

    fn neighbor_weights(
        &self,
        node: EngineHandle,
    ) -> Box<dyn Iterator<Item = (EngineHandle, f64)> + '_> {
        let idx = NodeIndex::new(node);
        Box::new(self.graph.edges(idx).map(move |edge| {
            // Undirected edges may be reported from either end.
            let other = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            (other.index(), *edge.weight())
        }))
    }

    fn out_degree(&self, node: EngineHandle) -> usize {
        if !self.graph.is_directed() {
            return self.degree(node);
        }
        self.graph
            .edges_directed(NodeIndex::new(node), Direction::Outgoing)
            .count()
    }

    fn in_degree(&self, node: EngineHandle) -> usize {
        if !self.graph.is_directed() {
            return self.degree(node);
        }
        self.graph
            .edges_directed(NodeIndex::new(node), Direction::Incoming)
            .count()
    }

    fn degree(&self, node: EngineHandle) -> usize {
        let idx = NodeIndex::new(node);
        if self.graph.is_directed() {
            // A self loop shows up in both lists, so it counts twice.
            self.out_degree(node) + self.in_degree(node)
        } else {
            self.graph
                .edges(idx)
                .map(|e| if e.source() == e.target() { 2 } else { 1 })
                .sum()
        }
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn nodes(&self) -> HandleIter<'_> {
        Box::new(self.graph.node_indices().map(|idx| idx.index()))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (EngineHandle, EngineHandle, f64)> + '_> {
        Box::new(
            self.graph
                .edge_references()
                .map(|e| (e.source().index(), e.target().index(), *e.weight())),
        )
    }

    fn clear(&mut self) {
        self.graph.clear();
    }
}
