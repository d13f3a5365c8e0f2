//! Python bindings, built with the `python` feature.
//!
//! Exposes a networkx-like `Graph` class whose nodes may be Python `int` or
//! `str` values (mixed freely).
//!
//! # Usage from Python
//!
//! ```python
//! from nxnk import _core
//!
//! g = _core.Graph()
//! g.add_edge("A", "B")
//! g.add_edge("B", "C", 2.5)
//! sorted(g.neighbors("B"))          # ['A', 'C']
//! g.to_networkit_nodes(["A", "B"])  # [0, 1]
//! ```

use std::collections::HashMap;

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::graph::{DiGraph, Graph};

/// A Python value usable as a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FromPyObject)]
pub enum PyNode {
    Int(i64),
    Str(String),
}

impl IntoPy<PyObject> for PyNode {
    fn into_py(self, py: Python<'_>) -> PyObject {
        match self {
            PyNode::Int(i) => i.into_py(py),
            PyNode::Str(s) => s.into_py(py),
        }
    }
}

/// Edge tuple as accepted by `add_edges_from`: `(u, v)` or `(u, v, weight)`.
#[derive(FromPyObject)]
enum EdgeSpec {
    Weighted(PyNode, PyNode, f64),
    Plain(PyNode, PyNode),
}

impl From<GraphError> for PyErr {
    fn from(err: GraphError) -> PyErr {
        match err {
            e if e.is_lookup_miss() => PyKeyError::new_err(e.to_string()),
            e @ (GraphError::SelfLoop { .. } | GraphError::InvalidWeight { .. }) => {
                PyValueError::new_err(e.to_string())
            }
            e => PyRuntimeError::new_err(e.to_string()),
        }
    }
}

enum Inner {
    Undirected(Graph<PyNode>),
    Directed(DiGraph<PyNode>),
}

/// Run `$body` with `$g` bound to whichever graph `$inner` holds.
macro_rules! dispatch {
    ($inner:expr, $g:ident => $body:expr) => {
        match $inner {
            Inner::Undirected($g) => $body,
            Inner::Directed($g) => $body,
        }
    };
}

/// networkx-like graph over `int`/`str` nodes.
#[pyclass(name = "Graph", module = "nxnk._core")]
pub struct PyGraph {
    inner: Inner,
}

#[pymethods]
impl PyGraph {
    /// Create a graph.
    ///
    /// # Arguments
    ///
    /// * `directed` - Whether edges have a direction
    /// * `weighted` - When false, every edge weighs 1.0
    #[new]
    #[pyo3(signature = (directed=false, weighted=true))]
    fn new(directed: bool, weighted: bool) -> Self {
        let config = if weighted {
            GraphConfig::default()
        } else {
            GraphConfig::unweighted()
        };
        let inner = if directed {
            Inner::Directed(DiGraph::with_config(config))
        } else {
            Inner::Undirected(Graph::with_config(config))
        };
        PyGraph { inner }
    }

    /// Add a node and return its engine handle.
    fn add_node(&mut self, node: PyNode) -> PyResult<usize> {
        Ok(dispatch!(&mut self.inner, g => g.add_node(node))?)
    }

    fn add_nodes_from(&mut self, nodes: Vec<PyNode>) -> PyResult<Vec<usize>> {
        Ok(dispatch!(&mut self.inner, g => g.add_nodes_from(nodes))?)
    }

    #[pyo3(signature = (source, target, weight=1.0))]
    fn add_edge(&mut self, source: PyNode, target: PyNode, weight: f64) -> PyResult<()> {
        Ok(dispatch!(&mut self.inner, g => g.add_weighted_edge(source, target, weight))?)
    }

    /// Add edges from `(u, v)` or `(u, v, weight)` tuples.
    fn add_edges_from(&mut self, edges: Vec<EdgeSpec>) -> PyResult<()> {
        for edge in edges {
            let (source, target, weight) = match edge {
                EdgeSpec::Weighted(s, t, w) => (s, t, w),
                EdgeSpec::Plain(s, t) => (s, t, 1.0),
            };
            self.add_edge(source, target, weight)?;
        }
        Ok(())
    }

    #[pyo3(signature = (nodes, weight=1.0))]
    fn add_path(&mut self, nodes: Vec<PyNode>, weight: f64) -> PyResult<()> {
        Ok(dispatch!(&mut self.inner, g => g.add_path(nodes, weight))?)
    }

    #[pyo3(signature = (nodes, weight=1.0))]
    fn add_cycle(&mut self, nodes: Vec<PyNode>, weight: f64) -> PyResult<()> {
        Ok(dispatch!(&mut self.inner, g => g.add_cycle(nodes, weight))?)
    }

    #[pyo3(signature = (nodes, weight=1.0))]
    fn add_star(&mut self, nodes: Vec<PyNode>, weight: f64) -> PyResult<()> {
        Ok(dispatch!(&mut self.inner, g => g.add_star(nodes, weight))?)
    }

    fn remove_node(&mut self, node: PyNode) -> PyResult<()> {
        Ok(dispatch!(&mut self.inner, g => g.remove_node(&node))?)
    }

    fn remove_nodes_from(&mut self, nodes: Vec<PyNode>) -> PyResult<usize> {
        Ok(dispatch!(&mut self.inner, g => g.remove_nodes_from(&nodes))?)
    }

    fn remove_edge(&mut self, source: PyNode, target: PyNode) -> PyResult<()> {
        Ok(dispatch!(&mut self.inner, g => g.remove_edge(&source, &target))?)
    }

    fn has_node(&self, node: PyNode) -> bool {
        dispatch!(&self.inner, g => g.has_node(&node))
    }

    fn has_edge(&self, source: PyNode, target: PyNode) -> bool {
        dispatch!(&self.inner, g => g.has_edge(&source, &target))
    }

    fn edge_weight(&self, source: PyNode, target: PyNode) -> PyResult<f64> {
        Ok(dispatch!(&self.inner, g => g.edge_weight(&source, &target))?)
    }

    /// Iterator over adjacent nodes (successors when directed).
    ///
    /// The neighbors are copied out when called; later edits to the graph
    /// do not show up in an iterator already handed out.
    fn neighbors(&self, node: PyNode) -> PyResult<PyNodeIter> {
        let nodes: Vec<PyNode> =
            dispatch!(&self.inner, g => g.neighbors(&node)?.cloned().collect());
        Ok(PyNodeIter::new(nodes))
    }

    /// Iterator over a snapshot of incoming neighbors.
    fn predecessors(&self, node: PyNode) -> PyResult<PyNodeIter> {
        let nodes: Vec<PyNode> =
            dispatch!(&self.inner, g => g.predecessors(&node)?.cloned().collect());
        Ok(PyNodeIter::new(nodes))
    }

    fn degree(&self, node: PyNode) -> PyResult<usize> {
        Ok(dispatch!(&self.inner, g => g.degree(&node))?)
    }

    /// List of `(node, degree)` pairs.
    fn degrees(&self) -> Vec<(PyNode, usize)> {
        dispatch!(&self.inner, g => g.degrees().map(|(n, d)| (n.clone(), d)).collect())
    }

    fn nodes(&self) -> Vec<PyNode> {
        dispatch!(&self.inner, g => g.nodes().cloned().collect())
    }

    fn edges(&self) -> Vec<(PyNode, PyNode)> {
        dispatch!(&self.inner, g => g.edges().map(|(s, t)| (s.clone(), t.clone())).collect())
    }

    fn selfloop_edges(&self) -> Vec<(PyNode, PyNode)> {
        dispatch!(&self.inner, g => g
            .selfloop_edges()
            .map(|(s, t)| (s.clone(), t.clone()))
            .collect())
    }

    fn number_of_nodes(&self) -> usize {
        dispatch!(&self.inner, g => g.number_of_nodes())
    }

    fn number_of_edges(&self) -> usize {
        dispatch!(&self.inner, g => g.number_of_edges())
    }

    fn size(&self) -> usize {
        self.number_of_edges()
    }

    fn number_of_selfloops(&self) -> usize {
        dispatch!(&self.inner, g => g.number_of_selfloops())
    }

    fn is_directed(&self) -> bool {
        matches!(self.inner, Inner::Directed(_))
    }

    /// Translate engine handles to nodes.
    fn to_user_nodes(&self, handles: Vec<usize>) -> PyResult<Vec<PyNode>> {
        let nodes: Result<Vec<PyNode>, GraphError> = dispatch!(&self.inner, g => g
            .to_user_nodes(handles)
            .map(|n| n.cloned())
            .collect());
        Ok(nodes?)
    }

    /// Translate nodes to engine handles.
    fn to_networkit_nodes(&self, nodes: Vec<PyNode>) -> PyResult<Vec<usize>> {
        let handles: Result<Vec<usize>, GraphError> =
            dispatch!(&self.inner, g => g.to_networkit_nodes(&nodes).collect());
        Ok(handles?)
    }

    fn clear(&mut self) {
        dispatch!(&mut self.inner, g => g.clear())
    }

    fn __len__(&self) -> usize {
        self.number_of_nodes()
    }

    fn __contains__(&self, node: PyNode) -> bool {
        self.has_node(node)
    }

    fn __iter__(&self) -> PyNodeIter {
        PyNodeIter::new(self.nodes())
    }

    /// `{neighbor: weight}` for `node`, like networkx `G[node]`.
    fn __getitem__(&self, node: PyNode) -> PyResult<HashMap<PyNode, f64>> {
        let adjacency: Result<HashMap<PyNode, f64>, GraphError> = dispatch!(&self.inner, g => g
            .adjacency(&node)
            .map(|adj| adj.map(|(n, w)| (n.clone(), w)).collect()));
        Ok(adjacency?)
    }

    fn __repr__(&self) -> String {
        format!(
            "Graph(directed={}, nodes={}, edges={})",
            if self.is_directed() { "True" } else { "False" },
            self.number_of_nodes(),
            self.number_of_edges()
        )
    }
}

/// Python iterator over a snapshot of nodes.
#[pyclass(name = "NodeIter", module = "nxnk._core")]
pub struct PyNodeIter {
    inner: std::vec::IntoIter<PyNode>,
}

impl PyNodeIter {
    fn new(nodes: Vec<PyNode>) -> Self {
        Self {
            inner: nodes.into_iter(),
        }
    }
}

#[pymethods]
impl PyNodeIter {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<PyNode> {
        slf.inner.next()
    }
}
