//! nxnk core - networkx-shaped graphs over a handle-addressed engine.
//!
//! Graph engines address nodes by dense integers. Callers would rather use
//! their own identifiers: strings, numbers, tuples, anything hashable. This
//! crate sits in between, keeping a two-way [`IdentifierRegistry`] in step
//! with the engine and translating every call at the boundary.
//!
//! # Features
//!
//! - **Any hashable node type**: `Graph<&str>`, `Graph<u64>`, `DiGraph<(i32, i32)>`
//! - **petgraph backend**: [`PetgraphEngine`] over a `StableGraph`, swappable
//!   through the [`Engine`] trait
//! - **Lazy queries** with an eager [`CompatibilityView`] for callers that need `Vec`s
//! - **Escape hatches** to run petgraph algorithms on raw handles
//! - **Python bindings** via PyO3 (`python` feature)
//!
//! # Usage
//!
//! ```
//! use nxnk_core::Graph;
//!
//! let mut g = Graph::new();
//! g.add_edge("A", "B").unwrap();
//! g.add_weighted_edge("B", "C", 2.5).unwrap();
//!
//! let handles: Vec<usize> = g
//!     .to_networkit_nodes(["A", "B", "C"])
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! let back: Vec<&&str> = g
//!     .to_user_nodes(handles)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(back, [&"A", &"B", &"C"]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod registry;
pub mod shared;
pub mod view;

#[cfg(feature = "python")]
pub mod python;

pub use config::{GraphConfig, SelfLoops, Weighting};
pub use engine::{DirectedEngine, Engine, EngineHandle, PetgraphEngine, UndirectedEngine};
pub use error::{GraphError, Result};
pub use graph::{DiGraph, Degrees, Graph, GraphAdapter, NodeIter};
pub use registry::{IdentifierRegistry, Registered, UserNode};
pub use shared::SharedGraph;
pub use view::CompatibilityView;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Get the version of nxnk-core.
#[cfg(feature = "python")]
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Python module definition.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyGraph>()?;
    m.add_class::<python::PyNodeIter>()?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
