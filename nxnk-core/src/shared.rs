//! Thread-safe handle to a graph.
//!
//! The registry and the engine must change together, so they sit behind one
//! lock. Readers and writers get the whole adapter for the duration of a
//! closure.

use std::sync::{Arc, RwLock};

use crate::engine::{Engine, UndirectedEngine};
use crate::error::{GraphError, Result};
use crate::graph::GraphAdapter;
use crate::registry::UserNode;

/// Cloneable, lock-guarded [`GraphAdapter`].
#[derive(Debug)]
pub struct SharedGraph<N, E = UndirectedEngine> {
    inner: Arc<RwLock<GraphAdapter<N, E>>>,
}

impl<N, E> Clone for SharedGraph<N, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: UserNode, E: Engine> SharedGraph<N, E> {
    pub fn new(graph: GraphAdapter<N, E>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Run `f` under a read lock.
    pub fn read<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&GraphAdapter<N, E>) -> R,
    {
        let guard = self.inner.read().map_err(|_| GraphError::Poisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` under the write lock.
    pub fn write<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut GraphAdapter<N, E>) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| GraphError::Poisoned)?;
        Ok(f(&mut guard))
    }

    /// Take the graph back. `None` while other handles are still alive.
    pub fn into_inner(self) -> Result<Option<GraphAdapter<N, E>>> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock
                .into_inner()
                .map(Some)
                .map_err(|_| GraphError::Poisoned),
            Err(_) => Ok(None),
        }
    }
}

impl<N: UserNode, E: Engine> From<GraphAdapter<N, E>> for SharedGraph<N, E> {
    fn from(graph: GraphAdapter<N, E>) -> Self {
        Self::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use std::thread;

    #[test]
    fn test_concurrent_writers_keep_registry_consistent() {
        let shared = SharedGraph::new(Graph::<String>::new());

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        shared
                            .write(|g| {
                                g.add_edge("hub".to_string(), format!("w{}-{}", worker, i))
                            })
                            .unwrap()
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let (nodes, degree) = shared
            .read(|g| (g.number_of_nodes(), g.degree(&"hub".to_string())))
            .unwrap();
        assert_eq!(nodes, 101);
        assert_eq!(degree.unwrap(), 100);

        shared
            .read(|g| {
                for (handle, node) in g.registry().iter() {
                    assert_eq!(g.registry().lookup_handle(node).unwrap(), handle);
                }
            })
            .unwrap();
    }

    #[test]
    fn test_into_inner() {
        let shared: SharedGraph<&str> = Graph::new().into();
        let other = shared.clone();
        assert!(other.into_inner().unwrap().is_none());

        shared.write(|g| g.add_node("only")).unwrap().unwrap();
        let graph = shared.into_inner().unwrap().unwrap();
        assert!(graph.has_node(&"only"));
    }

    #[test]
    fn test_poisoned_lock() {
        let shared: SharedGraph<&str> = Graph::new().into();
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            poisoner
                .write(|_| panic!("writer panicked"))
                .unwrap();
        })
        .join();

        assert_eq!(shared.read(|g| g.len()), Err(GraphError::Poisoned));
    }
}
