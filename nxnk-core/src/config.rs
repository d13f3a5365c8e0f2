//! Graph construction policy.
//!
//! A [`GraphConfig`] decides how edges are validated and stored. It can be
//! built in code or loaded from a TOML or JSON file. Every field is optional
//! and falls back to networkx-like defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! weighting = "unweighted"
//! self_loops = "reject"
//! capacity = 10000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GraphError, Result};

/// How edge weights are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Store the weight the caller supplies.
    #[default]
    Weighted,
    /// Store 1.0 for every edge, whatever the caller passes.
    Unweighted,
}

/// Whether an edge may join a node to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfLoops {
    #[default]
    Allow,
    /// Fail with [`GraphError::SelfLoop`].
    Reject,
}

/// Edge policy and sizing hints for a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub weighting: Weighting,

    #[serde(default)]
    pub self_loops: SelfLoops,

    /// Expected number of nodes, used to pre-allocate the registry and engine.
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl GraphConfig {
    /// Configuration for a graph whose edges all weigh 1.0.
    pub fn unweighted() -> Self {
        Self {
            weighting: Weighting::Unweighted,
            ..Self::default()
        }
    }

    pub fn with_self_loops(mut self, self_loops: SelfLoops) -> Self {
        self.self_loops = self_loops;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::Config {
            message: format!("{}: {}", path.display(), e),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Self = if is_json {
            serde_json::from_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!("Loaded graph config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Check an edge weight against the policy and return the weight to store.
    pub fn effective_weight(&self, weight: f64) -> Result<f64> {
        if weight.is_nan() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { weight });
        }
        Ok(match self.weighting {
            Weighting::Weighted => weight,
            Weighting::Unweighted => 1.0,
        })
    }
}
