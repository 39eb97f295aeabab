//! Configuration types shared across the orchestrator, connectors, and front ends.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shape of the projected table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Strikes shown below the selected one.
    pub before: usize,
    /// Offset of the last shown strike above the selected one.
    pub after: usize,
    /// Maximum number of expiration columns.
    pub max_columns: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            before: 5,
            after: 4,
            max_columns: 5,
        }
    }
}

/// Global configuration for the `Chainview` orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainviewConfig {
    /// Table shape used when projecting a session.
    pub projection: ProjectionOptions,
    /// Optional deadline for each retrieval step (portfolio, then option chain).
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}
