//! Error types for graph and viewport operations.
//!
//! Every variant is recoverable: the requested mutation simply did not happen
//! and the graph is left in its prior state. Callers decide whether to log,
//! surface or ignore them; the batch operations drop them after logging.

use crate::types::{EndpointId, EntityId, EntityKind, NodeId};
use thiserror::Error;

/// Why a drafted endpoint link was not promoted to an edge.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkRejection {
    /// Release point was not over any endpoint
    #[error("no endpoint under the release point")]
    NoTarget,

    /// Target endpoint belongs to a different compatibility class
    #[error("scope mismatch: {source_scope:?} -> {target_scope:?}")]
    ScopeMismatch {
        source_scope: Option<String>,
        target_scope: Option<String>,
    },

    /// Target endpoint is not a `target`-role endpoint
    #[error("endpoint {endpoint} on node {node} is not a target")]
    NotATarget { node: NodeId, endpoint: EndpointId },

    /// An edge with the derived id already exists
    #[error("edge {0} already exists")]
    DuplicateEdge(EntityId),
}

/// Errors raised by the graph store and the viewport.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An add targeted an id that is already present; the existing entity is kept
    #[error("{kind} {id} already exists")]
    DuplicateIdentity { kind: EntityKind, id: EntityId },

    /// A remove or lookup targeted an id that is not present
    #[error("{kind} {id} not found")]
    UnknownIdentity { kind: EntityKind, id: EntityId },

    /// An edge spec names a source or target that cannot be resolved
    #[error("cannot connect edge {edge}: unresolved reference {reference}")]
    UnresolvableEndpointReference { edge: EntityId, reference: EntityId },

    /// A drafted link failed scope or role matching
    #[error("link rejected: {0}")]
    IncompatibleLink(#[from] LinkRejection),

    /// A requested scale lies outside the zoom bounds
    #[error("zoom {requested} out of range")]
    ZoomOutOfRange { requested: f32 },
}

impl GraphError {
    pub fn unknown(kind: EntityKind, id: impl Into<EntityId>) -> Self {
        GraphError::UnknownIdentity {
            kind,
            id: id.into(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl Into<EntityId>) -> Self {
        GraphError::DuplicateIdentity {
            kind,
            id: id.into(),
        }
    }
}

/// Result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
