//! Graph data model and store.

pub mod edge;
pub mod endpoint;
pub mod group;
pub mod node;
pub mod store;

pub use edge::{DraftEdge, Edge, EdgeEnd};
pub use endpoint::Endpoint;
pub use group::Group;
pub use node::Node;
pub use store::{DataMap, GraphStore, RemovedGroup, RemovedNode};
