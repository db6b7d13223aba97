use thiserror::Error;

use crate::NodeId;

/// Errors raised at the checked edges of the graph API.
///
/// The mutating and querying operations never return these; they are
/// reserved for construction from external input, for [`try_weight`], and
/// for [`validate`].
///
/// [`try_weight`]: crate::DirectedGraph::try_weight
/// [`validate`]: crate::DirectedGraph::validate
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("matrix row {row} has {len} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("node count {0} exceeds the u32 destination range")]
    TooManyNodes(usize),

    #[error("node {node} out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("duplicate arc {from} -> {to}")]
    DuplicateArc { from: NodeId, to: NodeId },

    #[error("cached arc count {cached} disagrees with {stored} stored arcs")]
    ArcCountMismatch { cached: usize, stored: usize },

    #[error("offset table is malformed at node {node}")]
    BadOffsets { node: NodeId },
}

pub type Result<T> = std::result::Result<T, GraphError>;
