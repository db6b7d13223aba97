mod error;
mod graph;
pub mod traits;

pub use error::{GraphError, Result};
pub use graph::{Arcs, DirectedGraph, OutArc};
pub use traits::WeightedDigraph;

pub type NodeId = usize;
pub type Weight = i64;

/// Weight value meaning "no arc", in matrices and weight lookups alike.
pub const NO_ARC: Weight = Weight::MAX;
