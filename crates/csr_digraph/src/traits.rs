//! Capability set shared by every weighted digraph the crate can ingest.

use crate::{NodeId, Weight};

/// Read-only view of a node-indexed weighted digraph.
///
/// Node ids are dense in `0..node_count()`. [`DirectedGraph::from_graph`]
/// consumes any implementor, and [`DirectedGraph`] implements it itself, so
/// the output of [`DirectedGraph::compute_inverse`] can be fed straight back
/// in.
///
/// [`DirectedGraph`]: crate::DirectedGraph
/// [`DirectedGraph::from_graph`]: crate::DirectedGraph::from_graph
/// [`DirectedGraph::compute_inverse`]: crate::DirectedGraph::compute_inverse
pub trait WeightedDigraph {
    fn node_count(&self) -> usize;

    /// Number of arcs as reported by the implementor. Consumers take this
    /// value as-is.
    fn arc_count(&self) -> usize;

    /// Successors of `x`, in the order the implementor stores them.
    fn successors(&self, x: NodeId) -> Vec<NodeId>;

    /// Weight of the arc `x -> y`, or [`NO_ARC`](crate::NO_ARC).
    fn weight(&self, x: NodeId, y: NodeId) -> Weight;
}
