use std::ops::Range;

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::traits::WeightedDigraph;
use crate::{NO_ARC, NodeId, Weight};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutArc {
    pub to: NodeId,
    pub weight: Weight,
}

/// Directed weighted graph stored as a mutable CSR arena.
///
/// Node `x` owns the half-open range `offsets[x]..offsets[x + 1]` of the
/// parallel `to` / `weight` buffers. The offset table always has
/// `node_count + 1` entries, starts at zero, never decreases and ends at
/// `to.len()`. Stored arcs are never self-loops and never repeat a
/// destination within one node's range.
///
/// Node ids handed to the query methods are checked against
/// `0..node_count`: out-of-range reads yield an empty or negative answer,
/// out-of-range mutations are ignored. [`weight`](Self::weight) is the one
/// exception and panics on an out-of-range source.
#[derive(Clone, Debug)]
pub struct DirectedGraph {
    node_count: usize,
    arc_count: usize,
    offsets: Vec<usize>,
    to: Vec<u32>,
    weight: Vec<Weight>,
}

impl DirectedGraph {
    /// # Panics
    ///
    /// Panics if `node_count` does not fit the `u32` destination storage.
    pub fn new(node_count: usize) -> Self {
        assert!(
            check_node_count(node_count).is_ok(),
            "node count out of range"
        );
        Self {
            node_count,
            arc_count: 0,
            offsets: vec![0; node_count + 1],
            to: Vec::new(),
            weight: Vec::new(),
        }
    }

    /// Builds a graph from a dense `N x N` weight matrix, where
    /// [`NO_ARC`] marks an absent arc.
    ///
    /// Rows are scanned in order, and columns in order within a row, so
    /// each node's successors come out sorted. Weights are copied as-is.
    /// A non-sentinel diagonal cell cannot be stored and is skipped.
    pub fn from_matrix<R: AsRef<[Weight]>>(matrix: &[R]) -> Result<Self> {
        let n = matrix.len();
        check_node_count(n)?;

        let mut offsets = Vec::with_capacity(n + 1);
        let mut to = Vec::new();
        let mut weight = Vec::new();
        offsets.push(0);

        for (x, row) in matrix.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(GraphError::NonSquareMatrix {
                    row: x,
                    len: row.len(),
                    expected: n,
                });
            }
            for (y, &w) in row.iter().enumerate() {
                if w == NO_ARC {
                    continue;
                }
                if x == y {
                    trace!(x, y, reason = "self-loop", "matrix cell skipped");
                    continue;
                }
                to.push(y as u32);
                weight.push(w);
            }
            offsets.push(to.len());
        }

        debug!(nodes = n, arcs = to.len(), "graph built from matrix");
        Ok(Self {
            node_count: n,
            arc_count: to.len(),
            offsets,
            to,
            weight,
        })
    }

    /// Copies any [`WeightedDigraph`] into CSR form.
    ///
    /// Successor lists are taken verbatim, with no sorting or
    /// deduplication, and the arc count is the one `graph` reports.
    /// Keeping those consistent is the caller's job; use
    /// [`validate`](Self::validate) to check. Destinations must still lie in
    /// `0..node_count`, since they index the node space.
    pub fn from_graph<G: WeightedDigraph + ?Sized>(graph: &G) -> Result<Self> {
        let n = graph.node_count();
        check_node_count(n)?;

        let mut offsets = Vec::with_capacity(n + 1);
        let mut to = Vec::new();
        let mut weight = Vec::new();
        offsets.push(0);

        for x in 0..n {
            let start = to.len();
            for y in graph.successors(x) {
                if y >= n {
                    return Err(GraphError::NodeOutOfRange {
                        node: y,
                        node_count: n,
                    });
                }
                to.push(y as u32);
            }
            offsets.push(to.len());
            for &y in &to[start..] {
                weight.push(graph.weight(x, y as usize));
            }
        }

        debug!(
            nodes = n,
            arcs = to.len(),
            reported_arcs = graph.arc_count(),
            "graph copied from adjacency source"
        );
        Ok(Self {
            node_count: n,
            arc_count: graph.arc_count(),
            offsets,
            to,
            weight,
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    #[inline]
    pub fn out_degree(&self, x: NodeId) -> usize {
        self.range(x).map_or(0, |r| r.len())
    }

    #[inline]
    pub fn arcs(&self, x: NodeId) -> Arcs<'_> {
        let (to, weight) = self.arc_slices(x);
        Arcs { to, weight, idx: 0 }
    }

    #[inline]
    pub fn arc_slices(&self, x: NodeId) -> (&[u32], &[Weight]) {
        match self.range(x) {
            Some(r) => (&self.to[r.clone()], &self.weight[r]),
            None => (&[], &[]),
        }
    }

    pub fn arc_list(&self) -> Vec<(NodeId, NodeId, Weight)> {
        let mut arcs = Vec::with_capacity(self.to.len());
        for x in 0..self.node_count {
            for arc in self.arcs(x) {
                arcs.push((x, arc.to, arc.weight));
            }
        }
        arcs
    }

    /// Dense `N x N` export, with [`NO_ARC`] in every empty cell.
    pub fn to_adjacency_matrix(&self) -> Vec<Vec<Weight>> {
        let mut matrix = vec![vec![NO_ARC; self.node_count]; self.node_count];
        for (x, row) in matrix.iter_mut().enumerate() {
            for arc in self.arcs(x) {
                row[arc.to] = arc.weight;
            }
        }
        matrix
    }

    pub fn is_arc(&self, x: NodeId, y: NodeId) -> bool {
        y < self.node_count && self.position(x, y).is_some()
    }

    /// Inserts `x -> y` at the head of `x`'s range.
    ///
    /// Out-of-range ids, self-loops, existing arcs and the [`NO_ARC`] weight
    /// are ignored without error.
    pub fn add_arc(&mut self, x: NodeId, y: NodeId, weight: Weight) {
        if let Some(reason) = self.reject(x, y) {
            trace!(x, y, reason, "add_arc ignored");
            return;
        }
        if weight == NO_ARC {
            trace!(x, y, reason = "sentinel weight", "add_arc ignored");
            return;
        }
        if self.position(x, y).is_some() {
            trace!(x, y, reason = "duplicate", "add_arc ignored");
            return;
        }

        let at = self.offsets[x];
        self.to.insert(at, y as u32);
        self.weight.insert(at, weight);
        for offset in &mut self.offsets[x + 1..] {
            *offset += 1;
        }
        self.arc_count += 1;
    }

    /// Removes `x -> y` if present. Bad ids and missing arcs are ignored.
    pub fn remove_arc(&mut self, x: NodeId, y: NodeId) {
        if let Some(reason) = self.reject(x, y) {
            trace!(x, y, reason, "remove_arc ignored");
            return;
        }
        let Some(at) = self.position(x, y) else {
            trace!(x, y, reason = "missing", "remove_arc ignored");
            return;
        };

        self.to.remove(at);
        self.weight.remove(at);
        for offset in &mut self.offsets[x + 1..] {
            *offset -= 1;
        }
        self.arc_count = self.arc_count.saturating_sub(1);
    }

    pub fn successors(&self, x: NodeId) -> Vec<NodeId> {
        self.arc_slices(x).0.iter().map(|&y| y as usize).collect()
    }

    /// Sources of every arc into `x`, in ascending order.
    ///
    /// There is no reverse index: this scans the whole arena and maps each
    /// hit back to its owner through the offset table, so a call costs
    /// `O(arc_count * log node_count)`.
    pub fn predecessors(&self, x: NodeId) -> Vec<NodeId> {
        if x >= self.node_count {
            return Vec::new();
        }
        self.to
            .iter()
            .enumerate()
            .filter(|&(_, &y)| y as usize == x)
            .map(|(k, _)| self.owner(k))
            .collect()
    }

    /// Returns a new graph with every arc reversed and its weight kept.
    ///
    /// Node `x` of the result lists the predecessors of `x` in ascending
    /// order, matching [`predecessors`](Self::predecessors). The result
    /// shares no storage with `self`.
    pub fn compute_inverse(&self) -> DirectedGraph {
        let n = self.node_count;
        let mut in_deg = vec![0_usize; n];
        for &y in &self.to {
            in_deg[y as usize] += 1;
        }

        let mut offsets = vec![0_usize; n + 1];
        for v in 0..n {
            offsets[v + 1] = offsets[v] + in_deg[v];
        }

        let mut to = vec![0_u32; self.to.len()];
        let mut weight: Vec<Weight> = vec![0; self.to.len()];
        let mut cursor = offsets[..n].to_vec();

        // Sources are visited in ascending order, so each reversed range
        // stays sorted.
        for x in 0..n {
            let (dst, wts) = self.arc_slices(x);
            for (&y, &w) in dst.iter().zip(wts) {
                let idx = cursor[y as usize];
                cursor[y as usize] += 1;
                to[idx] = x as u32;
                weight[idx] = w;
            }
        }

        debug!(nodes = n, arcs = to.len(), "inverse computed");
        DirectedGraph {
            node_count: n,
            arc_count: to.len(),
            offsets,
            to,
            weight,
        }
    }

    /// Weight of `x -> y`, or [`NO_ARC`] when there is no such arc.
    ///
    /// # Panics
    ///
    /// Unlike the other queries this does not range-check `x`: it panics
    /// when `x >= node_count()`. Callers must validate the source first, or
    /// use [`try_weight`](Self::try_weight).
    pub fn weight(&self, x: NodeId, y: NodeId) -> Weight {
        let start = self.offsets[x];
        let end = self.offsets[x + 1];
        self.to[start..end]
            .iter()
            .position(|&v| v as usize == y)
            .map_or(NO_ARC, |p| self.weight[start + p])
    }

    pub fn try_weight(&self, x: NodeId, y: NodeId) -> Result<Weight> {
        if x >= self.node_count {
            return Err(GraphError::NodeOutOfRange {
                node: x,
                node_count: self.node_count,
            });
        }
        Ok(self.weight(x, y))
    }

    /// Checks every structural invariant and reports the first violation.
    ///
    /// Graphs built through [`from_matrix`](Self::from_matrix) and mutated
    /// through the public API always pass; [`from_graph`](Self::from_graph)
    /// trusts its source and may not.
    pub fn validate(&self) -> Result<()> {
        let n = self.node_count;
        if self.offsets.len() != n + 1 || self.offsets[0] != 0 {
            return Err(GraphError::BadOffsets { node: 0 });
        }
        if let Some(x) = self.offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::BadOffsets { node: x });
        }
        if self.offsets[n] != self.to.len() {
            return Err(GraphError::BadOffsets { node: n });
        }
        if self.arc_count != self.to.len() || self.weight.len() != self.to.len() {
            return Err(GraphError::ArcCountMismatch {
                cached: self.arc_count,
                stored: self.to.len(),
            });
        }

        // seen[y] == x + 1 marks y as already listed under x.
        let mut seen = vec![0_usize; n];
        for x in 0..n {
            for &y in self.arc_slices(x).0 {
                let y = y as usize;
                if y >= n {
                    return Err(GraphError::NodeOutOfRange {
                        node: y,
                        node_count: n,
                    });
                }
                if y == x {
                    return Err(GraphError::SelfLoop(x));
                }
                if seen[y] == x + 1 {
                    return Err(GraphError::DuplicateArc { from: x, to: y });
                }
                seen[y] = x + 1;
            }
        }
        Ok(())
    }

    #[inline]
    fn range(&self, x: NodeId) -> Option<Range<usize>> {
        (x < self.node_count).then(|| self.offsets[x]..self.offsets[x + 1])
    }

    fn position(&self, x: NodeId, y: NodeId) -> Option<usize> {
        let r = self.range(x)?;
        self.to[r.clone()]
            .iter()
            .position(|&v| v as usize == y)
            .map(|p| r.start + p)
    }

    /// Node whose range contains arena slot `k`.
    #[inline]
    fn owner(&self, k: usize) -> NodeId {
        self.offsets.partition_point(|&o| o <= k) - 1
    }

    fn reject(&self, x: NodeId, y: NodeId) -> Option<&'static str> {
        if x >= self.node_count || y >= self.node_count {
            Some("out of range")
        } else if x == y {
            Some("self-loop")
        } else {
            None
        }
    }
}

impl WeightedDigraph for DirectedGraph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn arc_count(&self) -> usize {
        self.arc_count
    }

    fn successors(&self, x: NodeId) -> Vec<NodeId> {
        DirectedGraph::successors(self, x)
    }

    fn weight(&self, x: NodeId, y: NodeId) -> Weight {
        DirectedGraph::weight(self, x, y)
    }
}

fn check_node_count(n: usize) -> Result<()> {
    if u32::try_from(n.saturating_sub(1)).is_err() {
        return Err(GraphError::TooManyNodes(n));
    }
    Ok(())
}

pub struct Arcs<'a> {
    to: &'a [u32],
    weight: &'a [Weight],
    idx: usize,
}

impl<'a> Iterator for Arcs<'a> {
    type Item = OutArc;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.to.len() {
            return None;
        }
        let arc = OutArc {
            to: self.to[self.idx] as usize,
            weight: self.weight[self.idx],
        };
        self.idx += 1;
        Some(arc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.to.len() - self.idx;
        (remain, Some(remain))
    }
}

impl ExactSizeIterator for Arcs<'_> {}
