use chiton_core::Cell;

/// A cell on a reconstructed path with the total risk accumulated on
/// entering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub cell: Cell,
    pub cost: u32,
}

/// Frontier entry, ordered for use in `BinaryHeap`.
///
/// Lowest cost pops first; equal costs pop lowest flat index first so the
/// visiting order is fully deterministic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) cost: u32,
    pub(crate) idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
