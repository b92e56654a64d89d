//
// Copyright (c) 2025 Nathan Fiedler
//

/// How an insert grows the buffer when the target index lies beyond the
/// current capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SparseGrowth {
    /// Grow to the doubled capacity or to `index + 1`, whichever is larger.
    #[default]
    FitIndex,
    /// Double at most once, and only when the array is full. An index that
    /// still does not fit is rejected with `IndexOutOfBounds`.
    SingleStep,
}

/// How `remove_all` locates and deletes matching elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemovalStrategy {
    /// Single pass that slides kept elements toward the head.
    #[default]
    Compact,
    /// Find the first match and delete it, until no match remains.
    Repeated,
}

/// Construction-time settings carried by each array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub sparse_growth: SparseGrowth,
    pub removal: RemovalStrategy,
}

impl Options {
    pub fn sparse_growth(mut self, sparse_growth: SparseGrowth) -> Self {
        self.sparse_growth = sparse_growth;
        self
    }

    pub fn removal(mut self, removal: RemovalStrategy) -> Self {
        self.removal = removal;
        self
    }
}
