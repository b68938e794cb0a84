use crate::containers::StorageKey;

/// A handle to an integer which is restored together with the domains when a space backtracks.
///
/// Propagators use these for incremental state which has to stay in sync with the domains under
/// trail-based backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailedInteger {
    id: u32,
}

impl StorageKey for TrailedInteger {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}
