//=========================================================================
// Record Store
//=========================================================================
//
// Best-distance leaderboard: a descending list of at most RECORD_LIMIT
// distances.
//
//   RecordStore (trait)
//     ├─ FileRecordStore    bincode file on disk
//     └─ MemoryRecordStore  shared in-process list
//
//=========================================================================

//=== Module Declarations =================================================

mod file_store;
mod memory_store;

//=== External Dependencies ===============================================

use std::cmp::Ordering;

use thiserror::Error;

//=== Public API ==========================================================

pub use file_store::FileRecordStore;
pub use memory_store::MemoryRecordStore;

/// Number of distances kept on the leaderboard.
pub const RECORD_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding failed: {0}")]
    Encode(#[from] bincode::Error),
}

/// Persistence collaborator for finished-session distances.
pub trait RecordStore {
    /// Merges `distance` into the stored leaderboard.
    fn save(&mut self, distance: f32) -> Result<(), RecordError>;

    /// Stored distances, descending, at most [`RECORD_LIMIT`] entries.
    fn load(&self) -> Result<Vec<f32>, RecordError>;
}

/// Inserts `distance`, sorts descending and drops everything past
/// [`RECORD_LIMIT`].
pub fn merge_record(records: &mut Vec<f32>, distance: f32) {
    records.push(distance);
    records.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    records.truncate(RECORD_LIMIT);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_save_keeps_top_five_descending() {
        let mut records = Vec::new();
        for distance in [12.3, 45.6, 7.8, 99.9, 33.3] {
            merge_record(&mut records, distance);
        }
        assert_eq!(records, vec![99.9, 45.6, 33.3, 12.3, 7.8]);

        merge_record(&mut records, 50.0);
        assert_eq!(records, vec![99.9, 50.0, 45.6, 33.3, 12.3]);
    }

    #[test]
    fn low_distance_on_full_board_is_dropped() {
        let mut records = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        merge_record(&mut records, 0.5);
        assert_eq!(records, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn ties_are_kept() {
        let mut records = vec![3.0];
        merge_record(&mut records, 3.0);
        assert_eq!(records, vec![3.0, 3.0]);
    }
}
