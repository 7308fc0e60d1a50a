//=========================================================================
// Memory Record Store
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, PoisonError};

//=== Internal Dependencies ===============================================

use super::{merge_record, RecordError, RecordStore};

//=== MemoryRecordStore ===================================================

/// In-process leaderboard. Clones share the same list, so a store handed
/// to one scene is visible from another.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<Vec<f32>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = f32>) -> Self {
        let mut merged = Vec::new();
        for distance in records {
            merge_record(&mut merged, distance);
        }
        Self {
            records: Arc::new(Mutex::new(merged)),
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn save(&mut self, distance: f32) -> Result<(), RecordError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        merge_record(&mut records, distance);
        Ok(())
    }

    fn load(&self) -> Result<Vec<f32>, RecordError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.clone())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
