//=========================================================================
// File Record Store
//=========================================================================
//
// Leaderboard persisted as a bincode-encoded `Vec<f32>`. A missing file
// reads as an empty board; the file is rewritten whole on every save.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{merge_record, RecordError, RecordStore, RECORD_LIMIT};
use crate::config::RecordConfig;

//=== FileRecordStore =====================================================

#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &RecordConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileRecordStore {
    fn save(&mut self, distance: f32) -> Result<(), RecordError> {
        let mut records = self.load()?;
        merge_record(&mut records, distance);

        let bytes = bincode::serialize(&records)?;
        fs::write(&self.path, bytes)?;

        info!("Saved record {:.2} to {} ({} entries)", distance, self.path.display(), records.len());
        Ok(())
    }

    fn load(&self) -> Result<Vec<f32>, RecordError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No record file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<f32> = bincode::deserialize(&bytes)?;
        records.truncate(RECORD_LIMIT);
        Ok(records)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path().join("record.dat"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn saves_survive_a_new_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.dat");

        let mut store = FileRecordStore::new(&path);
        for distance in [12.3, 45.6, 7.8, 99.9, 33.3, 50.0] {
            store.save(distance).unwrap();
        }

        let reopened = FileRecordStore::new(&path);
        assert_eq!(reopened.load().unwrap(), vec![99.9, 50.0, 45.6, 33.3, 12.3]);
    }

    #[test]
    fn corrupt_file_is_an_encode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.dat");
        fs::write(&path, [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]).unwrap();

        let store = FileRecordStore::new(&path);
        assert!(matches!(store.load(), Err(RecordError::Encode(_))));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        let mut store = FileRecordStore::new(dir.path().join("missing").join("record.dat"));
        assert!(matches!(store.save(1.0), Err(RecordError::Io(_))));
    }
}
