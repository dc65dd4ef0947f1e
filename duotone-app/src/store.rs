use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;

use tracing::{debug, error};

use duotone_core::RatingStore;

use crate::io_worker::IoRequest;

// ---------------------------------------------------------------------------
// Rating persistence
// ---------------------------------------------------------------------------

/// Load the rating store from disk. Missing or malformed files yield an
/// empty store; entries from other galleries are kept and written back.
pub(crate) fn load_store(scope: &str) -> RatingStore {
    let ratings = read_records(&ratings_path());
    let modes = read_records(&modes_path());
    RatingStore::from_records(scope, &ratings, &modes)
}

/// Queue both rating files for writing on the I/O worker.
pub(crate) fn save_store(store: &RatingStore, io: &mpsc::Sender<IoRequest>) {
    let (ratings, modes) = store.to_records();
    queue_write(io, ratings_path(), &ratings);
    queue_write(io, modes_path(), &modes);
}

/// Synchronous save for shutdown, when the worker may not get to drain.
pub(crate) fn save_store_blocking(store: &RatingStore) {
    let (ratings, modes) = store.to_records();
    write_records(&ratings_path(), &ratings);
    write_records(&modes_path(), &modes);
}

fn write_records(path: &PathBuf, records: &BTreeMap<String, String>) {
    match serde_json::to_string_pretty(records) {
        Ok(content) => {
            if let Err(e) = fs::write(path, content) {
                error!("Failed to write {}: {e}", path.display());
            }
        }
        Err(e) => error!("Failed to serialize {}: {e}", path.display()),
    }
}

fn queue_write(io: &mpsc::Sender<IoRequest>, path: PathBuf, records: &BTreeMap<String, String>) {
    match serde_json::to_string_pretty(records) {
        Ok(content) => {
            let _ = io.send(IoRequest::WriteFile { path, content });
        }
        Err(e) => error!("Failed to serialize {}: {e}", path.display()),
    }
}

fn read_records(path: &PathBuf) -> BTreeMap<String, String> {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to parse {}: {e}", path.display());
                BTreeMap::new()
            }
        },
        Err(e) => {
            debug!("No rating file at {}: {e}", path.display());
            BTreeMap::new()
        }
    }
}

fn ratings_path() -> PathBuf {
    crate::app_dir::exe_directory().join("ratings.json")
}

fn modes_path() -> PathBuf {
    crate::app_dir::exe_directory().join("rating_modes.json")
}
