use std::path::PathBuf;
use std::sync::mpsc;

use tracing::{debug, error};

/// Request sent from the UI thread to the I/O worker.
pub(crate) enum IoRequest {
    /// Write `content` (already serialised JSON) to `path`, creating parent dirs.
    WriteFile { path: PathBuf, content: String },
}

/// Spawn a dedicated I/O worker thread for fire-and-forget writes, so rating
/// clicks never block the UI on disk latency.
///
/// The thread runs until the request sender is dropped.
pub(crate) fn spawn_io_worker() -> mpsc::Sender<IoRequest> {
    let (req_tx, req_rx) = mpsc::channel::<IoRequest>();

    std::thread::Builder::new()
        .name("io-worker".into())
        .spawn(move || {
            debug!("IO worker thread started");
            while let Ok(request) = req_rx.recv() {
                match request {
                    IoRequest::WriteFile { path, content } => {
                        if let Some(parent) = path.parent() {
                            let _ = std::fs::create_dir_all(parent);
                        }
                        if let Err(e) = std::fs::write(&path, &content) {
                            error!("IO worker: failed to write {}: {e}", path.display());
                        }
                    }
                }
            }
            debug!("IO worker thread exiting");
        })
        .expect("Failed to spawn IO worker thread");

    req_tx
}
