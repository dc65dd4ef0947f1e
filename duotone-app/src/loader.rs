use std::sync::mpsc;

use eframe::egui;
use tracing::debug;

use duotone_core::{SourceScheme, VariantKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

pub(crate) struct LoadRequest {
    pub(crate) index: usize,
    pub(crate) kind: VariantKind,
    pub(crate) name: String,
    pub(crate) location: String,
}

pub(crate) enum LoadResponse {
    Done {
        index: usize,
        kind: VariantKind,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
    },
    Failed {
        index: usize,
        kind: VariantKind,
        name: String,
        location: String,
        error: String,
    },
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// Decode images off the UI thread, one request at a time. Results stream
/// back as they finish so the grid fills in progressively.
pub(crate) fn load_worker(
    ctx: egui::Context,
    rx: mpsc::Receiver<LoadRequest>,
    tx: mpsc::Sender<LoadResponse>,
) {
    while let Ok(req) = rx.recv() {
        let response = match decode(&req.location) {
            Ok((pixels, width, height)) => {
                debug!(index = req.index, name = %req.name, width, height, "decoded variant");
                LoadResponse::Done {
                    index: req.index,
                    kind: req.kind,
                    pixels,
                    width,
                    height,
                }
            }
            Err(error) => LoadResponse::Failed {
                index: req.index,
                kind: req.kind,
                name: req.name,
                location: req.location,
                error,
            },
        };
        if tx.send(response).is_err() {
            return;
        }
        ctx.request_repaint();
    }
}

/// Read and decode one image into straight RGBA8.
///
/// Remote locations are rejected up front; this loader only reads the
/// filesystem, and the scheme hint in the status line tells the user why.
fn decode(location: &str) -> Result<(Vec<u8>, u32, u32), String> {
    let scheme = SourceScheme::detect(location);
    if scheme != SourceScheme::File {
        return Err(format!("remote location ({})", scheme.label()));
    }
    let bytes = std::fs::read(location).map_err(|e| e.to_string())?;
    let image = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width, height))
}
