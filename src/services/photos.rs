//! Background photo decoding for the picture grid.
//!
//! Decoding runs on a dedicated worker thread; requests and results travel
//! over mpsc channels so all widget state stays on the UI thread. Every
//! request carries a generation number: resetting the presenter bumps the
//! generation, and results stamped with a stale generation are dropped on
//! receipt, which cancels work for fields that no longer exist.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// A decode request handed to the worker thread.
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    /// Generation the requesting field belongs to
    pub generation: u64,
    /// Grid slot the result should land in
    pub slot: usize,
    /// Image file to decode
    pub path: PathBuf,
}

/// Outcome of one decode request.
#[derive(Debug)]
pub struct DecodeResult {
    /// Generation copied from the request
    pub generation: u64,
    /// Grid slot copied from the request
    pub slot: usize,
    /// Source file copied from the request
    pub path: PathBuf,
    /// Decoded pixel dimensions, or the decode error message
    pub outcome: Result<(u32, u32), String>,
}

/// Handle to the decode worker.
///
/// Dropping the loader closes the request channel, which ends the worker
/// thread after it drains outstanding requests.
#[derive(Debug)]
pub struct PhotoLoader {
    request_tx: mpsc::Sender<DecodeRequest>,
    result_rx: mpsc::Receiver<DecodeResult>,
}

impl PhotoLoader {
    /// Spawns the worker thread and returns the loader handle.
    #[must_use]
    pub fn new() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<DecodeRequest>();
        let (result_tx, result_rx) = mpsc::channel::<DecodeResult>();

        thread::spawn(move || {
            for request in request_rx {
                let outcome = decode_dimensions(&request.path);
                let result = DecodeResult {
                    generation: request.generation,
                    slot: request.slot,
                    path: request.path,
                    outcome,
                };
                // Receiver gone means the UI shut down; stop decoding
                if result_tx.send(result).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx,
            result_rx,
        }
    }

    /// Queues a decode. Requests are processed in submission order.
    pub fn request(&self, request: DecodeRequest) {
        // Worker ending early is only possible during shutdown
        let _ = self.request_tx.send(request);
    }

    /// Drains all results that have arrived since the last poll.
    #[must_use]
    pub fn poll(&self) -> Vec<DecodeResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            results.push(result);
        }
        results
    }

    /// Blocks until the next result arrives. Test helper; the UI loop
    /// always uses `poll`.
    pub fn recv_blocking(&self) -> Option<DecodeResult> {
        self.result_rx.recv().ok()
    }
}

impl Default for PhotoLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_dimensions(path: &std::path::Path) -> Result<(u32, u32), String> {
    match image::open(path) {
        Ok(decoded) => Ok((decoded.width(), decoded.height())),
        Err(e) => Err(format!("Failed to decode {}: {e}", path.display())),
    }
}
