//! Application message types for async communication.
//!
//! Messages are sent from background fetch threads to the main UI thread
//! via channels. Fetch results carry the sequence number their request
//! was issued with; the app discards responses that arrive after a newer
//! one has already been applied.

use hpmri_core::Dataset;

/// Messages sent from background workers to the UI thread.
pub enum AppMessage {
    /// Proton image fetch succeeded; payload is the PNG bytes.
    ProtonLoaded { seq: u64, bytes: Vec<u8> },

    /// Proton image fetch failed.
    ProtonFailed { seq: u64, error: String },

    /// EPSI dataset fetch succeeded.
    DatasetLoaded { seq: u64, dataset: Box<Dataset> },

    /// EPSI dataset fetch failed.
    DatasetFailed { seq: u64, error: String },

    /// File upload finished (either way).
    UploadFinished { ok: bool, detail: String },
}
