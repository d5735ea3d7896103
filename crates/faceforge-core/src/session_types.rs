// crates/faceforge-core/src/session_types.rs
//
// Types that flow across the channel between faceforge-session and
// faceforge-ui. No egui, no tokio — just plain data.

use std::path::PathBuf;

/// Events sent from the SessionWorker background thread to the UI.
///
/// These may arrive at any time after the channel opens, interleaved
/// arbitrarily with submissions; the UI must not assume any particular one
/// ever arrives (a started job may never report back if the backend dies).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The real-time channel is open.
    Connected,
    /// The channel closed (peer-initiated or network loss). Overrides any
    /// in-flight generation.
    Disconnected,
    /// Phase 1 acknowledged and phase 2 notified; `task_id` is the backend's
    /// correlation token for the submitted job.
    Submitted { task_id: String },
    /// The backend began working on a job.
    Started { task_id: Option<String> },
    /// The backend finished; the result video is at `video_url` when present.
    Completed { video_url: Option<String> },
    /// The backend reported a generation failure.
    Failed { message: String },
    /// Phase 1 (job creation) was rejected or unreachable. Generation status
    /// is left untouched; the view surfaces a retryable banner.
    SubmitFailed { message: String },
    /// A requested result download finished.
    ResultSaved { path: PathBuf },
    /// A requested result download failed.
    DownloadFailed { message: String },
}
