// crates/faceforge-core/src/state.rs
// Pure session data — no egui, no sockets, no runtime handles.
// The option set is serializable via serde; everything channel-derived is
// runtime-only and resets to its default on every launch.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::options::GenerationOptions;
use crate::session_types::SessionEvent;

/// Lifecycle state of a generation session. Single writer (session event
/// ingestion), multi reader (panels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Ready,
    Generating,
    Completed,
    Error,
    Disconnected,
}

impl GenerationStatus {
    /// The human-readable status line shown in the top bar.
    pub fn message(self) -> &'static str {
        match self {
            GenerationStatus::Idle => "Initializing...",
            GenerationStatus::Ready => "Ready to generate avatar",
            GenerationStatus::Generating => {
                "Generating avatar... This may take several minutes"
            }
            GenerationStatus::Completed => "Avatar generation completed successfully!",
            GenerationStatus::Error => "Generation failed. Please try again.",
            GenerationStatus::Disconnected => "Disconnected from server",
        }
    }
}

/// Which kind of source file an upload card accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCategory {
    Image,
    Audio,
}

impl MediaCategory {
    pub fn label(self) -> &'static str {
        match self {
            MediaCategory::Image => "Source image",
            MediaCategory::Audio => "Driving audio",
        }
    }

    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            MediaCategory::Image => &["jpg", "jpeg", "png", "bmp", "tiff"],
            MediaCategory::Audio => &["wav", "mp3", "m4a", "flac", "ogg"],
        }
    }

    /// Client-side convenience limit, not a security boundary — the backend
    /// enforces its own.
    pub fn max_size_bytes(self) -> u64 {
        match self {
            MediaCategory::Image => 20 * 1024 * 1024,
            MediaCategory::Audio => 50 * 1024 * 1024,
        }
    }

    /// Categorize a dropped file by extension.
    pub fn for_path(path: &Path) -> Option<MediaCategory> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [MediaCategory::Image, MediaCategory::Audio]
            .into_iter()
            .find(|c| c.accepted_extensions().contains(&ext.as_str()))
    }
}

/// Why a picked file was refused before any network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileRejection {
    UnsupportedType { category: MediaCategory },
    TooLarge { category: MediaCategory, size_bytes: u64 },
    Unreadable { message: String },
}

impl fmt::Display for FileRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRejection::UnsupportedType { category } => write!(
                f,
                "Unsupported {} type — accepted: {}",
                category.label().to_lowercase(),
                category.accepted_extensions().join(", "),
            ),
            FileRejection::TooLarge {
                category,
                size_bytes,
            } => write!(
                f,
                "File is {} — the {} limit is {}",
                crate::helpers::format::format_size(*size_bytes),
                category.label().to_lowercase(),
                crate::helpers::format::format_size(category.max_size_bytes()),
            ),
            FileRejection::Unreadable { message } => write!(f, "Could not read file: {message}"),
        }
    }
}

/// One selected source file, validated at pick time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub category: MediaCategory,
}

impl SelectedFile {
    /// Validate extension and size, then capture the metadata the upload
    /// cards display. The size check is a local convenience only.
    pub fn from_path(path: PathBuf, category: MediaCategory) -> Result<Self, FileRejection> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let supported = ext
            .as_deref()
            .is_some_and(|e| category.accepted_extensions().contains(&e));
        if !supported {
            return Err(FileRejection::UnsupportedType { category });
        }

        let size_bytes = std::fs::metadata(&path)
            .map_err(|e| FileRejection::Unreadable {
                message: e.to_string(),
            })?
            .len();
        if size_bytes > category.max_size_bytes() {
            return Err(FileRejection::TooLarge {
                category,
                size_bytes,
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());

        Ok(Self {
            path,
            name,
            size_bytes,
            category,
        })
    }
}

/// Everything the panels read. The option set and the settings-panel
/// visibility persist across launches; the rest is per-session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub options: GenerationOptions,
    pub show_settings: bool,

    #[serde(skip)]
    pub image: Option<SelectedFile>,
    #[serde(skip)]
    pub audio: Option<SelectedFile>,
    #[serde(skip)]
    pub connected: bool,
    #[serde(skip)]
    pub status: GenerationStatus,
    /// Locator of the produced video; present only after a completed event,
    /// cleared when the next job starts.
    #[serde(skip)]
    pub video_url: Option<String>,
    /// Backend correlation token of the most recent submission.
    #[serde(skip)]
    pub active_task: Option<String>,
    /// Single dismissible error banner (local validation, submission
    /// rejection, or backend failure).
    #[serde(skip)]
    pub error_banner: Option<String>,
    /// Brief status line under the result panel after a download.
    #[serde(skip)]
    pub save_status: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            options: GenerationOptions::default(),
            show_settings: false,
            image: None,
            audio: None,
            connected: false,
            status: GenerationStatus::Idle,
            video_url: None,
            active_task: None,
            error_banner: None,
            save_status: None,
        }
    }
}

impl SessionState {
    /// The submit gate: both files present, channel up, and no job in
    /// flight. This gate — not the session channel — is what prevents
    /// concurrent submissions.
    pub fn can_generate(&self) -> bool {
        self.image.is_some()
            && self.audio.is_some()
            && self.connected
            && self.status != GenerationStatus::Generating
    }

    /// Fold one channel event into the state. The whole status machine lives
    /// in this match; the compiler keeps it exhaustive.
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connected => {
                self.connected = true;
                // Reconnects re-enter at Ready, never resume Generating.
                self.status = GenerationStatus::Ready;
            }
            SessionEvent::Disconnected => {
                self.connected = false;
                // Overrides Generating: a completion that was in flight when
                // the channel dropped is lost, not guessed at.
                self.status = GenerationStatus::Disconnected;
            }
            SessionEvent::Submitted { task_id } => {
                self.active_task = Some(task_id);
            }
            SessionEvent::Started { .. } => {
                self.status = GenerationStatus::Generating;
                self.video_url = None;
                self.error_banner = None;
            }
            SessionEvent::Completed { video_url } => {
                self.status = GenerationStatus::Completed;
                if let Some(url) = video_url {
                    self.video_url = Some(url);
                }
            }
            SessionEvent::Failed { message } => {
                self.status = GenerationStatus::Error;
                self.error_banner = Some(message);
            }
            SessionEvent::SubmitFailed { message } => {
                // Status untouched — the failed submission never started.
                self.error_banner = Some(message);
            }
            SessionEvent::ResultSaved { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "video".to_string());
                self.save_status = Some(format!("✓ Saved: {name}"));
            }
            SessionEvent::DownloadFailed { message } => {
                self.save_status = Some(format!("✕ Download failed: {message}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file(category: MediaCategory) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from("x"),
            name: "x".into(),
            size_bytes: 1,
            category,
        }
    }

    fn connected_state() -> SessionState {
        let mut s = SessionState::default();
        s.apply_event(SessionEvent::Connected);
        s
    }

    #[test]
    fn connect_moves_idle_to_ready() {
        let s = connected_state();
        assert!(s.connected);
        assert_eq!(s.status, GenerationStatus::Ready);
    }

    #[test]
    fn disconnect_overrides_generating() {
        let mut s = connected_state();
        s.apply_event(SessionEvent::Started { task_id: None });
        assert_eq!(s.status, GenerationStatus::Generating);

        s.apply_event(SessionEvent::Disconnected);
        assert_eq!(s.status, GenerationStatus::Disconnected);
        assert!(!s.connected);
    }

    #[test]
    fn completed_sets_result_locator() {
        let mut s = connected_state();
        s.apply_event(SessionEvent::Started { task_id: None });
        s.apply_event(SessionEvent::Completed {
            video_url: Some("http://host/out.mp4".into()),
        });
        assert_eq!(s.status, GenerationStatus::Completed);
        assert_eq!(s.video_url.as_deref(), Some("http://host/out.mp4"));
    }

    #[test]
    fn completed_without_url_keeps_none() {
        let mut s = connected_state();
        s.apply_event(SessionEvent::Completed { video_url: None });
        assert_eq!(s.status, GenerationStatus::Completed);
        assert!(s.video_url.is_none());
    }

    #[test]
    fn started_clears_stale_result() {
        let mut s = connected_state();
        s.video_url = Some("http://host/old.mp4".into());
        s.apply_event(SessionEvent::Started { task_id: None });
        assert!(s.video_url.is_none());
    }

    #[test]
    fn backend_failure_is_terminal_until_resubmit() {
        let mut s = connected_state();
        s.apply_event(SessionEvent::Started { task_id: None });
        s.apply_event(SessionEvent::Failed {
            message: "face not found".into(),
        });
        assert_eq!(s.status, GenerationStatus::Error);
        assert_eq!(s.error_banner.as_deref(), Some("face not found"));

        // A fresh submission may re-enter Generating.
        s.apply_event(SessionEvent::Started { task_id: None });
        assert_eq!(s.status, GenerationStatus::Generating);
        assert!(s.error_banner.is_none());
    }

    #[test]
    fn submit_failure_leaves_status_untouched() {
        let mut s = connected_state();
        s.apply_event(SessionEvent::SubmitFailed {
            message: "rejected".into(),
        });
        assert_eq!(s.status, GenerationStatus::Ready);
        assert_eq!(s.error_banner.as_deref(), Some("rejected"));
    }

    #[test]
    fn gate_requires_files_connection_and_not_generating() {
        // Every combination of (image, audio, connected) in every status.
        let statuses = [
            GenerationStatus::Idle,
            GenerationStatus::Ready,
            GenerationStatus::Generating,
            GenerationStatus::Completed,
            GenerationStatus::Error,
            GenerationStatus::Disconnected,
        ];
        for status in statuses {
            for has_image in [false, true] {
                for has_audio in [false, true] {
                    for connected in [false, true] {
                        let s = SessionState {
                            image: has_image.then(|| file(MediaCategory::Image)),
                            audio: has_audio.then(|| file(MediaCategory::Audio)),
                            connected,
                            status,
                            ..Default::default()
                        };
                        let expected = has_image
                            && has_audio
                            && connected
                            && status != GenerationStatus::Generating;
                        assert_eq!(s.can_generate(), expected, "{status:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn gate_blocks_second_submit_while_generating() {
        // The double-submit guarantee lives here, not in the channel.
        let mut s = connected_state();
        s.image = Some(file(MediaCategory::Image));
        s.audio = Some(file(MediaCategory::Audio));
        assert!(s.can_generate());

        s.apply_event(SessionEvent::Started { task_id: None });
        assert!(!s.can_generate());

        s.apply_event(SessionEvent::Completed { video_url: None });
        assert!(s.can_generate());
    }

    #[test]
    fn selected_file_rejects_unknown_extension() {
        let err = SelectedFile::from_path(PathBuf::from("notes.txt"), MediaCategory::Image)
            .unwrap_err();
        assert!(matches!(err, FileRejection::UnsupportedType { .. }));
    }

    #[test]
    fn selected_file_captures_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.png");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0u8; 1024]).unwrap();

        let sel = SelectedFile::from_path(path, MediaCategory::Image).unwrap();
        assert_eq!(sel.name, "portrait.png");
        assert_eq!(sel.size_bytes, 1024);
        assert_eq!(sel.category, MediaCategory::Image);
    }

    #[test]
    fn dropped_files_route_by_extension() {
        assert_eq!(
            MediaCategory::for_path(Path::new("a/face.JPG")),
            Some(MediaCategory::Image)
        );
        assert_eq!(
            MediaCategory::for_path(Path::new("take1.flac")),
            Some(MediaCategory::Audio)
        );
        assert_eq!(MediaCategory::for_path(Path::new("clip.mp4")), None);
    }
}
