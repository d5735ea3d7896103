// crates/faceforge-core/src/commands.rs
//
// Every user action in FaceForge is expressed as an AppCommand.
// Panels emit these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs.

use std::path::PathBuf;

use crate::options::{BackgroundEnhancer, Enhancer, OutputSize, Preprocess};

#[derive(Clone, Debug)]
pub enum AppCommand {
    // ── File selection ───────────────────────────────────────────────────────
    SelectImage(PathBuf),
    SelectAudio(PathBuf),
    RemoveImage,
    RemoveAudio,

    // ── Generation options ───────────────────────────────────────────────────
    SetSize(OutputSize),
    SetPreprocess(Preprocess),
    SetPoseStyle(u8),
    SetExpressionScale(f32),
    SetBatchSize(u8),
    SetEnhancer(Enhancer),
    SetBackgroundEnhancer(BackgroundEnhancer),
    SetStillMode(bool),
    SetFace3dVis(bool),
    SetVerbose(bool),
    ToggleSettings,

    // ── Generation / result ──────────────────────────────────────────────────
    /// Validate locally, then hand the (image, audio, options) triple to the
    /// session worker. Failures surface on the error banner.
    Generate,
    /// Open a save dialog and fetch the result video to disk.
    DownloadResult { url: String },

    // ── Banners ──────────────────────────────────────────────────────────────
    DismissError,
    ClearSaveStatus,
}
