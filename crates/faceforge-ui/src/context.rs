// crates/faceforge-ui/src/context.rs
//
// AppContext owns all runtime handles that are NOT part of the serializable
// session state.  FaceForgeApp holds one of these plus a SessionState and the
// panel modules — nothing else.

use std::time::{Duration, Instant};

use eframe::egui;
use faceforge_core::session_types::SessionEvent;
use faceforge_core::state::SessionState;
use faceforge_session::SessionWorker;

use crate::faceforge_log;
use faceforge_core::helpers::format::format_clock;

pub struct AppContext {
    /// The channel thread. Spawned once in FaceForgeApp::new, joined on exit.
    pub session: SessionWorker,

    /// Wall-clock start of the in-flight job, for the top-bar elapsed readout.
    /// Runtime-only; cleared on every terminal event.
    pub generating_since: Option<Instant>,
}

impl AppContext {
    pub fn new(session: SessionWorker) -> Self {
        Self {
            session,
            generating_since: None,
        }
    }

    /// Drain the session event channel and fold everything into the state.
    /// Called once per frame from app::update, before any panel draws.
    ///
    /// This is the single translation layer between raw channel output and
    /// UI-visible state — the status machine itself lives in
    /// SessionState::apply_event; this method only tracks the elapsed timer
    /// and repaint scheduling around it.
    pub fn ingest_session_events(&mut self, state: &mut SessionState, ctx: &egui::Context) {
        while let Ok(event) = self.session.rx.try_recv() {
            match &event {
                SessionEvent::Connected => faceforge_log!("[session] connected"),
                SessionEvent::Disconnected => {
                    faceforge_log!("[session] disconnected");
                    self.generating_since = None;
                }
                SessionEvent::Submitted { task_id } => {
                    faceforge_log!("[session] job submitted: {task_id}");
                }
                SessionEvent::Started { task_id } => {
                    faceforge_log!("[session] generation started: {task_id:?}");
                    self.generating_since = Some(Instant::now());
                }
                SessionEvent::Completed { video_url } => {
                    faceforge_log!("[session] generation completed: {video_url:?}");
                    self.generating_since = None;
                }
                SessionEvent::Failed { message } => {
                    faceforge_log!("[session] generation failed: {message}");
                    self.generating_since = None;
                }
                SessionEvent::SubmitFailed { message } => {
                    faceforge_log!("[session] submission failed: {message}");
                }
                SessionEvent::ResultSaved { path } => {
                    faceforge_log!("[session] result saved: {}", path.display());
                }
                SessionEvent::DownloadFailed { message } => {
                    faceforge_log!("[session] download failed: {message}");
                }
            }
            state.apply_event(event);
            ctx.request_repaint();
        }

        // Events arrive between frames; the elapsed readout also needs to
        // advance while nothing else changes.
        if self.generating_since.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    /// "MM:SS" since the in-flight job started, if one is running.
    pub fn elapsed_label(&self) -> Option<String> {
        self.generating_since
            .map(|t| format_clock(t.elapsed().as_secs_f64()))
    }
}
