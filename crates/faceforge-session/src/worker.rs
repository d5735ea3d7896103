// crates/faceforge-session/src/worker.rs
//
// SessionWorker: owns the channel thread. All public API the UI calls lives
// here. One worker exists per app run; FaceForgeApp::new spawns it and
// on_exit joins it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};
use faceforge_core::options::GenerationOptions;
use faceforge_core::session_types::SessionEvent;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::channel::{self, SessionCmd};
use crate::ServerConfig;

pub struct SessionWorker {
    /// Channel events for the UI to drain once per frame.
    pub rx: Receiver<SessionEvent>,
    cmd_tx: UnboundedSender<SessionCmd>,
    connected: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SessionWorker {
    /// Spawn the channel thread. It connects immediately and keeps
    /// reconnecting (with a fixed delay) until shutdown.
    pub fn spawn(cfg: ServerConfig) -> Self {
        let (event_tx, rx) = bounded(256);
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&connected);
        let handle = thread::Builder::new()
            .name("faceforge-session".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        eprintln!("[session] runtime: {e}");
                        return;
                    }
                };
                rt.block_on(channel::run(cfg, cmd_rx, event_tx, flag));
            });

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                eprintln!("[session] spawn: {e}");
                None
            }
        };

        Self {
            rx,
            cmd_tx,
            connected,
            handle,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Queue the two-phase submission. Fails fast — false, nothing queued,
    /// no network call — while the channel is down. A queued submission that
    /// later fails phase 1 surfaces as SessionEvent::SubmitFailed.
    ///
    /// No internal mutual exclusion: two calls race two submissions. The UI
    /// gate (SessionState::can_generate) is the guard, not this method.
    pub fn submit_generation(
        &self,
        image: PathBuf,
        audio: PathBuf,
        options: GenerationOptions,
    ) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.cmd_tx
            .send(SessionCmd::Submit {
                image,
                audio,
                options,
            })
            .is_ok()
    }

    /// Fetch the result video to `dest`; completion arrives as
    /// ResultSaved / DownloadFailed on the event channel.
    pub fn download_result(&self, url: String, dest: PathBuf) {
        let _ = self.cmd_tx.send(SessionCmd::Download { url, dest });
    }

    /// Stop the loop and join the thread. Idempotent.
    pub fn shutdown(&mut self) {
        let _ = self.cmd_tx.send(SessionCmd::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
