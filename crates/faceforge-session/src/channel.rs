// crates/faceforge-session/src/channel.rs
//
// The session channel event loop. Owns the socket for the lifetime of the
// app: connect, serve, reconnect after a fixed delay, forever — until a
// Shutdown command or the UI side going away ends it.
//
// Submissions run inline in the serve loop, so the two-phase handoff cannot
// reorder: the phase-2 socket notification is only sent after the phase-1
// HTTP acknowledgment has been parsed.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use crossbeam_channel::Sender;
use faceforge_core::options::GenerationOptions;
use faceforge_core::session_types::SessionEvent;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::wire::{self, ServerEvent};
use crate::{upload, ServerConfig};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type SocketSink = SplitSink<Socket, Message>;

/// Commands from the UI thread into the channel loop.
#[derive(Debug)]
pub(crate) enum SessionCmd {
    Submit {
        image: PathBuf,
        audio: PathBuf,
        options: GenerationOptions,
    },
    Download {
        url: String,
        dest: PathBuf,
    },
    Shutdown,
}

const RECONNECT_DELAY: Duration = Duration::from_secs(3);

pub(crate) async fn run(
    cfg: ServerConfig,
    mut cmds: UnboundedReceiver<SessionCmd>,
    events: Sender<SessionEvent>,
    connected: Arc<AtomicBool>,
) {
    let client = reqwest::Client::new();

    loop {
        // Keep servicing commands while a connect attempt is in flight so
        // shutdown never waits on an unreachable host.
        let attempt = tokio::select! {
            attempt = connect_async(cfg.socket_url.as_str()) => attempt,
            cmd = cmds.recv() => {
                if handle_offline_cmd(cmd, &events) { continue } else { return }
            }
        };

        match attempt {
            Ok((socket, _response)) => {
                connected.store(true, Ordering::Relaxed);
                let _ = events.send(SessionEvent::Connected);

                let keep_going = serve_connection(socket, &cfg, &client, &mut cmds, &events).await;

                connected.store(false, Ordering::Relaxed);
                let _ = events.send(SessionEvent::Disconnected);
                if !keep_going {
                    return;
                }
            }
            Err(e) => {
                eprintln!("[session] connect {}: {e}", cfg.socket_url);
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
            cmd = cmds.recv() => {
                if !handle_offline_cmd(cmd, &events) { return }
            }
        }
    }
}

/// Commands arriving while no socket is up. Returns false when the loop
/// should exit.
fn handle_offline_cmd(cmd: Option<SessionCmd>, events: &Sender<SessionEvent>) -> bool {
    match cmd {
        None | Some(SessionCmd::Shutdown) => false,
        Some(SessionCmd::Submit { .. }) => {
            // SessionWorker::submit_generation fail-fasts while disconnected,
            // so this only happens on a race with a drop mid-flight.
            let _ = events.send(SessionEvent::SubmitFailed {
                message: "not connected to server".into(),
            });
            true
        }
        Some(SessionCmd::Download { .. }) => {
            let _ = events.send(SessionEvent::DownloadFailed {
                message: "not connected to server".into(),
            });
            true
        }
    }
}

/// Serve one live socket. Returns false when the loop should exit instead
/// of reconnecting.
async fn serve_connection(
    socket: Socket,
    cfg: &ServerConfig,
    client: &reqwest::Client,
    cmds: &mut UnboundedReceiver<SessionCmd>,
    events: &Sender<SessionEvent>,
) -> bool {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => handle_frame(text.as_str(), events),
                Some(Ok(Message::Close(_))) | None => return true,
                // Pings are answered by tungstenite itself; binary frames
                // are not part of the contract.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    eprintln!("[session] socket read: {e}");
                    return true;
                }
            },
            cmd = cmds.recv() => match cmd {
                Some(SessionCmd::Submit { image, audio, options }) => {
                    if let Err(e) = handle_submit(
                        &mut sink, cfg, client, events, image, audio, options,
                    ).await {
                        // The sink is gone — reconnect and let the UI see
                        // the disconnect.
                        eprintln!("[session] submit: {e:#}");
                        return true;
                    }
                }
                Some(SessionCmd::Download { url, dest }) => {
                    // Spawned so a long fetch never stalls event ingestion.
                    let client = client.clone();
                    let events = events.clone();
                    tokio::spawn(async move {
                        download(client, url, dest, events).await;
                    });
                }
                None | Some(SessionCmd::Shutdown) => {
                    let _ = sink.send(Message::Close(None)).await;
                    return false;
                }
            }
        }
    }
}

fn handle_frame(text: &str, events: &Sender<SessionEvent>) {
    match wire::decode(text) {
        Ok(Some(server_event)) => {
            let event = match server_event {
                ServerEvent::GenerationStarted { task_id } => SessionEvent::Started { task_id },
                ServerEvent::GenerationCompleted { video_url } => {
                    SessionEvent::Completed { video_url }
                }
                ServerEvent::GenerationError { message } => SessionEvent::Failed { message },
            };
            let _ = events.send(event);
        }
        Ok(None) => {}
        Err(e) => eprintln!("[session] bad frame: {e}"),
    }
}

/// The two-phase handoff. Phase-1 failures are reported as SubmitFailed and
/// leave the session serving; a dead sink in phase 2 is an Err so the caller
/// reconnects.
async fn handle_submit(
    sink: &mut SocketSink,
    cfg: &ServerConfig,
    client: &reqwest::Client,
    events: &Sender<SessionEvent>,
    image: PathBuf,
    audio: PathBuf,
    options: GenerationOptions,
) -> Result<()> {
    match upload::create_job(client, &cfg.upload_url, &image, &audio, &options).await {
        Ok(task_id) => {
            // Phase 2 strictly after the phase-1 ack: the backend must never
            // see generation_started for a job it has not acknowledged.
            sink.send(Message::text(wire::encode_generation_started(&task_id)))
                .await
                .context("send generation_started notification")?;
            let _ = events.send(SessionEvent::Submitted { task_id });
        }
        Err(e) => {
            // Generation status stays untouched; no automatic retry.
            let _ = events.send(SessionEvent::SubmitFailed {
                message: e.to_string(),
            });
        }
    }
    Ok(())
}

async fn download(
    client: reqwest::Client,
    url: String,
    dest: PathBuf,
    events: Sender<SessionEvent>,
) {
    let result: Result<()> = async {
        let response = client.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        tokio::fs::write(&dest, &bytes)
            .await
            .with_context(|| format!("write {}", dest.display()))?;
        Ok(())
    }
    .await;

    let event = match result {
        Ok(()) => SessionEvent::ResultSaved { path: dest },
        Err(e) => SessionEvent::DownloadFailed {
            message: format!("{e:#}"),
        },
    };
    let _ = events.send(event);
}
