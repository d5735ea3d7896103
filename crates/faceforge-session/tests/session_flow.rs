// crates/faceforge-session/tests/session_flow.rs
//
// Drives a real SessionWorker against an in-process mock backend (axum: one
// JSON upload route + one websocket route) and checks the submission
// handshake ordering and the events the channel emits.

use std::path::PathBuf;
use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use crossbeam_channel::Receiver;
use faceforge_core::options::GenerationOptions;
use faceforge_core::session_types::SessionEvent;
use faceforge_session::{ServerConfig, SessionWorker};
use serde_json::{json, Value};
use tokio::sync::mpsc;

const RECV_TIMEOUT: Duration = Duration::from_secs(10);
const TASK_ID: &str = "task_42_1700000000";
const VIDEO_URL: &str = "http://backend/output/avatar.mp4";

// ── Mock backend ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum Scenario {
    /// Ack the upload, echo started + completed, then close the socket.
    Complete,
    /// Ack the upload, echo started, then drop the connection.
    DropMidGeneration,
    /// Refuse the upload with a JSON error body.
    RejectUpload,
}

#[derive(Debug)]
enum Step {
    Upload { field_names: Vec<String> },
    Notify { task_id: String },
}

#[derive(Clone)]
struct Backend {
    scenario: Scenario,
    steps: mpsc::UnboundedSender<Step>,
}

async fn upload_handler(State(backend): State<Backend>, mut multipart: Multipart) -> Response {
    let mut field_names = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        field_names.push(field.name().unwrap_or("").to_string());
        let _ = field.bytes().await.expect("field body");
    }
    backend
        .steps
        .send(Step::Upload { field_names })
        .expect("record upload");

    match backend.scenario {
        Scenario::RejectUpload => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "gpu meltdown" })),
        )
            .into_response(),
        _ => Json(json!({
            "task_id": TASK_ID,
            "status": "started",
            "message": "Generation started successfully",
        }))
        .into_response(),
    }
}

async fn ws_handler(State(backend): State<Backend>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| serve_ws(socket, backend))
}

async fn serve_ws(mut socket: WebSocket, backend: Backend) {
    // Greeting the real backend sends; the client must ignore it.
    let _ = socket
        .send(WsMessage::Text(
            json!({ "event": "connected", "data": { "message": "hi" } }).to_string(),
        ))
        .await;

    while let Some(Ok(msg)) = socket.recv().await {
        let WsMessage::Text(text) = msg else { continue };
        let frame: Value = serde_json::from_str(&text).expect("client frame is JSON");
        assert_eq!(frame["event"], "generation_started");
        let task_id = frame["data"]["task_id"]
            .as_str()
            .expect("notification carries task_id")
            .to_string();
        backend
            .steps
            .send(Step::Notify {
                task_id: task_id.clone(),
            })
            .expect("record notify");

        let started = json!({
            "event": "generation_started",
            "data": { "task_id": task_id },
        });
        match backend.scenario {
            Scenario::Complete => {
                let completed = json!({
                    "event": "generation_completed",
                    "data": { "task_id": task_id, "video_url": VIDEO_URL, "status": "completed" },
                });
                let _ = socket.send(WsMessage::Text(started.to_string())).await;
                let _ = socket.send(WsMessage::Text(completed.to_string())).await;
                return; // close
            }
            Scenario::DropMidGeneration => {
                let _ = socket.send(WsMessage::Text(started.to_string())).await;
                return; // close mid-generation
            }
            Scenario::RejectUpload => {}
        }
    }
}

async fn spawn_backend(scenario: Scenario) -> (ServerConfig, mpsc::UnboundedReceiver<Step>) {
    let (steps_tx, steps_rx) = mpsc::unbounded_channel();
    let backend = Backend {
        scenario,
        steps: steps_tx,
    };
    let app = Router::new()
        .route("/upload", post(upload_handler))
        .route("/ws", get(ws_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    let cfg = ServerConfig::from_base(&format!("http://{addr}")).expect("mock base url");
    (cfg, steps_rx)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn source_files(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let image = dir.path().join("portrait.png");
    let audio = dir.path().join("voice.wav");
    std::fs::write(&image, b"not really a png").expect("write image");
    std::fs::write(&audio, b"not really a wav").expect("write audio");
    (image, audio)
}

fn next_event(rx: &Receiver<SessionEvent>) -> SessionEvent {
    rx.recv_timeout(RECV_TIMEOUT).expect("session event")
}

async fn next_step(rx: &mut mpsc::UnboundedReceiver<Step>) -> Step {
    tokio::time::timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("backend step in time")
        .expect("backend step")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn full_submission_flow_orders_the_two_phases() {
    let (cfg, mut steps) = spawn_backend(Scenario::Complete).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (image, audio) = source_files(&dir);

    let mut worker = SessionWorker::spawn(cfg);
    assert_eq!(next_event(&worker.rx), SessionEvent::Connected);
    assert!(worker.is_connected());

    assert!(worker.submit_generation(image, audio, GenerationOptions::default()));

    assert_eq!(
        next_event(&worker.rx),
        SessionEvent::Submitted {
            task_id: TASK_ID.into()
        }
    );
    assert_eq!(
        next_event(&worker.rx),
        SessionEvent::Started {
            task_id: Some(TASK_ID.into())
        }
    );
    assert_eq!(
        next_event(&worker.rx),
        SessionEvent::Completed {
            video_url: Some(VIDEO_URL.into())
        }
    );
    // The mock closes after completing; the client must observe it.
    assert_eq!(next_event(&worker.rx), SessionEvent::Disconnected);

    // The backend saw the bulk transfer strictly before the socket
    // notification, and the notification carried the acknowledged task id.
    let Step::Upload { field_names } = next_step(&mut steps).await else {
        panic!("first backend step must be the upload");
    };
    for required in ["image", "audio", "size", "enhancer", "still_mode"] {
        assert!(
            field_names.iter().any(|n| n == required),
            "missing multipart field {required:?} in {field_names:?}"
        );
    }
    let Step::Notify { task_id } = next_step(&mut steps).await else {
        panic!("second backend step must be the notification");
    };
    assert_eq!(task_id, TASK_ID);

    worker.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn channel_loss_mid_generation_reads_as_disconnected() {
    let (cfg, _steps) = spawn_backend(Scenario::DropMidGeneration).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (image, audio) = source_files(&dir);

    let mut worker = SessionWorker::spawn(cfg);
    assert_eq!(next_event(&worker.rx), SessionEvent::Connected);
    assert!(worker.submit_generation(image, audio, GenerationOptions::default()));

    assert_eq!(
        next_event(&worker.rx),
        SessionEvent::Submitted {
            task_id: TASK_ID.into()
        }
    );
    assert_eq!(
        next_event(&worker.rx),
        SessionEvent::Started {
            task_id: Some(TASK_ID.into())
        }
    );
    // The very next thing after Started must be the disconnect — never a
    // completion or a failure invented client-side.
    assert_eq!(next_event(&worker.rx), SessionEvent::Disconnected);

    worker.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rejected_upload_surfaces_as_submit_failed() {
    let (cfg, mut steps) = spawn_backend(Scenario::RejectUpload).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (image, audio) = source_files(&dir);

    let mut worker = SessionWorker::spawn(cfg);
    assert_eq!(next_event(&worker.rx), SessionEvent::Connected);
    assert!(worker.submit_generation(image, audio, GenerationOptions::default()));

    match next_event(&worker.rx) {
        SessionEvent::SubmitFailed { message } => {
            assert!(message.contains("gpu meltdown"), "got {message:?}");
        }
        other => panic!("expected SubmitFailed, got {other:?}"),
    }

    // Phase 2 must not run after a phase-1 rejection.
    let Step::Upload { .. } = next_step(&mut steps).await else {
        panic!("expected the upload step");
    };
    assert!(steps.try_recv().is_err(), "no notification after rejection");

    worker.shutdown();
}

#[test]
fn submit_fails_fast_while_disconnected() {
    // Bind-and-drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("probe port");
        listener.local_addr().expect("probe addr").port()
    };
    let cfg = ServerConfig::from_base(&format!("http://127.0.0.1:{port}")).expect("base url");

    let mut worker = SessionWorker::spawn(cfg);
    std::thread::sleep(Duration::from_millis(200));

    assert!(!worker.is_connected());
    assert!(!worker.submit_generation(
        PathBuf::from("img.png"),
        PathBuf::from("voice.wav"),
        GenerationOptions::default(),
    ));
    // Fail-fast means nothing was queued: no events of any kind.
    assert!(worker.rx.recv_timeout(Duration::from_millis(300)).is_err());

    worker.shutdown();
}
