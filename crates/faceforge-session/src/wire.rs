// crates/faceforge-session/src/wire.rs
//
// Frame format for the real-time channel: one JSON object per text frame,
//   {"event": "<name>", "data": {...}}
// The backend emits more event names than the session tracks (room acks,
// task-status probes); unrecognized events decode to Ok(None) and are
// dropped.

use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Server→client frames the session reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerEvent {
    GenerationStarted { task_id: Option<String> },
    GenerationCompleted { video_url: Option<String> },
    GenerationError { message: String },
}

/// The one client→server frame: the phase-2 notification that correlates
/// the freshly created job with this socket.
pub fn encode_generation_started(task_id: &str) -> String {
    json!({
        "event": "generation_started",
        "data": { "task_id": task_id },
    })
    .to_string()
}

/// Decode one text frame. `Ok(None)` is a well-formed frame for an event the
/// session does not track.
pub fn decode(text: &str) -> Result<Option<ServerEvent>, serde_json::Error> {
    let frame: RawFrame = serde_json::from_str(text)?;
    let event = match frame.event.as_str() {
        "generation_started" => Some(ServerEvent::GenerationStarted {
            task_id: field_str(&frame.data, "task_id"),
        }),
        "generation_completed" => Some(ServerEvent::GenerationCompleted {
            video_url: field_str(&frame.data, "video_url"),
        }),
        "generation_error" => Some(ServerEvent::GenerationError {
            // The backend uses "error" for its own failures and "message"
            // for protocol-level complaints.
            message: field_str(&frame.data, "error")
                .or_else(|| field_str(&frame.data, "message"))
                .unwrap_or_else(|| "generation failed".to_string()),
        }),
        _ => None,
    };
    Ok(event)
}

fn field_str(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}
