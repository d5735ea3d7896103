// crates/faceforge-core/src/lib.rs
//
// Pure data for the FaceForge client: session state, generation options,
// commands, and the event types that flow up from the session channel.
// No egui, no sockets — everything here is plain, testable data.

pub mod commands;
pub mod helpers;
pub mod options;
pub mod session_types;
pub mod state;
