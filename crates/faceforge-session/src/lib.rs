// crates/faceforge-session/src/lib.rs
//
// The session channel: one background worker owning the persistent socket to
// the avatar backend and the HTTP job submission. The UI talks to it through
// SessionWorker and drains SessionEvents once per frame.

mod channel;
mod upload;
mod wire;
mod worker;

pub use upload::SubmitError;
pub use worker::SessionWorker;

use url::Url;

/// Where the backend lives. One base URL; the upload and socket endpoints
/// are derived from it.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub upload_url: Url,
    pub socket_url: Url,
}

impl ServerConfig {
    pub const DEFAULT_BASE: &'static str = "http://localhost:5000";

    /// Derive both endpoints from an http(s) base URL.
    pub fn from_base(base: &str) -> Result<Self, url::ParseError> {
        let base: Url = base.parse()?;
        let upload_url = base.join("/upload")?;
        let mut socket_url = base.join("/ws")?;
        let scheme = match socket_url.scheme() {
            "https" => "wss",
            _ => "ws",
        };
        // set_scheme only rejects invalid transitions; ws/wss from http(s) is fine.
        let _ = socket_url.set_scheme(scheme);
        Ok(Self {
            upload_url,
            socket_url,
        })
    }

    /// Read `FACEFORGE_SERVER` or fall back to localhost:5000.
    pub fn from_env() -> Self {
        let base =
            std::env::var("FACEFORGE_SERVER").unwrap_or_else(|_| Self::DEFAULT_BASE.to_string());
        Self::from_base(&base).unwrap_or_else(|e| {
            eprintln!("[session] invalid FACEFORGE_SERVER {base:?}: {e} — using default");
            Self::from_base(Self::DEFAULT_BASE).expect("default server URL parses")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_derive_from_base() {
        let cfg = ServerConfig::from_base("http://localhost:5000").unwrap();
        assert_eq!(cfg.upload_url.as_str(), "http://localhost:5000/upload");
        assert_eq!(cfg.socket_url.as_str(), "ws://localhost:5000/ws");
    }

    #[test]
    fn https_base_yields_wss_socket() {
        let cfg = ServerConfig::from_base("https://avatars.example.com").unwrap();
        assert_eq!(cfg.socket_url.scheme(), "wss");
    }
}
