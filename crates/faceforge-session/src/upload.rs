// crates/faceforge-session/src/upload.rs
//
// Phase 1 of a submission: the bulk transfer. Image, audio, and the option
// fields go up as one multipart POST; the synchronous acknowledgment carries
// the task identifier used for the phase-2 socket notification.

use std::path::{Path, PathBuf};

use faceforge_core::options::GenerationOptions;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Why a submission never reached the generating stage. Everything here is
/// retryable by the user; nothing retries automatically.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("backend rejected the job ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend acknowledgment carried no task id")]
    MissingTaskId,
}

#[derive(Deserialize)]
struct CreateJobAck {
    task_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// POST image + audio + option fields to the job-creation endpoint and
/// return the backend's task identifier.
pub(crate) async fn create_job(
    client: &reqwest::Client,
    upload_url: &Url,
    image: &Path,
    audio: &Path,
    options: &GenerationOptions,
) -> Result<String, SubmitError> {
    let mut form = Form::new()
        .part("image", file_part(image).await?)
        .part("audio", file_part(audio).await?);
    for (name, value) in options.form_fields() {
        form = form.text(name, value);
    }

    let response = client
        .post(upload_url.clone())
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| status.to_string());
        return Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<CreateJobAck>()
        .await?
        .task_id
        .ok_or(SubmitError::MissingTaskId)
}

async fn file_part(path: &Path) -> Result<Part, SubmitError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SubmitError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());
    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))?)
}

/// Good-enough media type from the extension; the backend keys off the file
/// name anyway.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("bmp") => "image/bmp",
        Some("tiff" | "tif") => "image/tiff",
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_covers_the_accepted_extensions() {
        assert_eq!(mime_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("v.wav")), "audio/wav");
        assert_eq!(mime_for(Path::new("v.unknown")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn missing_file_maps_to_file_read() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(file_part(Path::new("/definitely/not/here.png")))
            .unwrap_err();
        assert!(matches!(err, SubmitError::FileRead { .. }));
    }
}
