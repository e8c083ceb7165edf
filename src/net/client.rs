use serde::Deserialize;
use std::path::PathBuf;

use crate::state::upload::UploadRequest;

/// Errors from talking to the file server.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed upload reply: expected exactly one of `message` or `error`")]
    MalformedReply,
}

/// The server's verdict on an upload. Both variants carry server-supplied
/// text that is surfaced to the user verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// `{ "message": ... }` — the file was stored.
    Accepted(String),
    /// `{ "error": ... }` — the upload was refused (bad type, no subject, ...).
    Rejected(String),
}

/// Body of `GET /files/{subject}`.
#[derive(Debug, Deserialize)]
struct FileListingBody {
    files: Vec<String>,
}

/// Body of `POST /upload`. The contract says exactly one field is present;
/// anything else is a protocol error, not something to guess around.
#[derive(Debug, Deserialize)]
struct UploadReplyBody {
    message: Option<String>,
    error: Option<String>,
}

impl UploadReplyBody {
    fn into_outcome(self) -> Result<UploadOutcome, NetError> {
        match (self.message, self.error) {
            (Some(message), None) => Ok(UploadOutcome::Accepted(message)),
            (None, Some(error)) => Ok(UploadOutcome::Rejected(error)),
            _ => Err(NetError::MalformedReply),
        }
    }
}

/// Static resource URL for a subject/file pair, with each path segment
/// percent-encoded so filenames with spaces survive the round trip.
pub fn file_url(base: &str, subject: &str, file_name: &str) -> String {
    format!(
        "{base}/uploads/{}/{}",
        urlencoding::encode(subject),
        urlencoding::encode(file_name)
    )
}

/// Fetch the file listing for a subject. Server order is display order.
pub async fn fetch_files(base: &str, subject: &str) -> Result<Vec<String>, NetError> {
    let url = format!("{base}/files/{}", urlencoding::encode(subject));

    let body: FileListingBody = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(body.files)
}

/// Submit one file as multipart `subject` + `file` fields.
///
/// The upload is refused server-side (not here) for disallowed types; a
/// refusal comes back as a normal `UploadOutcome::Rejected`, while
/// transport problems surface as `Err`.
pub async fn upload_file(base: &str, request: UploadRequest) -> Result<UploadOutcome, NetError> {
    let bytes = tokio::fs::read(&request.path)
        .await
        .map_err(|source| NetError::ReadFile {
            path: request.path.clone(),
            source,
        })?;

    let part = reqwest::multipart::Part::bytes(bytes).file_name(request.file_name.clone());
    let form = reqwest::multipart::Form::new()
        .text("subject", request.subject.clone())
        .part("file", part);

    let reply: UploadReplyBody = reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(form)
        .send()
        .await?
        .json()
        .await?;

    reply.into_outcome()
}

/// Fetch a static resource (`/uploads/{subject}/{file}`) into memory.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, NetError> {
    let bytes = reqwest::get(url)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    Ok(bytes.to_vec())
}

/// Download a static resource to a user-chosen destination path.
pub async fn download_file(url: String, dest: PathBuf) -> Result<PathBuf, NetError> {
    let bytes = fetch_bytes(&url).await?;

    tokio::fs::write(&dest, bytes)
        .await
        .map_err(|source| NetError::WriteFile {
            path: dest.clone(),
            source,
        })?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_preserves_server_order() {
        let body: FileListingBody =
            serde_json::from_str(r#"{"files": ["z.pdf", "a.png", "m.txt"]}"#).unwrap();
        assert_eq!(body.files, vec!["z.pdf", "a.png", "m.txt"]);
    }

    #[test]
    fn empty_listing_decodes() {
        let body: FileListingBody = serde_json::from_str(r#"{"files": []}"#).unwrap();
        assert!(body.files.is_empty());
    }

    #[test]
    fn success_reply_becomes_accepted() {
        let body: UploadReplyBody =
            serde_json::from_str(r#"{"message": "File uploaded successfully!"}"#).unwrap();
        assert_eq!(
            body.into_outcome().unwrap(),
            UploadOutcome::Accepted("File uploaded successfully!".into())
        );
    }

    #[test]
    fn error_reply_becomes_rejected_verbatim() {
        let body: UploadReplyBody =
            serde_json::from_str(r#"{"error": "Invalid file type"}"#).unwrap();
        assert_eq!(
            body.into_outcome().unwrap(),
            UploadOutcome::Rejected("Invalid file type".into())
        );
    }

    #[test]
    fn reply_with_both_fields_is_malformed() {
        let body: UploadReplyBody =
            serde_json::from_str(r#"{"message": "ok", "error": "bad"}"#).unwrap();
        assert!(matches!(
            body.into_outcome(),
            Err(NetError::MalformedReply)
        ));
    }

    #[test]
    fn reply_with_neither_field_is_malformed() {
        let body: UploadReplyBody = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            body.into_outcome(),
            Err(NetError::MalformedReply)
        ));
    }

    #[test]
    fn file_url_encodes_path_segments() {
        assert_eq!(
            file_url("http://127.0.0.1:5000", "DS", "lab report 1.pdf"),
            "http://127.0.0.1:5000/uploads/DS/lab%20report%201.pdf"
        );
    }
}
