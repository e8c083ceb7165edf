/// HTTP client for the file server
///
/// The server exposes three endpoints, all treated as external
/// collaborators with a fixed contract:
/// - `GET /files/{subject}` -> `{ "files": [...] }`
/// - `POST /upload` (multipart `subject` + `file`) -> `{message}` xor `{error}`
/// - `GET /uploads/{subject}/{file}` -> raw file bytes
///
/// No retries, no timeouts beyond reqwest defaults: a failed request is
/// logged by the caller and the UI stays in its current state.

mod client;

pub use client::{
    download_file, fetch_bytes, fetch_files, file_url, upload_file, NetError, UploadOutcome,
};
