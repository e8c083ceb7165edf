/// The pending upload selection (file picker / drag-and-drop state).
///
/// At most one file is pending at a time. Picking or dropping a new file
/// replaces the previous choice; the selection survives a rejected upload
/// so the user can retry without reselecting, and is cleared only after
/// the server accepts the file.
use std::path::{Path, PathBuf};

/// Label shown when no file is pending.
pub const NO_FILE_LABEL: &str = "No file chosen";

/// The user's locally chosen file, held from selection until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    /// Full path on the local filesystem.
    pub path: PathBuf,
    /// Filename only, as it will be sent to the server.
    pub name: String,
}

/// Everything the network layer needs to perform one upload.
///
/// The subject is captured here, at submission time, so a later subject
/// switch cannot retarget an in-flight upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub subject: String,
    pub path: PathBuf,
    pub file_name: String,
}

/// Submit was attempted with no file pending. No request may be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Please select a file.")]
pub struct NoFileSelected;

/// Owner of the single pending-upload slot.
#[derive(Debug, Default)]
pub struct UploadState {
    pending: Option<PendingUpload>,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a picked or dropped file, replacing any previous choice.
    ///
    /// Paths without a final component (e.g. a dropped directory root)
    /// are ignored; the previous selection stays in place.
    pub fn choose(&mut self, path: PathBuf) {
        let Some(name) = file_name_of(&path) else {
            return;
        };

        self.pending = Some(PendingUpload { path, name });
    }

    /// The filename label, or the "No file chosen" sentinel.
    pub fn label(&self) -> &str {
        self.pending
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(NO_FILE_LABEL)
    }

    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    /// Reset to the empty slate after a successful upload.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// The submit guard: build an [`UploadRequest`] against `subject`,
    /// failing fast when nothing is pending.
    pub fn prepare(&self, subject: &str) -> Result<UploadRequest, NoFileSelected> {
        let pending = self.pending.as_ref().ok_or(NoFileSelected)?;

        Ok(UploadRequest {
            subject: subject.to_owned(),
            path: pending.path.clone(),
            file_name: pending.name.clone(),
        })
    }
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
