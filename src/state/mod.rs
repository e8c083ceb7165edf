/// Client-side state management
///
/// This module owns the two pieces of mutable UI state:
/// - The selected subject and its file listing (session.rs)
/// - The pending upload selection (upload.rs)
///
/// Both are plain state machines with no I/O, so every transition
/// the server can race against is unit-testable in isolation.

pub mod session;
pub mod upload;
