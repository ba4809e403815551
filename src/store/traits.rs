//! store::traits
//!
//! Content store trait definition and shared request/response types.
//!
//! # Design
//!
//! The `ContentStore` trait is async because store operations involve network
//! I/O. All methods return `Result` so callers can tell the failure modes
//! apart; the one that matters most for optimistic concurrency is
//! [`StoreError::VersionConflict`], which is raised for a lost
//! compare-and-swap race and for nothing else.
//!
//! A missing file is not an error: `fetch` returns `Ok(None)` and callers
//! treat that as the empty document.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from content store operations.
///
/// These variants map to the failure modes callers must distinguish when
/// driving the read-modify-write protocol.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Required configuration is absent or malformed. Raised before any
    /// network call is made.
    #[error("missing configuration: {0}")]
    ConfigurationMissing(String),

    /// A conditional write lost the race: the supplied version token no
    /// longer matches the stored document. The caller must re-read and
    /// retry its mutation from the fresh state.
    #[error("version conflict at {address}: the document changed since it was read")]
    VersionConflict {
        /// The address the write targeted.
        address: String,
    },

    /// The backend returned an unexpected status while fetching the
    /// document.
    #[error("backend unavailable: {status} - {body}")]
    BackendUnavailable {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The backend understood the request but declined it (auth, payload,
    /// rate limit).
    #[error("backend rejected the request: {status} - {body}")]
    BackendRejected {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// Transport-level failure before any status was received.
    #[error("network error: {0}")]
    Network(String),

    /// Invariant violation inside the crate (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Identifies exactly one document instance in the remote store.
///
/// All four fields are non-empty when the address comes from validated
/// configuration; see [`crate::config::RegistryConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAddress {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Path of the document file within the repository.
    pub path: String,
    /// Branch holding the document.
    pub branch: String,
}

impl std::fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}:{}@{}",
            self.owner, self.repo, self.path, self.branch
        )
    }
}

/// A stored file as returned by the backend.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Base64 blob exactly as the backend returned it. May contain line
    /// breaks; decoding strips whitespace.
    pub content_base64: String,
    /// Version token of this stored state (the file's blob SHA).
    pub version: String,
}

/// Commit attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committer {
    /// Display name recorded on the commit.
    pub name: String,
    /// Email recorded on the commit.
    pub email: String,
}

/// Request to commit new document content.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    /// Base64-encoded file content.
    pub content_base64: String,
    /// Human-readable change description.
    pub message: String,
    /// Optional commit attribution.
    pub committer: Option<Committer>,
    /// Version token the write is conditioned on. `None` means the file is
    /// expected not to exist yet; backends must omit their version field
    /// entirely in that case rather than send an explicit null, which some
    /// APIs interpret differently.
    pub expected_version: Option<String>,
}

/// The content store trait.
///
/// One document, addressed by [`StoreAddress`], read and conditionally
/// written as a whole. Implementations must be `Send + Sync` to allow use
/// across async tasks.
///
/// # Concurrency
///
/// `fetch` is a pure query and always safe to call concurrently. Racing
/// `commit` calls are arbitrated by the backend alone: at most one writer
/// can advance the document from a given version, and every other writer
/// conditioned on that same stale version receives
/// [`StoreError::VersionConflict`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store name (e.g. "github", "mock").
    fn name(&self) -> &'static str;

    /// Fetch the file at `address`, pinned to the address branch.
    ///
    /// Returns `Ok(None)` when the backend has no file at that path. That
    /// is a success path: a brand-new deployment has no prior file.
    async fn fetch(&self, address: &StoreAddress) -> Result<Option<StoredFile>, StoreError>;

    /// Commit new content for the file at `address`, conditioned on
    /// `request.expected_version`.
    ///
    /// Returns the new version token on success; performs exactly one
    /// remote mutation per successful call.
    async fn commit(
        &self,
        address: &StoreAddress,
        request: CommitRequest,
    ) -> Result<String, StoreError>;
}
