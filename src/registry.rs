//! Read and conditional-write operations over the vessel document.
//!
//! # Design
//!
//! `VesselRegistry` is the inbound surface of the crate. It is stateless
//! between calls: every read reflects backend state at call time and every
//! successful write performs exactly one remote mutation. The registry never
//! retries internally; a caller that loses a write race re-reads and retries
//! its own mutation, so intervening external writes are never discarded.
//!
//! # Protocol
//!
//! ```ignore
//! let snapshot = registry.read().await?;
//! let mut records = snapshot.records;
//! records.push(new_vessel);
//! match registry.write(&records, snapshot.version.as_deref()).await {
//!     Ok(new_version) => { /* committed */ }
//!     Err(StoreError::VersionConflict { .. }) => { /* re-read and retry */ }
//!     Err(other) => return Err(other.into()),
//! }
//! ```

use log::warn;
use serde_json::Value;

use crate::document::{self, DecodeWarning, Records};
use crate::store::{CommitRequest, Committer, ContentStore, StoreAddress, StoreError};

/// Fixed human-readable change description recorded on every commit.
pub const COMMIT_MESSAGE: &str = "Update vessel registry";

/// The document and version observed by a single read.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The ordered vessel records. Empty when the file does not exist yet
    /// or when the stored blob failed to decode.
    pub records: Records,
    /// Version token of the stored file; `None` when the file does not
    /// exist yet.
    pub version: Option<String>,
    /// Set when the stored blob failed to decode and the records were
    /// degraded to empty.
    pub warning: Option<DecodeWarning>,
}

/// Vessel registry over a remote content store.
pub struct VesselRegistry<S> {
    store: S,
    address: StoreAddress,
    committer: Option<Committer>,
}

impl<S: ContentStore> VesselRegistry<S> {
    /// Create a registry for the document at `address`.
    pub fn new(store: S, address: StoreAddress) -> Self {
        Self {
            store,
            address,
            committer: None,
        }
    }

    /// Attach commit attribution to every write.
    pub fn with_committer(mut self, committer: Committer) -> Self {
        self.committer = Some(committer);
        self
    }

    /// The address this registry reads and writes.
    pub fn address(&self) -> &StoreAddress {
        &self.address
    }

    /// Fetch the current document and its version token.
    ///
    /// A missing remote file is the empty document with no version token,
    /// not an error. A stored blob that fails to decode also yields the
    /// empty document, with the version token preserved and a warning on
    /// the snapshot; see [`crate::document::decode_records`].
    pub async fn read(&self) -> Result<Snapshot, StoreError> {
        let Some(file) = self.store.fetch(&self.address).await? else {
            return Ok(Snapshot {
                records: Vec::new(),
                version: None,
                warning: None,
            });
        };

        let (records, warning) = document::decode_records(&file.content_base64);
        if let Some(warning) = warning {
            warn!(
                "stored document at {} is unreadable ({}); treating it as empty",
                self.address, warning
            );
        }

        Ok(Snapshot {
            records,
            version: Some(file.version),
            warning,
        })
    }

    /// Replace the document, conditioned on `expected_version`.
    ///
    /// Pass the version token observed by the read this mutation is based
    /// on; pass `None` only when no prior version exists (the create path,
    /// in which the backend's version field is omitted from the wire).
    ///
    /// Returns the new version token. At most one writer can advance the
    /// document from a given version; every other writer conditioned on the
    /// same stale token receives [`StoreError::VersionConflict`] and must
    /// re-read before retrying.
    pub async fn write(
        &self,
        records: &[Value],
        expected_version: Option<&str>,
    ) -> Result<String, StoreError> {
        let content_base64 = document::encode_records(records)
            .map_err(|e| StoreError::Internal(format!("failed to serialize records: {}", e)))?;

        let request = CommitRequest {
            content_base64,
            message: COMMIT_MESSAGE.to_string(),
            committer: self.committer.clone(),
            expected_version: expected_version.map(str::to_owned),
        };
        self.store.commit(&self.address, request).await
    }
}
