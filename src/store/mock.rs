//! store::mock
//!
//! Mock content store for deterministic testing.
//!
//! # Design
//!
//! The mock stores files in memory and enforces the same compare-and-swap
//! rule as the real backend: a commit is accepted only when its expected
//! version matches the stored one (or when both are absent, the create
//! path). Version tokens are derived from a hash over a generation counter
//! and the content, so every accepted commit produces a fresh token even
//! for identical content.
//!
//! # Example
//!
//! ```
//! use moorage::store::mock::MockContentStore;
//! use moorage::store::{CommitRequest, ContentStore, StoreAddress};
//!
//! # tokio_test::block_on(async {
//! let store = MockContentStore::new();
//! let address = StoreAddress {
//!     owner: "svnp".to_string(),
//!     repo: "registry".to_string(),
//!     path: "data/vessels.json".to_string(),
//!     branch: "main".to_string(),
//! };
//!
//! assert!(store.fetch(&address).await.unwrap().is_none());
//!
//! let version = store
//!     .commit(
//!         &address,
//!         CommitRequest {
//!             content_base64: "W10=".to_string(),
//!             message: "Update vessel registry".to_string(),
//!             committer: None,
//!             expected_version: None,
//!         },
//!     )
//!     .await
//!     .unwrap();
//!
//! let file = store.fetch(&address).await.unwrap().unwrap();
//! assert_eq!(file.version, version);
//! # });
//! ```

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{CommitRequest, ContentStore, StoreAddress, StoreError, StoredFile};

/// Mock content store for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state,
/// so tests can keep a handle while handing another to the code under test.
#[derive(Debug, Clone)]
pub struct MockContentStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockStoreInner {
    /// Stored files keyed by address display form.
    files: HashMap<String, StoredFile>,
    /// Monotonic counter folded into version tokens.
    generation: u64,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `fetch` with the given error.
    Fetch(StoreError),
    /// Fail `commit` with the given error.
    Commit(StoreError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone)]
pub enum MockOperation {
    Fetch {
        address: String,
    },
    Commit {
        address: String,
        message: String,
        expected_version: Option<String>,
        committer: Option<String>,
    },
}

impl MockContentStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockStoreInner {
                files: HashMap::new(),
                generation: 0,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Create a mock store seeded with a file at `address`.
    ///
    /// The seeded file gets a deterministic version token, readable back via
    /// [`stored_version`](Self::stored_version).
    pub fn with_file(address: &StoreAddress, content_base64: &str) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().unwrap();
            let version = version_for(0, content_base64);
            inner.generation = 1;
            inner.files.insert(
                address.to_string(),
                StoredFile {
                    content_base64: content_base64.to_string(),
                    version,
                },
            );
        }
        store
    }

    /// Configure an operation to fail.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
        self
    }

    /// Get recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.inner.lock().unwrap().operations.clear();
    }

    /// Current version token stored at `address`, if any.
    pub fn stored_version(&self, address: &StoreAddress) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .files
            .get(&address.to_string())
            .map(|f| f.version.clone())
    }
}

impl Default for MockContentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a version token from a generation counter and content.
fn version_for(generation: u64, content_base64: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(generation.to_be_bytes());
    hasher.update(content_base64.as_bytes());
    // Same width as a git blob SHA.
    hex::encode(hasher.finalize())[..40].to_string()
}

#[async_trait]
impl ContentStore for MockContentStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, address: &StoreAddress) -> Result<Option<StoredFile>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Fetch {
            address: address.to_string(),
        });
        if let Some(FailOn::Fetch(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.files.get(&address.to_string()).cloned())
    }

    async fn commit(
        &self,
        address: &StoreAddress,
        request: CommitRequest,
    ) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let key = address.to_string();
        inner.operations.push(MockOperation::Commit {
            address: key.clone(),
            message: request.message.clone(),
            expected_version: request.expected_version.clone(),
            committer: request.committer.as_ref().map(|c| c.name.clone()),
        });
        if let Some(FailOn::Commit(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        let current = inner.files.get(&key).map(|f| f.version.clone());
        let accepted = match (&request.expected_version, &current) {
            (None, None) => true,
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        };
        if !accepted {
            return Err(StoreError::VersionConflict { address: key });
        }

        let generation = inner.generation;
        inner.generation += 1;
        let version = version_for(generation, &request.content_base64);
        inner.files.insert(
            key,
            StoredFile {
                content_base64: request.content_base64,
                version: version.clone(),
            },
        );
        Ok(version)
    }
}
