//! store::github
//!
//! GitHub content store implementation over the Contents API.
//!
//! # Design
//!
//! One file in one repository is the entire database. Reads issue
//! `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` and writes issue
//! `PUT /repos/{owner}/{repo}/contents/{path}`. The PUT body carries the
//! file's current blob SHA when the caller expects a prior version; GitHub
//! rejects the commit when that SHA is stale, and that rejection is the only
//! concurrency control this crate relies on.
//!
//! # Conditional field omission
//!
//! When creating the file (`expected_version == None`) the `sha` field is
//! omitted from the request body entirely. Sending `"sha": null` is not
//! equivalent: the API treats an explicit null differently from an absent
//! field. `CommitBody` uses `skip_serializing_if` to guarantee omission.
//!
//! # Retries
//!
//! None. Every call is a single round trip; transport failures surface as
//! [`StoreError::Network`] and status failures carry the backend's status
//! and body for diagnosis.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::{CommitRequest, ContentStore, StoreAddress, StoreError, StoredFile};

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "moorage";

/// GitHub content store.
///
/// Holds the access credential and an HTTP client; the document address is
/// supplied per call so one store instance can serve any repository the
/// credential can reach.
pub struct GitHubContentStore {
    /// HTTP client for making requests.
    client: Client,
    /// Access credential sent as a bearer token.
    token: String,
    /// API base URL (configurable for GitHub Enterprise and tests).
    api_base: String,
}

// Custom Debug to avoid exposing the token.
impl std::fmt::Debug for GitHubContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubContentStore")
            .field("has_token", &!self.token.is_empty())
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubContentStore {
    /// Create a store talking to api.github.com.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a store with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g. `https://github.example.com/api/v3`) or to point at a local
    /// test server.
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: api_base.into(),
        }
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
                StoreError::ConfigurationMissing(
                    "access credential contains characters not valid in a header".to_string(),
                )
            })?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build the Contents API URL for an address.
    fn contents_url(&self, address: &StoreAddress) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, address.owner, address.repo, address.path
        )
    }
}

/// Drain a response body for diagnostics.
async fn read_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

#[async_trait]
impl ContentStore for GitHubContentStore {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self, address: &StoreAddress) -> Result<Option<StoredFile>, StoreError> {
        let url = format!("{}?ref={}", self.contents_url(address), address.branch);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // File does not exist yet. Success path: the caller sees the
            // empty document with no version token.
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::BackendUnavailable {
                status: status.as_u16(),
                body: read_body(response).await,
            });
        }

        let file: ContentsResponse =
            response
                .json()
                .await
                .map_err(|e| StoreError::BackendUnavailable {
                    status: status.as_u16(),
                    body: format!("failed to parse response: {}", e),
                })?;

        Ok(Some(StoredFile {
            content_base64: file.content,
            version: file.sha,
        }))
    }

    async fn commit(
        &self,
        address: &StoreAddress,
        request: CommitRequest,
    ) -> Result<String, StoreError> {
        let url = self.contents_url(address);
        debug!(
            "PUT {} (expected version: {})",
            url,
            request.expected_version.as_deref().unwrap_or("<none>")
        );

        let body = CommitBody {
            message: &request.message,
            content: &request.content_base64,
            branch: &address.branch,
            sha: request.expected_version.as_deref(),
            committer: request.committer.as_ref().map(|c| CommitterBody {
                name: &c.name,
                email: &c.email,
            }),
        };

        let response = self
            .client
            .put(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let committed: CommitResponse =
                response
                    .json()
                    .await
                    .map_err(|e| StoreError::BackendRejected {
                        status: status.as_u16(),
                        body: format!("failed to parse response: {}", e),
                    })?;
            return Ok(committed.content.sha);
        }

        let body_text = read_body(response).await;
        Err(match status {
            // 409 is the SHA check failing outright; 422 carries a mismatch
            // message when a stale SHA was supplied against a newer file.
            StatusCode::CONFLICT => StoreError::VersionConflict {
                address: address.to_string(),
            },
            StatusCode::UNPROCESSABLE_ENTITY if body_text.contains("does not match") => {
                StoreError::VersionConflict {
                    address: address.to_string(),
                }
            }
            _ => StoreError::BackendRejected {
                status: status.as_u16(),
                body: body_text,
            },
        })
    }
}

// --------------------------------------------------------------------------
// API Request/Response Types
// --------------------------------------------------------------------------

/// Response body for `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Deserialize)]
struct ContentsResponse {
    /// Base64-encoded file content (newline-wrapped by the API).
    content: String,
    /// Blob SHA of the stored file.
    sha: String,
}

/// Request body for `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Serialize)]
struct CommitBody<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    committer: Option<CommitterBody<'a>>,
}

/// Commit attribution in the request body.
#[derive(Serialize)]
struct CommitterBody<'a> {
    name: &'a str,
    email: &'a str,
}

/// Response body for a successful commit.
#[derive(Deserialize)]
struct CommitResponse {
    content: CommittedContent,
}

/// The committed file's metadata; only the new SHA is needed.
#[derive(Deserialize)]
struct CommittedContent {
    sha: String,
}
