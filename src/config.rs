//! Process configuration.
//!
//! Configuration comes from the environment and is loaded once at process
//! start; it is treated as immutable for the process lifetime and there is
//! no reload-on-change behavior. Missing or malformed values fail fast with
//! a [`ConfigError`] before any network call.
//!
//! # Variables
//!
//! - `GITHUB_TOKEN` - access credential (required)
//! - `GITHUB_REPO` - `owner/repo` slug identifying the repository (required)
//! - `GITHUB_FILE_PATH` - path of the document file within the repository (required)
//! - `GITHUB_BRANCH` - branch holding the document (default: `main`)
//! - `GITHUB_COMMITTER_NAME` / `GITHUB_COMMITTER_EMAIL` - optional commit
//!   attribution; both must be set for attribution to be sent

use thiserror::Error;

use crate::store::{Committer, StoreAddress, StoreError};

/// Branch used when `GITHUB_BRANCH` is not set.
pub const DEFAULT_BRANCH: &str = "main";

/// Errors from configuration loading.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required environment variable is not set or is empty.
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    /// `GITHUB_REPO` does not split into exactly two non-empty parts.
    #[error("GITHUB_REPO must be of the form 'owner/repo', got '{0}'")]
    MalformedRepo(String),
}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        StoreError::ConfigurationMissing(err.to_string())
    }
}

/// Validated process configuration.
#[derive(Clone)]
pub struct RegistryConfig {
    /// Access credential for the backend.
    pub token: String,
    /// Address of the document.
    pub address: StoreAddress,
    /// Optional commit attribution.
    pub committer: Option<Committer>,
}

// Custom Debug to avoid exposing the token.
impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("has_token", &!self.token.is_empty())
            .field("address", &self.address)
            .field("committer", &self.committer)
            .finish()
    }
}

impl RegistryConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Split out from [`from_env`](Self::from_env) so validation can be
    /// tested without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = require(&lookup, "GITHUB_TOKEN")?;
        let slug = require(&lookup, "GITHUB_REPO")?;
        let path = require(&lookup, "GITHUB_FILE_PATH")?;
        let branch = lookup("GITHUB_BRANCH")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        let (owner, repo) = split_slug(&slug)?;

        let committer = match (
            lookup("GITHUB_COMMITTER_NAME"),
            lookup("GITHUB_COMMITTER_EMAIL"),
        ) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(Committer { name, email })
            }
            _ => None,
        };

        Ok(Self {
            token,
            address: StoreAddress {
                owner,
                repo,
                path,
                branch,
            },
            committer,
        })
    }
}

/// Read a required variable, treating empty as absent.
fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

/// Split an `owner/repo` slug into exactly two non-empty parts.
fn split_slug(slug: &str) -> Result<(String, String), ConfigError> {
    let parts: Vec<&str> = slug.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::MalformedRepo(slug.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            ("GITHUB_TOKEN", "ghp_test"),
            ("GITHUB_REPO", "svnp/registry"),
            ("GITHUB_FILE_PATH", "data/vessels.json"),
        ]
    }

    #[test]
    fn loads_complete_configuration() {
        let config = RegistryConfig::from_lookup(env(&complete())).unwrap();
        assert_eq!(config.token, "ghp_test");
        assert_eq!(config.address.owner, "svnp");
        assert_eq!(config.address.repo, "registry");
        assert_eq!(config.address.path, "data/vessels.json");
        assert_eq!(config.address.branch, DEFAULT_BRANCH);
        assert!(config.committer.is_none());
    }

    #[test]
    fn branch_override() {
        let mut pairs = complete();
        pairs.push(("GITHUB_BRANCH", "registry-data"));
        let config = RegistryConfig::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.address.branch, "registry-data");
    }

    #[test]
    fn missing_token_fails() {
        let result = RegistryConfig::from_lookup(env(&[
            ("GITHUB_REPO", "svnp/registry"),
            ("GITHUB_FILE_PATH", "data/vessels.json"),
        ]));
        assert!(matches!(result, Err(ConfigError::MissingVar("GITHUB_TOKEN"))));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let mut pairs = complete();
        pairs[0] = ("GITHUB_TOKEN", "");
        let result = RegistryConfig::from_lookup(env(&pairs));
        assert!(matches!(result, Err(ConfigError::MissingVar("GITHUB_TOKEN"))));
    }

    #[test]
    fn missing_repo_fails() {
        let result = RegistryConfig::from_lookup(env(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("GITHUB_FILE_PATH", "data/vessels.json"),
        ]));
        assert!(matches!(result, Err(ConfigError::MissingVar("GITHUB_REPO"))));
    }

    #[test]
    fn missing_file_path_fails() {
        let result = RegistryConfig::from_lookup(env(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("GITHUB_REPO", "svnp/registry"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("GITHUB_FILE_PATH"))
        ));
    }

    #[test]
    fn slug_without_slash_is_malformed() {
        let mut pairs = complete();
        pairs[1] = ("GITHUB_REPO", "registry");
        let result = RegistryConfig::from_lookup(env(&pairs));
        assert!(matches!(result, Err(ConfigError::MalformedRepo(_))));
    }

    #[test]
    fn slug_with_extra_segment_is_malformed() {
        let mut pairs = complete();
        pairs[1] = ("GITHUB_REPO", "svnp/registry/extra");
        let result = RegistryConfig::from_lookup(env(&pairs));
        assert!(matches!(result, Err(ConfigError::MalformedRepo(_))));
    }

    #[test]
    fn slug_with_empty_half_is_malformed() {
        for slug in ["/registry", "svnp/", "/"] {
            let mut pairs = complete();
            pairs[1] = ("GITHUB_REPO", slug);
            let result = RegistryConfig::from_lookup(env(&pairs));
            assert!(
                matches!(result, Err(ConfigError::MalformedRepo(_))),
                "slug '{}' should be rejected",
                slug
            );
        }
    }

    #[test]
    fn committer_requires_both_fields() {
        let mut pairs = complete();
        pairs.push(("GITHUB_COMMITTER_NAME", "Port Ops"));
        let config = RegistryConfig::from_lookup(env(&pairs)).unwrap();
        assert!(config.committer.is_none());

        pairs.push(("GITHUB_COMMITTER_EMAIL", "ops@example.com"));
        let config = RegistryConfig::from_lookup(env(&pairs)).unwrap();
        let committer = config.committer.unwrap();
        assert_eq!(committer.name, "Port Ops");
        assert_eq!(committer.email, "ops@example.com");
    }

    #[test]
    fn config_error_converts_to_store_error() {
        let err: StoreError = ConfigError::MissingVar("GITHUB_TOKEN").into();
        assert!(matches!(err, StoreError::ConfigurationMissing(_)));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn debug_redacts_token() {
        let config = RegistryConfig::from_lookup(env(&complete())).unwrap();
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("ghp_test"));
        assert!(debug_output.contains("has_token"));
    }
}
