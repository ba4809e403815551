//! `moor set` - replace the records from a JSON file.
//!
//! The write is conditioned on the version observed by a fresh read unless
//! `--expect-version` pins an explicit token. A conflict is reported as
//! such so the operator can re-run against the fresh state; the command
//! never retries on its own.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::store::StoreError;

/// Execute the set command.
pub fn set(file: &Path, expect_version: Option<&str>) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let records: Vec<Value> = serde_json::from_str(&text)
        .with_context(|| format!("{} does not contain a JSON array of records", file.display()))?;

    let config = RegistryConfig::from_env()?;
    let registry = super::build_registry(config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let expected = match expect_version {
            Some(token) => Some(token.to_string()),
            None => registry.read().await?.version,
        };

        match registry.write(&records, expected.as_deref()).await {
            Ok(version) => {
                println!("committed {} records at version {}", records.len(), version);
                Ok(())
            }
            Err(StoreError::VersionConflict { .. }) => {
                bail!("the registry changed since it was read; re-run to retry against the fresh state")
            }
            Err(err) => Err(err.into()),
        }
    })
}
