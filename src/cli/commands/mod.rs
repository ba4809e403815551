//! cli::commands
//!
//! Command handlers. Handlers are synchronous at the boundary and run their
//! network calls on a dedicated runtime.

mod get;
mod set;

pub use get::get;
pub use set::set;

use crate::cli::args::Command;
use crate::config::RegistryConfig;
use crate::registry::VesselRegistry;
use crate::store::github::GitHubContentStore;
use anyhow::Result;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Get { records_only } => get(records_only),
        Command::Set {
            file,
            expect_version,
        } => set(&file, expect_version.as_deref()),
    }
}

/// Build a registry from validated configuration.
pub(crate) fn build_registry(config: RegistryConfig) -> VesselRegistry<GitHubContentStore> {
    let RegistryConfig {
        token,
        address,
        committer,
    } = config;
    let store = GitHubContentStore::new(token);
    let registry = VesselRegistry::new(store, address);
    match committer {
        Some(committer) => registry.with_committer(committer),
        None => registry,
    }
}
