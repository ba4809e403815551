//! `moor get` - print the current records and version.

use anyhow::Result;

use crate::config::RegistryConfig;

/// Execute the get command.
///
/// Records go to stdout as pretty JSON; the version line goes to stderr so
/// the records stay pipeable.
pub fn get(records_only: bool) -> Result<()> {
    let config = RegistryConfig::from_env()?;
    let registry = super::build_registry(config);

    let rt = tokio::runtime::Runtime::new()?;
    let snapshot = rt.block_on(registry.read())?;

    if let Some(warning) = snapshot.warning {
        eprintln!(
            "warning: stored document is unreadable ({}); showing an empty registry",
            warning
        );
    }
    if !records_only {
        match &snapshot.version {
            Some(version) => eprintln!("version: {}", version),
            None => eprintln!("version: <absent>"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&snapshot.records)?);
    Ok(())
}
