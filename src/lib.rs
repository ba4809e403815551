//! Moorage - a vessel registry stored in a GitHub repository
//!
//! Moorage persists a single JSON document (an ordered list of vessel
//! records) as one file in a GitHub repository, and keeps concurrent writers
//! from silently clobbering each other by conditioning every write on the
//! file's current blob SHA. The remote compare-and-swap is the only
//! concurrency control; the crate holds no state between calls.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the registry)
//! - [`registry`] - Read and conditional-write operations over the document
//! - [`document`] - Encoding contract: records to pretty JSON to base64 blob
//! - [`store`] - Abstraction over the remote content store (GitHub v1)
//! - [`config`] - Environment-sourced process configuration
//!
//! # Correctness Invariants
//!
//! 1. A write is accepted only if its version token matches the stored SHA
//! 2. A missing remote file reads as the empty document, never as an error
//! 3. Create-writes omit the version field from the wire entirely
//! 4. Conflict signals are never conflated with generic failures

pub mod cli;
pub mod config;
pub mod document;
pub mod registry;
pub mod store;
