//! Shared types for modmeta.
//!
//! This crate holds the input model (the project descriptor handed over by
//! the host build), the digest types produced by the checksum engine, and
//! the serde model of the module metadata document itself. It performs no
//! I/O.

pub mod document;
pub mod hash;
pub mod types;

// Re-exports
pub use document::ModuleDocument;
pub use hash::*;
pub use types::*;
