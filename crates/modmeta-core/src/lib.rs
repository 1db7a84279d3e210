//! Core library for modmeta.
//!
//! Turns a [`ProjectDescriptor`] into a module metadata document: two fixed
//! variants (`apiElements`, `runtimeElements`), each with its filtered
//! dependency list, the produced artifact and its checksums, and the
//! declared capabilities.
//!
//! ```no_run
//! use modmeta_core::{GenerateOptions, generate};
//! use modmeta_schema::ProjectDescriptor;
//!
//! let descriptor = ProjectDescriptor::new("org.example", "lib", "1.0", "target/lib-1.0.jar");
//! if let Some(bytes) = generate(&descriptor, &GenerateOptions::default())? {
//!     std::fs::write("module.json", bytes)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod checksum;
pub mod descriptor;
pub mod generator;
pub mod marker;
pub mod output;
pub mod variant;

pub use checksum::{ChecksumError, Checksums};
pub use generator::{Creator, GenerateError, GenerateOptions, generate};
pub use variant::Variant;
