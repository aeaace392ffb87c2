//! pypack Core Library
//!
//! This library provides the pieces behind the `pypack` CLI: cloning a
//! Python project into a safe working copy, discovering its external
//! dependencies by static import scanning, generating missing
//! `requirements.txt` / `README.md` files, removing junk artifacts, and
//! archiving the result into a zip for distribution.
//!
//! # Example
//!
//! ```no_run
//! use pypack_core::{DependencyScanner, StdlibRegistry};
//!
//! let scanner = DependencyScanner::new("/path/to/project", StdlibRegistry::python());
//! for dep in scanner.discover_dependencies().unwrap() {
//!     println!("{}", dep);
//! }
//! ```

pub mod clean;
pub mod clone;
pub mod config;
pub mod inspect;
pub mod models;
pub mod package;
pub mod parsers;
pub mod scanner;
pub mod stdlib;

// Re-exports for convenience
pub use clean::ProjectCleaner;
pub use clone::{clone_project, CloneError};
pub use config::{ConfigError, JunkFilter};
pub use inspect::{ProjectInspector, WriteOutcome};
pub use models::*;
pub use package::{create_archive, PackageError};
pub use scanner::{DependencyScanner, ScanError};
pub use stdlib::StdlibRegistry;
