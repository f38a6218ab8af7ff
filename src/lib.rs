//! # vendor_license_audit
//!
//! A tool for auditing vendored third-party dependencies, providing:
//! - **Lock-file parsing**: dep (`Gopkg.lock`) and glide (`glide.lock`)
//! - **License detection**: scan each dependency's vendored source tree,
//!   with a manual override table for trees whose license is undetectable
//! - **Archive synthesis**: a best-guess source-tarball URL per hosting
//!   convention, for compliance review distribution
//! - **Manifest generation**: a YAML mapping (or flat CSV rows) suitable
//!   for open-source compliance tooling, plus optional archive download
//!
//! ## Quick Start
//!
//! ```no_run
//! use vendor_license_audit::{audit_project, manifest, AuditConfig};
//! use std::path::Path;
//!
//! # fn main() -> vendor_license_audit::Result<()> {
//! let config = AuditConfig::default();
//! let report = audit_project(Path::new("."), &config)?;
//!
//! println!("{}", manifest::to_yaml(&report.entries)?);
//! for name in &report.missing {
//!     eprintln!(" -> {}", name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline is strictly sequential: dependencies are processed in
//! lock-file order, and the optional download stage fetches one archive at
//! a time. Missing licenses and failed downloads are reported, never fatal;
//! only an unreadable or unparsable lock file aborts a run.

mod audit;
mod config;
mod error;
mod lockfile;
mod types;

pub mod archive;
pub mod detect;
pub mod download;
pub mod manifest;

// Re-export public API
pub use audit::audit_project;
pub use config::{AuditConfig, NetworkConfig, VENDOR_DIR};
pub use detect::LicenseOverrides;
pub use error::{AuditError, Result};
pub use lockfile::{detect_format, load_lock_file};
pub use types::{AuditReport, DependencyRecord, FlatRow, LockFormat, ManifestEntry};
