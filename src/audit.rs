//! Main audit orchestration logic

use crate::config::AuditConfig;
use crate::detect;
use crate::error::Result;
use crate::lockfile;
use crate::manifest;
use crate::types::{AuditReport, FlatRow};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Audit a project's vendored dependencies and assemble the manifest.
///
/// Runs the full pipeline short of the download stage: lock-file read,
/// per-dependency license detection, archive URL synthesis, and manifest
/// assembly, single-threaded and in lock-file order. Only a lock-file read
/// or parse failure is an error; everything else degrades per dependency.
pub fn audit_project(root: &Path, config: &AuditConfig) -> Result<AuditReport> {
    info!("Starting audit of project at: {}", root.display());

    let format = match config.lock_format {
        Some(format) => format,
        None => lockfile::detect_format(root)?,
    };
    let mut records = lockfile::load_lock_file(root, format)?;

    info!(
        "Found {} dependencies in {}",
        records.len(),
        format.file_name()
    );

    let missing = detect::detect_licenses(root, &mut records, &config.overrides);

    let mut entries = BTreeMap::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in &records {
        let (version, fell_back) = record.resolved_version();
        if fell_back {
            warn!("{} is missing a version and a revision", record.import_path);
        }

        // Identifier collisions are last write wins.
        let (key, entry) = manifest::build_entry(record, &version);
        entries.insert(key, entry);

        rows.push(FlatRow {
            name: record.import_path.clone(),
            version,
            license: record.license.clone().unwrap_or_default(),
        });
    }

    info!(
        "Audit complete: {} entries, {} missing licenses",
        entries.len(),
        missing.len()
    );

    Ok(AuditReport {
        format,
        entries,
        rows,
        missing,
    })
}
