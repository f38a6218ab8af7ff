//! Manifest assembly and serialization
//!
//! The structured variant emits a YAML mapping keyed by
//! `other:<canonical_name>:<version>`; the flat variant emits one
//! `name,version,license` row per dependency in lock-file order.

use crate::archive;
use crate::error::Result;
use crate::types::{DependencyRecord, FlatRow, ManifestEntry};
use std::collections::BTreeMap;

/// Repository label recorded for every entry.
pub const REPOSITORY_LABEL: &str = "Other";

/// Canonical package name: the import path after its first `/`, with `/`
/// and `.` replaced by underscores, lower-cased. Idempotent and
/// deterministic by construction.
pub fn canonical_name(import_path: &str) -> String {
    let rest = match archive::path_rest(import_path) {
        "" => import_path,
        rest => rest,
    };
    rest.replace(['/', '.'], "_").to_lowercase()
}

/// Package identifier used as the manifest mapping key.
pub fn package_key(canonical_name: &str, version: &str) -> String {
    format!("other:{}:{}", canonical_name, version)
}

/// Build the manifest entry for one dependency at its resolved version.
pub fn build_entry(record: &DependencyRecord, version: &str) -> (String, ManifestEntry) {
    let name = canonical_name(&record.import_path);
    let plan = archive::synthesize(&record.import_path, version);

    let entry = ManifestEntry {
        name: name.clone(),
        license: record.license.clone().unwrap_or_default(),
        repository: REPOSITORY_LABEL.to_string(),
        url: plan.url,
        other_distribution: plan.distribution,
        other_url: format!("http://{}", record.import_path),
        version: version.to_string(),
    };

    (package_key(&name, version), entry)
}

/// Serialize the structured manifest mapping as YAML.
pub fn to_yaml(entries: &BTreeMap<String, ManifestEntry>) -> Result<String> {
    Ok(serde_yaml::to_string(entries)?)
}

/// Serialize the structured manifest mapping as pretty JSON.
pub fn to_json(entries: &BTreeMap<String, ManifestEntry>) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Render flat-variant rows, one `name,version,license` line each.
pub fn to_flat(rows: &[FlatRow]) -> String {
    rows.iter()
        .map(|row| format!("{},{},{}", row.name, row.version, row.license))
        .collect::<Vec<_>>()
        .join("\n")
}
