//! License detection over vendored dependency trees
//!
//! For each dependency the detector probes `<root>/vendor/<import_path>`:
//! a missing (or non-directory) path is skipped silently, a present tree is
//! scanned for recognizable license files. Detection failure falls back to
//! the override table; only a vendored tree with no detectable license and
//! no override lands on the missing list. "We don't vendor it" and "we
//! vendor it but can't tell the license" are deliberately distinct outcomes.

use crate::config::VENDOR_DIR;
use crate::types::DependencyRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// File-name stems recognized as license files (case-insensitive).
const LICENSE_STEMS: &[&str] = &["license", "licence", "copying", "unlicense"];

/// Extensions a license file may carry, besides none at all.
const LICENSE_EXTENSIONS: &[&str] = &["md", "txt", "rst"];

/// Identifying phrases per license, all lower-case, matched against
/// whitespace-normalized text. First entry whose phrases all occur wins.
const SIGNATURES: &[(&str, &[&str])] = &[
    (
        "MIT",
        &["permission is hereby granted, free of charge"],
    ),
    (
        "ISC",
        &["permission to use, copy, modify, and/or distribute this software"],
    ),
    ("Apache-2.0", &["apache license", "version 2.0"]),
    (
        "Unlicense",
        &["this is free and unencumbered software released into the public domain"],
    ),
    (
        "LGPL-3.0",
        &["gnu lesser general public license", "version 3"],
    ),
    (
        "LGPL-2.1",
        &["gnu lesser general public license", "version 2.1"],
    ),
    ("GPL-3.0", &["gnu general public license", "version 3"]),
    ("GPL-2.0", &["gnu general public license", "version 2"]),
    ("MPL-2.0", &["mozilla public license", "2.0"]),
    (
        "BSD-3-Clause",
        &[
            "redistribution and use in source and binary forms",
            "neither the name",
        ],
    ),
    (
        "BSD-2-Clause",
        &["redistribution and use in source and binary forms"],
    ),
    (
        "CDDL-1.0",
        &["common development and distribution license"],
    ),
    ("EPL-1.0", &["eclipse public license"]),
];

/// Manual import-path → license assignments, applied when automatic
/// detection fails. Immutable after construction; injected into the
/// detector rather than living as a global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseOverrides {
    entries: HashMap<String, String>,
}

impl Default for LicenseOverrides {
    /// Known dependencies whose vendored trees lack a detectable license.
    fn default() -> Self {
        let entries = [
            ("github.com/davecgh/go-spew", "ISC"),
            ("github.com/davecgh/go-xdr", "ISC"),
            ("github.com/howeyc/gopass", "ISC"),
            ("github.com/vmware/govmomi", "Apache-2.0"),
            ("github.com/pelletier/go-buffruneio", "MIT"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { entries }
    }
}

impl LicenseOverrides {
    /// An empty table, for tests and callers that supply their own.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add an assignment, consuming and returning self builder-style.
    pub fn with(mut self, import_path: impl Into<String>, license: impl Into<String>) -> Self {
        self.entries.insert(import_path.into(), license.into());
        self
    }

    /// Exact-name lookup.
    pub fn get(&self, import_path: &str) -> Option<&str> {
        self.entries.get(import_path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Detect licenses for every dependency, in input order, mutating each
/// record in place. Returns the import paths left without a license.
pub fn detect_licenses(
    root: &Path,
    records: &mut [DependencyRecord],
    overrides: &LicenseOverrides,
) -> Vec<String> {
    let mut missing = Vec::new();

    for record in records.iter_mut() {
        let dir = root.join(VENDOR_DIR).join(&record.import_path);
        if !dir.is_dir() {
            // Not vendored: skipped, not counted as missing.
            debug!("No vendor directory for {}, skipping", record.import_path);
            continue;
        }

        match detect_in_dir(&dir) {
            Some(license) => {
                debug!("Detected {} for {}", license, record.import_path);
                record.license = Some(license);
            }
            None => match overrides.get(&record.import_path) {
                Some(license) => {
                    debug!("Override {} for {}", license, record.import_path);
                    record.license = Some(canonical_id(license));
                }
                None => missing.push(record.import_path.clone()),
            },
        }
    }

    missing
}

/// Scan a directory for license files and classify the first readable one.
pub fn detect_in_dir(dir: &Path) -> Option<String> {
    let mut candidates: Vec<_> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| is_license_file_name(name))
        .collect();
    candidates.sort();

    for name in candidates {
        let Ok(text) = std::fs::read_to_string(dir.join(&name)) else {
            continue;
        };
        if let Some(license) = classify_text(&text) {
            return Some(license);
        }
    }
    None
}

/// Whether a file name looks like a license file.
fn is_license_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    let (stem, ext) = match lower.split_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (lower.as_str(), None),
    };

    LICENSE_STEMS.contains(&stem)
        && ext.map_or(true, |e| LICENSE_EXTENSIONS.contains(&e))
}

/// Classify license text against the signature table.
pub fn classify_text(text: &str) -> Option<String> {
    let normalized = normalize(text);

    SIGNATURES
        .iter()
        .find(|(_, phrases)| phrases.iter().all(|p| normalized.contains(p)))
        .map(|(id, _)| canonical_id(id))
}

/// Lower-case and collapse all whitespace runs to single spaces, so wrapped
/// license texts match single-line signature phrases.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pass an identifier through the SPDX list when it parses as a known id.
fn canonical_id(id: &str) -> String {
    spdx::license_id(id)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| id.to_string())
}
