//! Core data types for lock-file records and the compliance manifest

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported lock-file formats.
///
/// The tool handles two manifest shapes: dep's `Gopkg.lock` (TOML, a
/// `projects` list with revisions) and glide's `glide.lock` (YAML, an
/// `imports` list without revisions). The output shape follows the format:
/// dep produces the structured manifest mapping, glide produces flat rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockFormat {
    /// dep: `Gopkg.lock`
    Dep,
    /// glide: `glide.lock`
    Glide,
}

impl LockFormat {
    /// File name this format is read from.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Dep => "Gopkg.lock",
            Self::Glide => "glide.lock",
        }
    }
}

impl std::fmt::Display for LockFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dep => write!(f, "dep"),
            Self::Glide => write!(f, "glide"),
        }
    }
}

impl std::str::FromStr for LockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dep" | "gopkg" => Ok(Self::Dep),
            "glide" => Ok(Self::Glide),
            _ => Err(format!("Unknown lock format: {}", s)),
        }
    }
}

/// A dependency declared in the lock file.
///
/// `license` starts unset and is filled in by the detector; everything else
/// comes straight from deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Import path, e.g. `github.com/foo/bar`
    #[serde(rename = "name")]
    pub import_path: String,
    /// Pinned version (tag), if any
    #[serde(default)]
    pub version: Option<String>,
    /// Pinned revision (commit), if any; glide.lock never carries one
    #[serde(default)]
    pub revision: Option<String>,
    /// Detected or overridden license identifier
    #[serde(skip)]
    pub license: Option<String>,
}

impl DependencyRecord {
    /// Resolve the version to record in the manifest: the pinned version,
    /// else the pinned revision, else the literal `"master"`.
    ///
    /// The boolean is true when the `"master"` fallback was taken, which is
    /// the caller's cue to warn; the method itself stays pure.
    pub fn resolved_version(&self) -> (String, bool) {
        if let Some(v) = self.version.as_deref().filter(|v| !v.is_empty()) {
            return (v.to_string(), false);
        }
        if let Some(r) = self.revision.as_deref().filter(|r| !r.is_empty()) {
            return (r.to_string(), false);
        }
        ("master".to_string(), true)
    }
}

/// One manifest entry per dependency, serialized with the field names the
/// downstream compliance tooling expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Canonical package name (lower-cased, separators replaced)
    pub name: String,
    /// License identifier; empty string when undetected
    #[serde(default)]
    pub license: String,
    /// Constant repository label
    pub repository: String,
    /// Synthesized source-archive URL
    pub url: String,
    /// Local destination path for the archive
    #[serde(rename = "other-distribution")]
    pub other_distribution: String,
    /// Reference URL built from the raw import path
    #[serde(rename = "other-url")]
    pub other_url: String,
    /// Resolved version
    pub version: String,
}

/// One flat-variant output row, in lock-file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub name: String,
    pub version: String,
    pub license: String,
}

/// Result of a full audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Which lock format was read
    pub format: LockFormat,
    /// Structured manifest, keyed by `other:<name>:<version>`
    pub entries: BTreeMap<String, ManifestEntry>,
    /// Flat rows, one per dependency in input order
    pub rows: Vec<FlatRow>,
    /// Import paths with a vendor directory but no detectable license
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_version_prefers_version() {
        let rec = DependencyRecord {
            import_path: "github.com/foo/bar".into(),
            version: Some("v1.2.0".into()),
            revision: Some("abcdef".into()),
            license: None,
        };
        assert_eq!(rec.resolved_version(), ("v1.2.0".to_string(), false));
    }

    #[test]
    fn test_resolved_version_falls_back_to_revision() {
        let rec = DependencyRecord {
            import_path: "github.com/foo/bar".into(),
            version: None,
            revision: Some("abcdef".into()),
            license: None,
        };
        assert_eq!(rec.resolved_version(), ("abcdef".to_string(), false));
    }

    #[test]
    fn test_resolved_version_defaults_to_master() {
        let rec = DependencyRecord {
            import_path: "github.com/foo/bar".into(),
            version: Some(String::new()),
            revision: None,
            license: None,
        };
        assert_eq!(rec.resolved_version(), ("master".to_string(), true));
    }

    #[test]
    fn test_lock_format_from_str() {
        assert_eq!("dep".parse::<LockFormat>().unwrap(), LockFormat::Dep);
        assert_eq!("glide".parse::<LockFormat>().unwrap(), LockFormat::Glide);
        assert!("npm".parse::<LockFormat>().is_err());
    }
}
