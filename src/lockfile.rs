//! Lock-file readers for dep (`Gopkg.lock`) and glide (`glide.lock`)

use crate::error::{AuditError, Result};
use crate::types::{DependencyRecord, LockFormat};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// `Gopkg.lock`: TOML with a top-level `projects` array.
#[derive(Debug, Deserialize)]
struct DepLock {
    #[serde(default)]
    projects: Vec<DependencyRecord>,
}

/// `glide.lock`: YAML with a top-level `imports` array.
#[derive(Debug, Deserialize)]
struct GlideLock {
    #[serde(default)]
    imports: Vec<DependencyRecord>,
}

/// Probe the project root for a supported lock file, Gopkg.lock first.
pub fn detect_format(root: &Path) -> Result<LockFormat> {
    for format in [LockFormat::Dep, LockFormat::Glide] {
        if root.join(format.file_name()).is_file() {
            debug!("Detected {} lock file", format);
            return Ok(format);
        }
    }
    Err(AuditError::LockFileNotFound(root.display().to_string()))
}

/// Read and deserialize the lock file into an ordered dependency list.
///
/// Any read or parse failure is fatal for the run: the caller exits non-zero
/// rather than attempting partial recovery.
pub fn load_lock_file(root: &Path, format: LockFormat) -> Result<Vec<DependencyRecord>> {
    let path = root.join(format.file_name());
    let content =
        std::fs::read_to_string(&path).map_err(|source| AuditError::LockFileRead {
            path: path.display().to_string(),
            source,
        })?;

    let records = match format {
        LockFormat::Dep => {
            let lock: DepLock = toml::from_str(&content)?;
            lock.projects
        }
        LockFormat::Glide => {
            let lock: GlideLock = serde_yaml::from_str(&content)?;
            lock.imports
        }
    };

    debug!("Parsed {} dependencies from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOPKG_LOCK: &str = r#"
[[projects]]
  name = "github.com/foo/bar"
  version = "1.2.0"
  revision = "deadbeef"

[[projects]]
  name = "golang.org/x/crypto"
  revision = "c10c31b5e94b"

[solve-meta]
  analyzer-name = "dep"
  solver-version = 1
"#;

    const GLIDE_LOCK: &str = r#"
hash: 0123456789abcdef
imports:
- name: github.com/howeyc/gopass
  version: v0.1
- name: github.com/foo/bar
  version: "1.2.0"
"#;

    #[test]
    fn test_parse_gopkg_lock() {
        let lock: DepLock = toml::from_str(GOPKG_LOCK).unwrap();
        assert_eq!(lock.projects.len(), 2);
        assert_eq!(lock.projects[0].import_path, "github.com/foo/bar");
        assert_eq!(lock.projects[0].version.as_deref(), Some("1.2.0"));
        assert_eq!(lock.projects[1].version, None);
        assert_eq!(lock.projects[1].revision.as_deref(), Some("c10c31b5e94b"));
    }

    #[test]
    fn test_parse_glide_lock() {
        let lock: GlideLock = serde_yaml::from_str(GLIDE_LOCK).unwrap();
        assert_eq!(lock.imports.len(), 2);
        assert_eq!(lock.imports[0].import_path, "github.com/howeyc/gopass");
        assert_eq!(lock.imports[0].version.as_deref(), Some("v0.1"));
        assert_eq!(lock.imports[0].revision, None);
    }

    #[test]
    fn test_load_missing_lock_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_lock_file(dir.path(), LockFormat::Dep).unwrap_err();
        assert!(matches!(err, AuditError::LockFileRead { .. }));
    }

    #[test]
    fn test_load_malformed_lock_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Gopkg.lock"), "projects = \"oops").unwrap();
        let err = load_lock_file(dir.path(), LockFormat::Dep).unwrap_err();
        assert!(matches!(err, AuditError::TomlError(_)));
    }

    #[test]
    fn test_detect_format_prefers_dep() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Gopkg.lock"), "").unwrap();
        std::fs::write(dir.path().join("glide.lock"), "").unwrap();
        assert_eq!(detect_format(dir.path()).unwrap(), LockFormat::Dep);
    }

    #[test]
    fn test_detect_format_none_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            detect_format(dir.path()),
            Err(AuditError::LockFileNotFound(_))
        ));
    }
}
