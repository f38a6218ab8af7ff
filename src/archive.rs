//! Source-archive URL synthesis per hosting convention
//!
//! Lock files record only an import path and a version; no format embeds a
//! download URL. This module guesses one from a priority-ordered table of
//! hosting-specific rules, first prefix match wins. The table is a
//! heuristic, not a resolver: a wrong guess produces a URL that 404s at
//! download time, nothing verifies it up front. In particular the default
//! rule assumes a GitHub-compatible path layout for unrecognized hosts.

use serde::{Deserialize, Serialize};

/// Staging directory archive destinations are placed under.
pub const STAGING_DIR: &str = "osstp-pkg-tmp";

const CODELOAD: &str = "https://codeload.github.com";

/// A synthesized download plan: where to fetch and where to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePlan {
    /// Best-guess tarball URL
    pub url: String,
    /// Destination path under the staging directory
    pub distribution: String,
}

/// How a matched rule derives owner/repo from the import path.
#[derive(Debug, Clone, Copy)]
enum RuleAction {
    /// `<host>/<owner>/<repo>/...`: owner and repo taken from the path
    OwnerRepoFromPath,
    /// Everything under the prefix maps to one fixed GitHub mirror
    FixedMirror {
        owner: &'static str,
        repo: &'static str,
    },
    /// `gopkg.in/pkg.vN` and `gopkg.in/user/pkg.vN` sub-forms
    GopkgIn,
    /// Mirror org + first path segment, e.g. `k8s.io/<repo>`
    MirrorFirstSegment { owner: &'static str },
    /// Mirror org + second path segment, e.g. `golang.org/x/<repo>`
    MirrorSecondSegment { owner: &'static str },
}

struct HostingRule {
    prefix: &'static str,
    action: RuleAction,
}

/// Priority-ordered: first rule whose prefix matches the import path wins,
/// everything else falls through to the default codeload guess.
const HOSTING_RULES: &[HostingRule] = &[
    HostingRule {
        prefix: "github.com",
        action: RuleAction::OwnerRepoFromPath,
    },
    HostingRule {
        prefix: "cloud.google.com/go",
        action: RuleAction::FixedMirror {
            owner: "GoogleCloudPlatform",
            repo: "google-cloud-go",
        },
    },
    HostingRule {
        prefix: "google.golang.org/api",
        action: RuleAction::FixedMirror {
            owner: "google",
            repo: "google-api-go-client",
        },
    },
    HostingRule {
        prefix: "google.golang.org/grpc",
        action: RuleAction::FixedMirror {
            owner: "grpc",
            repo: "grpc-go",
        },
    },
    HostingRule {
        prefix: "google.golang.org/appengine",
        action: RuleAction::FixedMirror {
            owner: "golang",
            repo: "appengine",
        },
    },
    HostingRule {
        prefix: "camlistore.org",
        action: RuleAction::FixedMirror {
            owner: "camlistore",
            repo: "camlistore",
        },
    },
    HostingRule {
        prefix: "go4.org",
        action: RuleAction::FixedMirror {
            owner: "camlistore",
            repo: "go4",
        },
    },
    HostingRule {
        prefix: "gopkg.in",
        action: RuleAction::GopkgIn,
    },
    HostingRule {
        prefix: "k8s.io",
        action: RuleAction::MirrorFirstSegment {
            owner: "kubernetes",
        },
    },
    HostingRule {
        prefix: "golang.org",
        action: RuleAction::MirrorSecondSegment { owner: "golang" },
    },
];

/// Synthesize the archive URL and destination for one dependency.
///
/// Pure function of `(import_path, version)`: identical inputs always yield
/// identical plans. A path that matches a rule's prefix but is too short for
/// the segments the rule needs falls through to the default rule instead.
pub fn synthesize(import_path: &str, version: &str) -> ArchivePlan {
    let rest = path_rest(import_path);

    for rule in HOSTING_RULES {
        if import_path.starts_with(rule.prefix) {
            if let Some(plan) = rule.action.build(rest, version) {
                return plan;
            }
            break;
        }
    }

    default_plan(import_path, version)
}

impl RuleAction {
    fn build(self, rest: &str, version: &str) -> Option<ArchivePlan> {
        match self {
            Self::OwnerRepoFromPath => {
                let mut segments = rest.split('/');
                let owner = non_empty(segments.next()?)?;
                let repo = non_empty(segments.next()?)?;
                Some(plan(owner, repo, repo, version))
            }
            Self::FixedMirror { owner, repo } => Some(plan(owner, repo, repo, version)),
            Self::GopkgIn => {
                // Strip the .vN version suffix before reading segments.
                let base = rest.split('.').next()?;
                if base.contains('/') {
                    // gopkg.in/user/pkg.vN: owner and repo taken literally
                    let mut segments = base.split('/');
                    let owner = non_empty(segments.next()?)?;
                    let repo = non_empty(segments.next()?)?;
                    Some(plan(owner, repo, repo, version))
                } else {
                    // gopkg.in/pkg.vN: owner inferred as go-<pkg>
                    let pkg = non_empty(base)?;
                    Some(plan(&format!("go-{}", pkg), pkg, pkg, version))
                }
            }
            Self::MirrorFirstSegment { owner } => {
                let repo = non_empty(rest.split('/').next()?)?;
                Some(plan(owner, repo, repo, version))
            }
            Self::MirrorSecondSegment { owner } => {
                let repo = non_empty(rest.split('/').nth(1)?)?;
                Some(plan(owner, repo, repo, version))
            }
        }
    }
}

/// Default rule: assume the path after the host is a GitHub owner/repo.
/// Frequently wrong for non-GitHub hosts; accepted limitation.
fn default_plan(import_path: &str, version: &str) -> ArchivePlan {
    let rest = match path_rest(import_path) {
        "" => import_path,
        rest => rest,
    };
    let file = rest.rsplit('/').next().unwrap_or(rest);
    ArchivePlan {
        url: format!("{}/{}/tar.gz/{}", CODELOAD, rest, version),
        distribution: format!("{}/{}-{}.tar.gz", STAGING_DIR, file, version),
    }
}

fn plan(owner: &str, repo: &str, file: &str, version: &str) -> ArchivePlan {
    ArchivePlan {
        url: format!("{}/{}/{}/tar.gz/{}", CODELOAD, owner, repo, version),
        distribution: format!("{}/{}-{}.tar.gz", STAGING_DIR, file, version),
    }
}

/// The import path after its first `/` (empty for host-only paths).
pub fn path_rest(import_path: &str) -> &str {
    import_path
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or("")
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
