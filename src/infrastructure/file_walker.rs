//! Source file discovery.
//!
//! Lists the files under a root that detectors should look at, as
//! `/`-separated paths relative to the root in lexicographic order. Quest
//! ids and quest numbers are derived from this order, so it must not
//! depend on directory iteration order.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};

/// Dependency, build, VCS, and cache directories that are never scanned
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    ".git",
    "coverage",
    "__tests__",
    ".next",
    ".nuxt",
];

/// Recursively list files under `root` whose extension is in `extensions`.
///
/// Hidden directories, [`EXCLUDED_DIRS`], and `extra_excluded_dirs` are
/// skipped, as are test and type declaration files. A subdirectory
/// that cannot be read is skipped; an unreadable root is an error.
pub async fn walk_files(
    root: &Path,
    extensions: &[&str],
    extra_excluded_dirs: &[String],
) -> DomainResult<Vec<String>> {
    let mut results = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if dir == root => {
                return Err(DomainError::UnreadableDirectory {
                    path: root.display().to_string(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "stopped reading directory");
                    break;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let Ok(file_type) = entry.file_type().await else {
                continue;
            };

            if file_type.is_dir() {
                if !is_excluded_dir(&name, extra_excluded_dirs) {
                    pending.push(entry.path());
                }
            } else if file_type.is_file()
                && has_extension(&name, extensions)
                && !is_excluded_file(&name)
            {
                if let Some(relative) = relative_path(root, &entry.path()) {
                    results.push(relative);
                }
            }
        }
    }

    results.sort();
    debug!(root = %root.display(), files = results.len(), "walked source tree");
    Ok(results)
}

fn is_excluded_dir(name: &str, extra: &[String]) -> bool {
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name) || extra.iter().any(|d| d == name)
}

/// Test and type declaration files are never scanned.
pub fn is_excluded_file(name: &str) -> bool {
    name.contains(".test.") || name.contains(".spec.") || name.ends_with(".d.ts")
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std_fs::create_dir_all(path.parent().unwrap()).unwrap();
        std_fs::write(path, "").unwrap();
    }

    #[tokio::test]
    async fn test_walk_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/zeta.ts");
        touch(root, "src/alpha.js");
        touch(root, "src/nested/beta.ts");
        touch(root, "src/readme.md");
        touch(root, "src/alpha.test.ts");
        touch(root, "src/alpha.spec.js");
        touch(root, "src/types.d.ts");
        touch(root, "index.ts");

        let files = walk_files(root, &[".ts", ".js"], &[]).await.unwrap();

        assert_eq!(
            files,
            vec!["index.ts", "src/alpha.js", "src/nested/beta.ts", "src/zeta.ts"]
        );
    }

    #[tokio::test]
    async fn test_walk_skips_excluded_and_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "node_modules/lib/index.js");
        touch(root, "dist/bundle.js");
        touch(root, "src/__tests__/helper.ts");
        touch(root, ".cache/tmp.ts");
        touch(root, "vendor/lib.ts");
        touch(root, "src/main.ts");

        let files = walk_files(root, &[".ts", ".js"], &["vendor".to_string()])
            .await
            .unwrap();

        assert_eq!(files, vec!["src/main.ts"]);
    }

    #[tokio::test]
    async fn test_walk_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = walk_files(&missing, &[".ts"], &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::UnreadableDirectory { .. }));
    }

    #[test]
    fn test_extension_matching() {
        assert!(has_extension("a.tsx", &[".tsx"]));
        assert!(!has_extension("a.tsx", &[".ts"]));
        assert!(!has_extension("Makefile", &[".ts"]));
    }
}
