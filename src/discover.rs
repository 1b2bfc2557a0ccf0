//! Document discovery under a root directory.
//!
//! Walks the tree with `walkdir` and keeps files whose name ends with the
//! configured extension (case-sensitive). Symlinks to files are kept even when
//! symlinked directories are not followed. Paths come back in walk order,
//! which depends on the filesystem, unless `scan.sort` is set.
//!
//! Only a missing or unreadable root is an error. Anything below it that
//! cannot be read is logged and skipped.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::HarvestError;

pub fn list_documents(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>, HarvestError> {
    let extension = scan.extension();
    let exclude_set = build_globset(&scan.exclude_globs)?;

    let mut paths = Vec::new();

    let walker = WalkDir::new(root).follow_links(scan.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(HarvestError::Walk {
                    root: root.to_path_buf(),
                    source,
                })
            }
            Err(e) => {
                tracing::warn!(
                    path = %e.path().unwrap_or(root).display(),
                    error = %e,
                    "Skipping unreadable entry"
                );
                continue;
            }
        };
        if !is_file(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(extension) {
            continue;
        }

        let path = entry.path();
        if !exclude_set.is_empty() {
            let relative = path.strip_prefix(root).unwrap_or(path);
            if exclude_set.is_match(relative) {
                continue;
            }
        }

        paths.push(path.to_path_buf());
    }

    if scan.sort {
        paths.sort();
    }

    Ok(paths)
}

fn is_file(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}
