//! Selection of the headers a run processes

use headergen_core::ManagerSettings;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files to process: the explicit allow-list plus every file found under the
/// scanned directories, restricted to supported extensions.
///
/// Ignored files are always excluded. Ignored directories are never
/// descended into, but do not exclude files listed explicitly. Paths are
/// canonicalized when possible; the result is sorted and free of duplicates.
pub fn identify_files(settings: &ManagerSettings) -> Vec<PathBuf> {
    let ignored_files: BTreeSet<PathBuf> =
        settings.ignored_files.iter().map(|p| normalize(p)).collect();
    let ignored_directories: Vec<PathBuf> = settings
        .ignored_directories
        .iter()
        .map(|p| normalize(p))
        .collect();
    let is_ignored_directory =
        |path: &Path| ignored_directories.iter().any(|ignored| path.starts_with(ignored));

    let mut files = BTreeSet::new();

    for file in &settings.to_process_files {
        let file = normalize(file);
        if !file.is_file() {
            tracing::warn!(path = %file.display(), "File to process does not exist");
            continue;
        }
        if settings.is_supported_extension(&file) && !ignored_files.contains(&file) {
            files.insert(file);
        }
    }

    for directory in &settings.to_process_directories {
        let directory = normalize(directory);
        if is_ignored_directory(&directory) {
            tracing::debug!(directory = %directory.display(), "Directory to process is ignored");
            continue;
        }

        let walker = WalkDir::new(&directory)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir() && is_ignored_directory(&normalize(entry.path())))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(directory = %directory.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let file = normalize(entry.path());
            if settings.is_supported_extension(&file) && !ignored_files.contains(&file) {
                files.insert(file);
            }
        }
    }

    tracing::debug!(count = files.len(), "Identified files to process");
    files.into_iter().collect()
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "discovery/discovery_tests.rs"]
mod discovery_tests;
