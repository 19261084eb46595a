#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

fn touch(dir: &TempDir, relative: &str) -> PathBuf {
    let path = dir.path().join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "").unwrap();
    path.canonicalize().unwrap()
}

fn scanning(dir: &TempDir) -> ManagerSettings {
    ManagerSettings {
        to_process_directories: vec![dir.path().to_path_buf()],
        ..ManagerSettings::default()
    }
}

#[test]
fn identify_files___directory_scan___recursive_and_filtered_by_extension() {
    let dir = TempDir::new().unwrap();
    let a = touch(&dir, "A.h");
    let nested = touch(&dir, "sub/deep/C.hpp");
    touch(&dir, "notes.txt");
    touch(&dir, "src/A.cpp");

    let files = identify_files(&scanning(&dir));

    assert_eq!(files, vec![a, nested]);
}

#[test]
fn identify_files___file_in_ignored_directory___excluded() {
    let dir = TempDir::new().unwrap();
    let kept = touch(&dir, "A.h");
    touch(&dir, "third_party/B.h");
    touch(&dir, "third_party/inner/C.h");
    let mut settings = scanning(&dir);
    settings.ignored_directories = vec![dir.path().join("third_party")];

    let files = identify_files(&settings);

    assert_eq!(files, vec![kept]);
}

#[test]
fn identify_files___explicit_file_in_ignored_directory___processed() {
    let dir = TempDir::new().unwrap();
    let explicit = touch(&dir, "third_party/B.h");
    touch(&dir, "third_party/C.h");
    let mut settings = scanning(&dir);
    settings.ignored_directories = vec![dir.path().join("third_party")];
    settings.to_process_files = vec![dir.path().join("third_party/B.h")];

    let files = identify_files(&settings);

    assert_eq!(files, vec![explicit]);
}

#[test]
fn identify_files___ignored_file___excluded_even_when_listed() {
    let dir = TempDir::new().unwrap();
    let kept = touch(&dir, "A.h");
    touch(&dir, "B.h");
    let mut settings = scanning(&dir);
    settings.ignored_files = vec![dir.path().join("B.h")];
    settings.to_process_files = vec![dir.path().join("B.h")];

    let files = identify_files(&settings);

    assert_eq!(files, vec![kept]);
}

#[test]
fn identify_files___scan_root_inside_ignored_directory___skipped() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "vendor/lib/A.h");
    let settings = ManagerSettings {
        to_process_directories: vec![dir.path().join("vendor/lib")],
        ignored_directories: vec![dir.path().join("vendor")],
        ..ManagerSettings::default()
    };

    assert!(identify_files(&settings).is_empty());
}

#[test]
fn identify_files___file_listed_and_scanned___reported_once() {
    let dir = TempDir::new().unwrap();
    let a = touch(&dir, "A.h");
    let mut settings = scanning(&dir);
    settings.to_process_files = vec![dir.path().join("A.h")];

    assert_eq!(identify_files(&settings), vec![a]);
}

#[test]
fn identify_files___missing_explicit_file___skipped() {
    let dir = TempDir::new().unwrap();
    let settings = ManagerSettings {
        to_process_files: vec![dir.path().join("Missing.h")],
        ..ManagerSettings::default()
    };

    assert!(identify_files(&settings).is_empty());
}

#[test]
fn identify_files___unsupported_explicit_file___skipped() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "A.inl");
    let settings = ManagerSettings {
        to_process_files: vec![dir.path().join("A.inl")],
        ..ManagerSettings::default()
    };

    assert!(identify_files(&settings).is_empty());
}

#[cfg(unix)]
#[test]
fn identify_files___symlinked_directory___followed() {
    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let linked = touch(&outside, "Linked.h");
    std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

    let files = identify_files(&scanning(&dir));

    assert_eq!(files, vec![linked]);
}
