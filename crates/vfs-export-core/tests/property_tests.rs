//! Property-based tests for project traversal.
//!
//! These tests generate arbitrary project trees and verify the exclusion and
//! ordering invariants of the walker hold for all of them.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use std::collections::BTreeSet;
use tokio::runtime::Runtime;
use vfs_export_core::ExportConfig;
use vfs_export_core::VirtualPath;
use vfs_export_core::creation::collect_files;
use vfs_export_core::creation::filters;
use vfs_export_core::fs::FileSystem;
use vfs_export_core::fs::MemoryFileSystem;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build runtime")
}

fn dir_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-c]{1,2}",
        1 => Just("node_modules".to_string()),
        1 => Just(".git".to_string()),
        1 => Just("dist".to_string()),
        1 => Just(".cache".to_string()),
    ]
}

fn file_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "f[0-9]\\.txt",
        1 => Just(".env".to_string()),
    ]
}

fn file_path() -> impl Strategy<Value = String> {
    (prop::collection::vec(dir_name(), 0..4), file_name()).prop_map(|(dirs, file)| {
        let mut path = String::from("/");
        for dir in dirs {
            path.push_str(&dir);
            path.push('/');
        }
        path.push_str(&file);
        path
    })
}

fn build_fs(paths: &[String]) -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new();
    for path in paths {
        fs.insert_file(path, path.as_bytes()).unwrap();
    }
    fs
}

/// Recursive reference flattening: expand each kept directory in place.
fn reference_walk(
    rt: &Runtime,
    fs: &MemoryFileSystem,
    config: &ExportConfig,
    dir: &VirtualPath,
    out: &mut Vec<String>,
) {
    for entry in rt.block_on(fs.read_dir(dir)).unwrap() {
        if filters::should_skip(&entry.name, config) {
            continue;
        }
        let child = entry.resolve(dir).unwrap();
        if child.is_dir() {
            reference_walk(rt, fs, config, &child, out);
        } else {
            out.push(child.to_string());
        }
    }
}

fn is_kept(path: &str, config: &ExportConfig) -> bool {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .all(|segment| !filters::should_skip(segment, config))
}

proptest! {
    /// No emitted path has an excluded or hidden component.
    #[test]
    fn prop_excluded_names_never_emitted(paths in prop::collection::vec(file_path(), 0..30)) {
        let fs = build_fs(&paths);
        let config = ExportConfig::default();
        let files = runtime().block_on(collect_files(&fs, &config)).unwrap();

        for file in &files {
            prop_assert!(is_kept(file.as_str(), &config), "excluded path emitted: {}", file);
        }
    }

    /// Every file outside excluded subtrees is emitted exactly once.
    #[test]
    fn prop_kept_files_all_emitted(paths in prop::collection::vec(file_path(), 0..30)) {
        let fs = build_fs(&paths);
        let config = ExportConfig::default();
        let files = runtime().block_on(collect_files(&fs, &config)).unwrap();

        let emitted: Vec<String> = files.iter().map(ToString::to_string).collect();
        let unique: BTreeSet<&String> = emitted.iter().collect();
        prop_assert_eq!(unique.len(), emitted.len());

        let expected: BTreeSet<&String> = paths.iter().filter(|p| is_kept(p, &config)).collect();
        prop_assert_eq!(unique, expected);
    }

    /// The iterative walk matches a recursive depth-first flattening.
    #[test]
    fn prop_order_matches_recursive_reference(
        paths in prop::collection::vec(file_path(), 0..30),
        include_hidden in any::<bool>(),
    ) {
        let fs = build_fs(&paths);
        let config = ExportConfig::default().with_include_hidden(include_hidden);
        let rt = runtime();

        let files = rt.block_on(collect_files(&fs, &config)).unwrap();
        let emitted: Vec<String> = files.iter().map(ToString::to_string).collect();

        let mut expected = Vec::new();
        reference_walk(&rt, &fs, &config, &VirtualPath::root(), &mut expected);
        prop_assert_eq!(emitted, expected);
    }

    /// Exact-name patterns never match longer names.
    #[test]
    fn prop_exact_pattern_requires_equality(name in "[a-z_]{1,12}") {
        let config = ExportConfig::default();
        let skipped = filters::should_skip(&name, &config);
        let expected = ["node_modules", "dist"].contains(&name.as_str());
        prop_assert_eq!(skipped, expected);
    }
}
