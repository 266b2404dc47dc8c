//! Integration tests for vfs-export-core.
//!
//! These tests run complete exports against an in-memory project tree and
//! check the delivered archive.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use std::fs;
use std::io::Cursor;
use std::io::Read;
use tempfile::TempDir;
use vfs_export_core::ExportConfig;
use vfs_export_core::ExportError;
use vfs_export_core::Exporter;
use vfs_export_core::clock::FixedClock;
use vfs_export_core::delivery::BlobHost;
use vfs_export_core::delivery::DirectoryHost;
use vfs_export_core::delivery::ObjectUrl;
use vfs_export_core::delivery::ObjectUrlDelivery;
use vfs_export_core::error::DeliveryError;
use vfs_export_core::error::FALLBACK_MESSAGE;
use vfs_export_core::export_project;
use vfs_export_core::fs::MemoryFileSystem;
use vfs_export_core::list_project_files;

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn sample_project() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_file("/package.json", br#"{"name":"demo"}"#)
        .unwrap()
        .with_file("/src/a.ts", b"export const a = 1;")
        .unwrap()
        .with_file("/src/components/App.tsx", b"export default () => null;")
        .unwrap()
        .with_file("/node_modules/react/index.js", b"module.exports = {};")
        .unwrap()
        .with_file("/dist/bundle.js", b"bundle")
        .unwrap()
        .with_file("/.git/HEAD", b"ref: refs/heads/main")
        .unwrap()
        .with_file("/.env", b"SECRET=1")
        .unwrap()
}

fn read_archive(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

/// Host that records every call and keeps saved blobs in memory.
#[derive(Default)]
struct MemoryHost {
    created: usize,
    revoked: usize,
    saved: Vec<(String, Vec<u8>)>,
    pending: Option<Vec<u8>>,
    reject_save: bool,
}

impl BlobHost for MemoryHost {
    fn create_object_url(&mut self, data: Vec<u8>) -> Result<ObjectUrl, DeliveryError> {
        self.created += 1;
        self.pending = Some(data);
        Ok(ObjectUrl::new(format!("blob:memory/{}", self.created)))
    }

    fn trigger_save(&mut self, _url: &ObjectUrl, filename: &str) -> Result<(), DeliveryError> {
        if self.reject_save {
            return Err(DeliveryError::Rejected {
                reason: String::new(),
            });
        }
        let data = self.pending.clone().unwrap_or_default();
        self.saved.push((filename.to_string(), data));
        Ok(())
    }

    fn revoke_object_url(&mut self, _url: &ObjectUrl) {
        self.revoked += 1;
        self.pending = None;
    }
}

#[tokio::test]
async fn test_export_to_directory() {
    let temp = TempDir::new().unwrap();
    let exporter = Exporter::new(sample_project()).with_clock(FixedClock::new(export_date()));
    let mut delivery = ObjectUrlDelivery::new(DirectoryHost::new(temp.path()));

    let report = exporter.export(&mut delivery).await.unwrap();

    assert_eq!(report.filename, "project-2024-03-15.zip");
    assert_eq!(report.files_added, 3);
    assert!(!report.has_skipped());

    let saved = temp.path().join("project-2024-03-15.zip");
    let entries = read_archive(&fs::read(&saved).unwrap());
    let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["package.json", "src/a.ts", "src/components/App.tsx"]);
    assert_eq!(entries[1].1, b"export const a = 1;");
}

#[tokio::test]
async fn test_partial_failure_tolerated() {
    let fs = MemoryFileSystem::new()
        .with_file("/one.txt", b"1")
        .unwrap()
        .with_file("/two.txt", b"2")
        .unwrap()
        .with_file("/three.txt", b"3")
        .unwrap()
        .with_failure("/two.txt")
        .unwrap();
    let mut delivery = ObjectUrlDelivery::new(MemoryHost::default());

    let report = Exporter::new(fs).export(&mut delivery).await.unwrap();

    assert_eq!(report.files_discovered, 3);
    assert_eq!(report.files_added, 2);
    assert_eq!(report.skipped[0].path.as_str(), "/two.txt");

    let host = delivery.into_host();
    let names: Vec<String> = read_archive(&host.saved[0].1)
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    assert_eq!(names, ["one.txt", "three.txt"]);
    assert_eq!((host.created, host.revoked), (1, 1));
}

#[tokio::test]
async fn test_enumeration_failure_never_delivers() {
    let fs = sample_project().with_failure("/src/").unwrap();
    let mut delivery = ObjectUrlDelivery::new(MemoryHost::default());

    let err = Exporter::new(fs).export(&mut delivery).await.unwrap_err();

    assert!(matches!(err, ExportError::Enumeration(_)));
    assert_eq!(
        err.to_string(),
        "Download failed: Failed to read directory: /src/ (status 500)"
    );
    let host = delivery.into_host();
    assert_eq!((host.created, host.revoked), (0, 0));
}

#[tokio::test]
async fn test_empty_project_yields_empty_archive() {
    let mut delivery = ObjectUrlDelivery::new(MemoryHost::default());
    let report = Exporter::new(MemoryFileSystem::new())
        .export(&mut delivery)
        .await
        .unwrap();

    assert_eq!(report.files_added, 0);
    let host = delivery.into_host();
    assert_eq!(host.saved.len(), 1);
    assert!(read_archive(&host.saved[0].1).is_empty());
}

#[tokio::test]
async fn test_object_url_revoked_when_save_fails() {
    let fs = MemoryFileSystem::new().with_file("/a.txt", b"a").unwrap();
    let mut delivery = ObjectUrlDelivery::new(MemoryHost {
        reject_save: true,
        ..Default::default()
    });

    let err = Exporter::new(fs).export(&mut delivery).await.unwrap_err();

    assert!(err.is_delivery());
    // Rejection without a reason falls back to the generic message.
    assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    let host = delivery.into_host();
    assert_eq!((host.created, host.revoked), (1, 1));
    assert!(host.saved.is_empty());
}

#[tokio::test]
async fn test_custom_prefix_and_excludes() {
    let config = ExportConfig::default()
        .with_filename_prefix("demo")
        .with_exclude("*.tsx");
    let exporter = Exporter::new(sample_project())
        .with_config(config)
        .with_clock(FixedClock::new(export_date()));
    let mut delivery = ObjectUrlDelivery::new(MemoryHost::default());

    let report = exporter.export(&mut delivery).await.unwrap();

    assert_eq!(report.filename, "demo-2024-03-15.zip");
    let host = delivery.into_host();
    let names: Vec<String> = read_archive(&host.saved[0].1)
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    assert_eq!(names, ["package.json", "src/a.ts"]);
}

#[tokio::test]
async fn test_repeated_exports_are_identical() {
    let exporter = Exporter::new(sample_project()).with_clock(FixedClock::new(export_date()));
    let first = exporter.build().await.unwrap();
    let second = exporter.build().await.unwrap();
    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn test_api_functions() {
    let fs = sample_project();
    let config = ExportConfig::default();

    let files = list_project_files(&fs, &config).await.unwrap();
    let files: Vec<&str> = files.iter().map(|p| p.as_str()).collect();
    assert_eq!(files, ["/package.json", "/src/a.ts", "/src/components/App.tsx"]);

    let mut delivery = ObjectUrlDelivery::new(MemoryHost::default());
    let report = export_project(&fs, &mut delivery, &config).await.unwrap();
    assert_eq!(report.files_added, 3);
    assert!(report.filename.starts_with("project-"));
}
