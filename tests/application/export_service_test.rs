use std::io::{Cursor, Read};
use std::sync::Arc;

use docuchat::application::services::{
    EXPORT_ARCHIVE_NAME, EXPORT_PATHS, ExportService, placeholder_for,
};
use docuchat::infrastructure::export::LocalSourceFetcher;

fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[tokio::test]
async fn given_readable_and_missing_files_when_exporting_then_missing_get_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/lib.rs"), "pub mod domain;\n").unwrap();
    let service = ExportService::with_paths(
        Arc::new(LocalSourceFetcher::new(dir.path())),
        vec!["src/lib.rs".to_string(), "src/gone.rs".to_string()],
    );

    let archive = service.export().await.unwrap();

    assert_eq!(archive.file_name, EXPORT_ARCHIVE_NAME);
    assert_eq!(archive.missing, vec!["src/gone.rs".to_string()]);
    assert_eq!(read_entry(&archive.bytes, "src/lib.rs"), "pub mod domain;\n");
    assert_eq!(
        read_entry(&archive.bytes, "src/gone.rs"),
        "// Error: Could not load content for src/gone.rs"
    );
}

#[tokio::test]
async fn given_nothing_readable_when_exporting_then_archive_still_lists_every_path() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec!["a.rs".to_string(), "b/c.rs".to_string()];
    let service = ExportService::with_paths(
        Arc::new(LocalSourceFetcher::new(dir.path())),
        paths.clone(),
    );

    let archive = service.export().await.unwrap();

    let zip = zip::ZipArchive::new(Cursor::new(archive.bytes.as_slice())).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a.rs", "b/c.rs"]);
    assert_eq!(archive.missing, paths);
}

#[tokio::test]
async fn given_project_root_when_exporting_default_paths_then_every_file_is_found() {
    let service = ExportService::new(Arc::new(LocalSourceFetcher::new(env!(
        "CARGO_MANIFEST_DIR"
    ))));

    let archive = service.export().await.unwrap();

    assert!(archive.missing.is_empty(), "missing: {:?}", archive.missing);
    let zip = zip::ZipArchive::new(Cursor::new(archive.bytes.as_slice())).unwrap();
    assert_eq!(zip.len(), EXPORT_PATHS.len());
}

#[test]
fn given_path_when_building_placeholder_then_names_the_path() {
    assert_eq!(
        placeholder_for("src/main.rs"),
        "// Error: Could not load content for src/main.rs"
    );
}
