use std::sync::Arc;

use docuchat::application::ports::{FileLoader, FileLoaderError};
use docuchat::domain::{ContentType, Document};
use docuchat::infrastructure::text_processing::{
    CompositeFileLoader, MockFileLoader, PlainTextAdapter,
};

fn document(name: &str, data: &[u8]) -> Document {
    Document::new(name.to_string(), data.len() as u64)
}

#[tokio::test]
async fn given_default_adapters_when_loading_text_and_unknown_files_then_decodes_them() {
    let loader = CompositeFileLoader::with_default_adapters();

    let txt = loader
        .extract_text(b"plain", &document("a.txt", b"plain"))
        .await
        .unwrap();
    let csv = loader
        .extract_text(b"x,y", &document("a.csv", b"x,y"))
        .await
        .unwrap();

    assert_eq!(txt, "plain");
    assert_eq!(csv, "x,y");
}

#[tokio::test]
async fn given_unregistered_content_type_when_loading_then_rejects_it() {
    let loader = CompositeFileLoader::new(vec![(
        ContentType::Text,
        Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>,
    )]);

    let result = loader
        .extract_text(b"# md", &document("a.md", b"# md"))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[tokio::test]
async fn given_failing_adapter_when_loading_then_propagates_its_error() {
    let loader = CompositeFileLoader::new(vec![(
        ContentType::Pdf,
        Arc::new(MockFileLoader::failing("scanned image")) as Arc<dyn FileLoader>,
    )]);

    let result = loader
        .extract_text(b"%PDF", &document("scan.pdf", b"%PDF"))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::ExtractionFailed(reason)) if reason == "scanned image"
    ));
}
