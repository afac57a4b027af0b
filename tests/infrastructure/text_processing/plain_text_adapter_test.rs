use docuchat::application::ports::{FileLoader, FileLoaderError};
use docuchat::domain::Document;
use docuchat::infrastructure::text_processing::PlainTextAdapter;

fn document(name: &str, data: &[u8]) -> Document {
    Document::new(name.to_string(), data.len() as u64)
}

#[tokio::test]
async fn given_utf8_text_file_when_extracting_then_returns_text_unchanged() {
    let data = "Line one\n\nLine   two".as_bytes();

    let text = PlainTextAdapter
        .extract_text(data, &document("notes.txt", data))
        .await
        .unwrap();

    assert_eq!(text, "Line one\n\nLine   two");
}

#[tokio::test]
async fn given_markdown_with_bom_when_extracting_then_strips_bom() {
    let data = "\u{feff}# Title".as_bytes();

    let text = PlainTextAdapter
        .extract_text(data, &document("README.md", data))
        .await
        .unwrap();

    assert_eq!(text, "# Title");
}

#[tokio::test]
async fn given_unknown_extension_with_invalid_utf8_when_extracting_then_decodes_lossily() {
    let data = [b'o', b'k', 0xff, b'!'];

    let text = PlainTextAdapter
        .extract_text(&data, &document("blob.bin", &data))
        .await
        .unwrap();

    assert_eq!(text, "ok\u{fffd}!");
}

#[tokio::test]
async fn given_pdf_document_when_extracting_as_plain_text_then_rejects_it() {
    let data = b"%PDF-1.7";

    let result = PlainTextAdapter
        .extract_text(data, &document("paper.pdf", data))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}
