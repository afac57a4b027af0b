use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use docuchat::application::ports::{FileLoader, FileLoaderError};
use docuchat::domain::Document;
use docuchat::infrastructure::text_processing::{DocxAdapter, extract_raw_text};

const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Quarterly report</w:t></w:r></w:p>
    <w:p>
      <w:r><w:t xml:space="preserve">Sales &amp; </w:t></w:r>
      <w:r><w:rPr><w:b/></w:rPr><w:t>marketing</w:t></w:r>
      <w:r><w:tab/><w:t>grew</w:t></w:r>
    </w:p>
  </w:body>
</w:document>"#;

fn docx_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn document(name: &str, data: &[u8]) -> Document {
    Document::new(name.to_string(), data.len() as u64)
}

#[test]
fn given_document_xml_when_extracting_raw_text_then_joins_runs_per_paragraph() {
    let text = extract_raw_text(BODY).unwrap();

    assert_eq!(text, "Quarterly report\n\nSales & marketing\tgrew\n\n");
}

#[test]
fn given_numeric_character_reference_when_extracting_then_resolves_it() {
    let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>caf&#233; &#x2014; ok</w:t></w:r></w:p></w:body></w:document>"#;

    assert_eq!(extract_raw_text(xml).unwrap(), "café — ok\n\n");
}

#[test]
fn given_malformed_xml_when_extracting_then_fails() {
    let result = extract_raw_text("<w:document><w:p></w:document>");
    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_archive_when_extracting_then_returns_paragraph_text() {
    let data = docx_bytes(&[
        ("[Content_Types].xml", "<Types/>"),
        ("word/document.xml", BODY),
    ]);

    let text = DocxAdapter::new()
        .extract_text(&data, &document("report.docx", &data))
        .await
        .unwrap();

    assert!(text.starts_with("Quarterly report\n\n"));
    assert!(text.contains("Sales & marketing"));
}

#[tokio::test]
async fn given_archive_without_document_part_when_extracting_then_fails() {
    let data = docx_bytes(&[("word/styles.xml", "<w:styles/>")]);

    let result = DocxAdapter::new()
        .extract_text(&data, &document("empty.docx", &data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_bytes_that_are_not_a_zip_when_extracting_then_fails() {
    let data = b"definitely not a zip";

    let result = DocxAdapter::new()
        .extract_text(data, &document("fake.docx", data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}
