//! Plain text from uploaded resume documents.

use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Document formats we can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Detect the format from the file extension, case-insensitively
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

/// Text content of an uploaded document. Unknown formats and unreadable
/// documents both give an empty string.
pub fn extract_resume_text(file_name: &str, bytes: &[u8]) -> String {
    let Some(kind) = DocumentKind::from_file_name(file_name) else {
        warn!("Unsupported resume format: {}", file_name);
        return String::new();
    };

    let result = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string()),
        DocumentKind::Docx => docx_text(bytes),
        DocumentKind::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
    };

    match result {
        Ok(text) => {
            debug!("Extracted {} chars from {}", text.chars().count(), file_name);
            text
        }
        Err(e) => {
            warn!("Failed to read {}: {}", file_name, e);
            String::new()
        }
    }
}

/// One line per paragraph of `word/document.xml`.
fn docx_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    let mut segments: Vec<&str> = xml.split("</w:p>").collect();
    // Whatever follows the last paragraph is section properties.
    segments.pop();
    Ok(segments
        .into_iter()
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Concatenated `<w:t>` runs of one paragraph.
fn paragraph_text(segment: &str) -> String {
    let mut out = String::new();
    let mut rest = segment;

    while let Some(start) = rest.find("<w:t") {
        let after = &rest[start + 4..];
        // `<w:tab/>`, `<w:tbl>` and friends share the prefix.
        if !matches!(after.chars().next(), Some('>') | Some(' ')) {
            rest = after;
            continue;
        }
        let Some(open_end) = after.find('>') else {
            break;
        };
        if after[..open_end].ends_with('/') {
            rest = &after[open_end + 1..];
            continue;
        }
        let body = &after[open_end + 1..];
        let Some(close) = body.find("</w:t>") else {
            break;
        };
        out.push_str(&unescape_xml(&body[..close]));
        rest = &body[close + "</w:t>".len()..];
    }
    out
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("cv.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("resume.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_file_name("notes.txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_file_name("resume.doc"), None);
        assert_eq!(DocumentKind::from_file_name("resume"), None);
    }

    #[test]
    fn test_plain_text_is_lossy_utf8() {
        let bytes = b"Jane Doe\nData Analyst \xff";
        let text = extract_resume_text("resume.txt", bytes);
        assert!(text.starts_with("Jane Doe\nData Analyst"));
    }

    #[test]
    fn test_unknown_format_is_empty() {
        assert_eq!(extract_resume_text("resume.odt", b"whatever"), "");
    }

    #[test]
    fn test_garbage_pdf_is_empty() {
        assert_eq!(extract_resume_text("resume.pdf", b"definitely not a pdf"), "");
    }

    #[test]
    fn test_docx_paragraphs() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:tab/><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>SQL &amp; Python</w:t></w:r></w:p>
            <w:sectPr/></w:body></w:document>"#;
        let text = extract_resume_text("resume.docx", &docx_bytes(xml));
        assert_eq!(text, "Jane Doe\nSQL & Python");
    }

    #[test]
    fn test_docx_without_document_xml() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert_eq!(extract_resume_text("resume.docx", &bytes), "");
    }
}
