//! Document ingestion: turning a file or inline input into analyzable text.
//!
//! Plain text and Markdown documents are read as UTF-8. For `.docx` files
//! the raw text of `word/document.xml` is extracted: run text is kept,
//! paragraphs are separated by a blank line, and all formatting is dropped.
//!
//! Every entry point applies the size guard before content is read into
//! memory.

use std::io::{BufReader, Read};

use camino::Utf8Path;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::error::{IngestError, IngestResult};

/// Default ceiling on input size: 2 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 2 * 1024 * 1024;

/// Source formats recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.txt`
    PlainText,
    /// `.md` or `.markdown`
    Markdown,
    /// `.docx`
    WordProcessor,
}

impl DocumentFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Utf8Path) -> IngestResult<Self> {
        let extension = path.extension().unwrap_or_default().to_ascii_lowercase();
        match extension.as_str() {
            "txt" => Ok(Self::PlainText),
            "md" | "markdown" => Ok(Self::Markdown),
            "docx" => Ok(Self::WordProcessor),
            _ => Err(IngestError::UnsupportedFormat { extension }),
        }
    }

}

/// Reject inputs larger than `max_bytes`. `None` disables the check.
pub fn check_input_size(len: usize, max_bytes: Option<usize>) -> IngestResult<()> {
    match max_bytes {
        Some(limit) if len > limit => Err(IngestError::InputTooLarge {
            size: len as u64,
            limit: limit as u64,
        }),
        _ => Ok(()),
    }
}

/// A document read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Detected source format.
    pub format: DocumentFormat,
    /// Raw document text.
    pub text: String,
}

/// Read a document and return its raw text.
///
/// The file size is checked against `max_bytes` via metadata before the
/// content is read. Text extracted from a `.docx` is checked again, since
/// the archive is compressed.
///
/// # Errors
///
/// - [`IngestError::UnsupportedFormat`] for unknown extensions
/// - [`IngestError::InputTooLarge`] when the file or extracted text exceeds
///   `max_bytes`
/// - [`IngestError::Read`] when the file cannot be read as UTF-8 text
/// - [`IngestError::Archive`] or [`IngestError::Xml`] for broken `.docx` files
#[tracing::instrument(skip_all, fields(path = %path, max_bytes = ?max_bytes))]
pub fn extract_text(path: &Utf8Path, max_bytes: Option<usize>) -> IngestResult<Document> {
    let format = DocumentFormat::from_path(path)?;

    let read_error = |source: std::io::Error| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_error)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(IngestError::InputTooLarge {
            size: metadata.len(),
            limit: limit as u64,
        });
    }

    let text = match format {
        DocumentFormat::PlainText | DocumentFormat::Markdown => {
            std::fs::read_to_string(path.as_std_path()).map_err(read_error)?
        }
        DocumentFormat::WordProcessor => {
            let text = word_document_text(path)?;
            check_input_size(text.len(), max_bytes)?;
            text
        }
    };
    tracing::debug!(?format, bytes = text.len(), "document read");
    Ok(Document { format, text })
}

/// Archive member holding the body of a `.docx` document.
const WORD_BODY: &str = "word/document.xml";

fn word_document_text(path: &Utf8Path) -> IngestResult<String> {
    let archive_error = |source| IngestError::Archive {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path.as_std_path()).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(archive_error)?;
    let mut xml = String::new();
    archive
        .by_name(WORD_BODY)
        .map_err(archive_error)?
        .read_to_string(&mut xml)
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    body_text(&xml).map_err(|source| IngestError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Text of every `w:t` run. `w:p` ends a paragraph with a blank line,
/// `w:tab` becomes a tab and `w:br`/`w:cr` a newline.
fn body_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" if !text.is_empty() && !text.ends_with("\n\n") => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run_text => {
                text.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    text.truncate(text.trim_end().len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
    }

    #[test]
    fn detects_formats() {
        assert_eq!(
            DocumentFormat::from_path(Utf8Path::new("a.txt")).unwrap(),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::from_path(Utf8Path::new("notes.MD")).unwrap(),
            DocumentFormat::Markdown
        );
        assert_eq!(
            DocumentFormat::from_path(Utf8Path::new("report.docx")).unwrap(),
            DocumentFormat::WordProcessor
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = DocumentFormat::from_path(Utf8Path::new("image.png")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { ref extension } if extension == "png"));

        let err = DocumentFormat::from_path(Utf8Path::new("README")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { ref extension } if extension.is_empty()));
    }

    #[test]
    fn size_guard() {
        assert!(check_input_size(10, Some(10)).is_ok());
        assert!(check_input_size(11, None).is_ok());
        assert!(matches!(
            check_input_size(11, Some(10)),
            Err(IngestError::InputTooLarge { size: 11, limit: 10 })
        ));
    }

    #[test]
    fn reads_plain_text() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "draft.txt");
        fs::write(&path, "Hello there.\r\n").unwrap();

        let doc = extract_text(&path, Some(DEFAULT_MAX_INPUT_BYTES)).unwrap();
        assert_eq!(doc.format, DocumentFormat::PlainText);
        assert_eq!(doc.text, "Hello there.\r\n");
    }

    #[test]
    fn markdown_is_returned_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "draft.md");
        fs::write(&path, "# Title\n\nBody.").unwrap();

        let doc = extract_text(&path, None).unwrap();
        assert_eq!(doc.format, DocumentFormat::Markdown);
        assert_eq!(doc.text, "# Title\n\nBody.");
    }

    #[test]
    fn oversized_file_is_rejected_before_reading() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "big.txt");
        fs::write(&path, "x".repeat(64)).unwrap();

        let err = extract_text(&path, Some(16)).unwrap_err();
        assert!(matches!(err, IngestError::InputTooLarge { size: 64, limit: 16 }));
    }

    fn write_docx(path: &Utf8Path, body: &str) {
        let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
        zip.start_file(WORD_BODY, zip::write::SimpleFileOptions::default())
            .unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
        .unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn word_document_paragraphs_are_extracted() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "letter.docx");
        write_docx(
            &path,
            concat!(
                r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Dear team,</w:t></w:r></w:p>"#,
                r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">The draft </w:t></w:r>"#,
                r#"<w:r><w:t>repeats itself &amp; rambles.</w:t></w:r></w:p>"#,
                r#"<w:p/>"#,
                r#"<w:p><w:r><w:t>Regards</w:t><w:tab/><w:t>Sam</w:t></w:r></w:p>"#,
            ),
        );

        let doc = extract_text(&path, Some(DEFAULT_MAX_INPUT_BYTES)).unwrap();
        assert_eq!(doc.format, DocumentFormat::WordProcessor);
        assert_eq!(
            doc.text,
            "Dear team,\n\nThe draft repeats itself & rambles.\n\nRegards\tSam"
        );
    }

    #[test]
    fn extracted_word_text_is_size_checked() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "long.docx");
        let paragraph = format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", "a".repeat(4096));
        write_docx(&path, &paragraph);
        let compressed = fs::metadata(&path).unwrap().len() as usize;
        assert!(compressed < 4096);

        let err = extract_text(&path, Some(compressed + 1)).unwrap_err();
        assert!(matches!(err, IngestError::InputTooLarge { size: 4096, .. }));
    }

    #[test]
    fn broken_word_documents_are_archive_errors() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "broken.docx");
        fs::write(&path, b"not a zip archive").unwrap();

        assert!(matches!(
            extract_text(&path, None),
            Err(IngestError::Archive { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp, "absent.txt");
        assert!(matches!(
            extract_text(&path, None),
            Err(IngestError::Read { .. })
        ));
    }
}
