//! Word document text via `docx-rs`.
//!
//! Body paragraphs, hyperlink runs and table cells all carry résumé text;
//! many templates lay the whole page out as a table.

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

use crate::models::profile::{Confidence, TextSource};
use crate::resume::loader::{ExtractError, TextExtractor};

pub const DOCX_MIN_USABLE: usize = 10;

pub struct DocxText;

impl TextExtractor for DocxText {
    fn source(&self) -> TextSource {
        TextSource::Docx
    }

    fn confidence(&self) -> Confidence {
        Confidence::High
    }

    fn min_usable_chars(&self) -> usize {
        DOCX_MIN_USABLE
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let docx = read_docx(bytes).map_err(|e| ExtractError::Docx(format!("{e:?}")))?;

        let mut lines = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(para) => push_line(&mut lines, paragraph_text(para)),
                DocumentChild::Table(table) => table_lines(table, &mut lines),
                _ => {}
            }
        }

        if lines.is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(lines.join("\n"))
    }
}

fn push_line(lines: &mut Vec<String>, text: String) {
    if !text.trim().is_empty() {
        lines.push(text);
    }
}

/// Row by row, cell by cell; each cell paragraph becomes its own line.
#[allow(irrefutable_let_patterns)]
fn table_lines(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else { continue };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else { continue };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => push_line(lines, paragraph_text(para)),
                    TableCellContent::Table(nested) => table_lines(nested, lines),
                    _ => {}
                }
            }
        }
    }
}

/// Paragraph → Run → Text, including runs wrapped in hyperlinks. Runs in one
/// paragraph are parts of the same line.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&para.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) | RunChild::Break(_) => out.push(' '),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use docx_rs::{Docx, Hyperlink, HyperlinkType, TableCell, TableRow};

    use super::*;
    use crate::resume::loader::{load, ExtractionConfig, RawDocument};

    const DOCX_CONTENT_TYPE: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn text_paragraph(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    /// Name in a body paragraph, email behind a hyperlink, role inside a table.
    fn templated_resume() -> Vec<u8> {
        let link = Hyperlink::new("mailto:jane@example.com", HyperlinkType::External)
            .add_run(Run::new().add_text("jane@example.com"));
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(text_paragraph("EXPERIENCE")),
            TableCell::new()
                .add_paragraph(text_paragraph("Senior Software Engineer at Acme Corp")),
        ])]);
        pack(
            Docx::new()
                .add_paragraph(text_paragraph("Jane Doe"))
                .add_paragraph(Paragraph::new().add_hyperlink(link))
                .add_table(table),
        )
    }

    #[test]
    fn test_reads_paragraphs_hyperlinks_and_tables() {
        let text = DocxText.extract(&templated_resume()).unwrap();
        assert_eq!(
            text,
            "Jane Doe\njane@example.com\nEXPERIENCE\nSenior Software Engineer at Acme Corp"
        );
    }

    #[test]
    fn test_plain_paragraphs() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(text_paragraph("John Smith"))
                .add_paragraph(Paragraph::new())
                .add_paragraph(text_paragraph("SKILLS"))
                .add_paragraph(text_paragraph("Rust, Go, PostgreSQL")),
        );
        let text = DocxText.extract(&bytes).unwrap();
        assert_eq!(text, "John Smith\nSKILLS\nRust, Go, PostgreSQL");
    }

    #[test]
    fn test_empty_document_has_no_text() {
        let err = DocxText.extract(&pack(Docx::new())).unwrap_err();
        assert!(matches!(err, ExtractError::NoText));
    }

    #[test]
    fn test_word_upload_loads_with_high_confidence() {
        let doc = RawDocument::new(templated_resume(), DOCX_CONTENT_TYPE, "jane.docx");
        let loaded = load(&doc, &ExtractionConfig::default());
        assert_eq!(loaded.source, TextSource::Docx);
        assert_eq!(loaded.confidence, Confidence::High);
        assert!(loaded.text.contains("jane@example.com"));
        assert!(loaded.text.contains("Acme Corp"));
    }

    #[test]
    fn test_table_resume_fills_profile() {
        let doc = RawDocument::new(templated_resume(), DOCX_CONTENT_TYPE, "jane.docx");
        let profile = crate::resume::parse_resume(&doc, &ExtractionConfig::default());
        assert_eq!(profile.contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(profile.experience, vec!["Senior Software Engineer at Acme Corp"]);
    }

    #[test]
    fn test_rejects_non_zip_bytes() {
        let err = DocxText.extract(b"plain words, not a zip archive").unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn test_rejects_empty_bytes() {
        assert!(DocxText.extract(b"").is_err());
    }
}
