//! Page extractors for documents read from disk.
//!
//! PDFs go through poppler's `pdftotext`, which separates pages with form
//! feeds. Plain-text files use the same convention. `pdftotext` ends every
//! page with a form feed, so only that final terminator is dropped; blank
//! pages, including a blank last page, keep their slot so page numbers stay
//! aligned with the PDF.

use anyhow::{anyhow, bail, Context, Result};
use scholarlens_domain::traits::PageExtractor;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Leading bytes of every PDF file
pub const PDF_MAGIC: &[u8] = b"%PDF-";

const PAGE_BREAK: char = '\u{000C}';

/// Extracts PDF pages by piping the bytes through `pdftotext`
#[derive(Debug, Clone)]
pub struct PdfToTextExtractor {
    program: String,
}

impl PdfToTextExtractor {
    /// Use `pdftotext` from `PATH`
    pub fn new() -> Self {
        Self::with_program("pdftotext")
    }

    /// Use a specific `pdftotext` binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PdfToTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExtractor for PdfToTextExtractor {
    type Error = anyhow::Error;

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let mut child = Command::new(&self.program)
            .args(["-enc", "UTF-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to execute {}", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("{} stdin is not available", self.program))?;
        let input = bytes.to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to read {} output", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} returned non-zero exit status: {}",
                self.program,
                stderr.trim()
            );
        }

        writer
            .join()
            .map_err(|_| anyhow!("{} writer thread panicked", self.program))?
            .with_context(|| format!("failed to write document to {}", self.program))?;

        let raw = String::from_utf8_lossy(&output.stdout);
        let pages = split_pages(&raw);
        debug!(pages = pages.len(), bytes = bytes.len(), "Extracted PDF text");
        Ok(pages)
    }
}

/// Reads UTF-8 text, one page per form-feed-separated chunk
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PageExtractor for PlainTextExtractor {
    type Error = anyhow::Error;

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let text = std::str::from_utf8(bytes).context("document is neither a PDF nor UTF-8 text")?;
        Ok(split_pages(text))
    }
}

/// Picks the PDF or plain-text extractor from the leading bytes
#[derive(Debug, Clone, Default)]
pub struct AutoExtractor {
    pdf: PdfToTextExtractor,
    text: PlainTextExtractor,
}

impl AutoExtractor {
    /// Create an extractor using `pdftotext` from `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom PDF extractor
    pub fn with_pdf(pdf: PdfToTextExtractor) -> Self {
        Self {
            pdf,
            text: PlainTextExtractor,
        }
    }
}

impl PageExtractor for AutoExtractor {
    type Error = anyhow::Error;

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        if bytes.starts_with(PDF_MAGIC) {
            self.pdf.extract_pages(bytes)
        } else {
            self.text.extract_pages(bytes)
        }
    }
}

/// Split on form feeds, dropping NULs and the single closing page break
fn split_pages(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.strip_suffix(PAGE_BREAK)
        .unwrap_or(raw)
        .split(PAGE_BREAK)
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect()
}
