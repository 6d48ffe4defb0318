//! Page corpus: the page-tagged text of one document

use crate::document::DocumentId;
use std::fmt;

/// Separator placed between rendered pages
pub const PAGE_SEPARATOR: &str = "\n\n";

/// A single page of extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number in document order
    pub index: u32,

    /// Extracted text (empty for pages with no text layer)
    pub text: String,
}

impl Page {
    /// Render the page with its marker, e.g. `Page 3: ...`
    pub fn render(&self) -> String {
        format!("Page {}: {}", self.index, self.text)
    }
}

/// Errors raised when building a corpus from explicit pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// Page indices are not 1, 2, 3, ... in order
    NonContiguous {
        /// Index expected at this position
        expected: u32,
        /// Index actually found
        found: u32,
    },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::NonContiguous { expected, found } => write!(
                f,
                "page indices must be contiguous from 1: expected {}, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for CorpusError {}

/// Ordered, immutable sequence of pages for one loaded document
///
/// Invariant: page indices are exactly `1..=len` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCorpus {
    document: DocumentId,
    pages: Vec<Page>,
}

impl PageCorpus {
    /// Build a corpus from per-page text in document order
    ///
    /// # Examples
    ///
    /// ```
    /// use scholarlens_domain::{DocumentId, PageCorpus};
    ///
    /// let corpus = PageCorpus::from_texts(DocumentId::new(), vec!["Intro".into(), "Method".into()]);
    /// assert_eq!(corpus.render(), "Page 1: Intro\n\nPage 2: Method");
    /// ```
    pub fn from_texts<I>(document: DocumentId, texts: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let pages = texts
            .into_iter()
            .zip(1u32..)
            .map(|(text, index)| Page { index, text })
            .collect();
        Self { document, pages }
    }

    /// Build a corpus from explicit pages, checking index contiguity
    pub fn from_pages(document: DocumentId, pages: Vec<Page>) -> Result<Self, CorpusError> {
        for (expected, page) in (1u32..).zip(pages.iter()) {
            if page.index != expected {
                return Err(CorpusError::NonContiguous {
                    expected,
                    found: page.index,
                });
            }
        }
        Ok(Self { document, pages })
    }

    /// The document this corpus was built from
    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// All pages in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the corpus has no pages at all
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up a page by its 1-based index
    pub fn page(&self, index: u32) -> Option<&Page> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.pages.get(position)
    }

    /// Whether `index` names a page of this corpus
    pub fn contains_page(&self, index: u32) -> bool {
        self.page(index).is_some()
    }

    /// Serialize with page markers: `Page 1: ...\n\nPage 2: ...`
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(Page::render)
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR)
    }

    /// Length in chars of [`render`](Self::render) without building it
    pub fn rendered_len(&self) -> usize {
        let separators = self.pages.len().saturating_sub(1) * PAGE_SEPARATOR.len();
        self.pages
            .iter()
            .map(|p| format!("Page {}: ", p.index).len() + p.text.chars().count())
            .sum::<usize>()
            + separators
    }
}
