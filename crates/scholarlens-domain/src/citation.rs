//! Citation contract: textual evidence anchored to a page

/// One piece of textual evidence for a classification or answer
///
/// Both fields are independently optional: a model may quote text without
/// naming a page, or name a page without quoting it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Citation {
    /// 1-based page number the evidence was taken from
    pub page: Option<u32>,

    /// Quoted (or closely paraphrased) source text
    pub text: Option<String>,
}

impl Citation {
    /// Create a citation with both a page and quoted text
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            text: Some(text.into()),
        }
    }

    /// A citation carrying neither a page nor non-blank text
    ///
    /// Such entries are placeholders and carry no evidence.
    pub fn is_placeholder(&self) -> bool {
        self.page.is_none() && self.text.as_deref().map_or(true, |t| t.trim().is_empty())
    }
}
