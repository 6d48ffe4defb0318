//! Text grounding: does quoted evidence actually occur in a page?
//!
//! Quotes are compared after normalisation (lowercase, punctuation folded to
//! spaces, whitespace collapsed). A quote is grounded when it is a substring
//! of the normalised page, or failing that when enough of its distinct words
//! occur in the page to count as a close paraphrase.

use std::collections::HashSet;

/// Lowercase, fold non-alphanumerics to spaces, collapse whitespace
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let folded: Vec<char> = if c.is_alphanumeric() {
                c.to_lowercase().collect()
            } else {
                vec![' ']
            };
            folded
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fraction of the quote's distinct words that occur in `page` (0.0-1.0)
pub fn token_overlap(quote: &str, page: &str) -> f64 {
    let quote = normalize(quote);
    let page = normalize(page);
    let quote_words: HashSet<&str> = quote.split_whitespace().collect();
    if quote_words.is_empty() {
        return 1.0;
    }
    let page_words: HashSet<&str> = page.split_whitespace().collect();
    let found = quote_words.intersection(&page_words).count();
    found as f64 / quote_words.len() as f64
}

/// Whether `quote` is grounded in `page`
///
/// Blank quotes are trivially grounded.
pub fn is_grounded(quote: &str, page: &str, min_overlap: f64) -> bool {
    let normalized_quote = normalize(quote);
    if normalized_quote.is_empty() {
        return true;
    }
    if normalize(page).contains(&normalized_quote) {
        return true;
    }
    token_overlap(quote, page) >= min_overlap
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "A total of 245 undergraduate students (N = 245) participated in the study.";

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  N = 245,\nstudents! "), "n 245 students");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_normalize_folds_accented_capitals() {
        assert_eq!(normalize("ÉTUDE EMPIRIQUE À GENÈVE"), "étude empirique à genève");
    }

    #[test]
    fn test_quote_differing_only_in_accented_case_is_grounded() {
        let page = "ÉTUDE EMPIRIQUE À GENÈVE: 40 enseignants ont participé.";
        assert!(is_grounded("étude empirique à genève", page, 1.0));
        assert_eq!(token_overlap("Étude à Genève", page), 1.0);
    }

    #[test]
    fn test_verbatim_quote_is_grounded() {
        assert!(is_grounded("N = 245", PAGE, 1.0));
        assert!(is_grounded("245 UNDERGRADUATE students", PAGE, 1.0));
    }

    #[test]
    fn test_paraphrase_grounded_by_overlap() {
        let quote = "245 students participated";
        assert!(!normalize(PAGE).contains(&normalize(quote)));
        assert!(is_grounded(quote, PAGE, 0.6));
    }

    #[test]
    fn test_invented_quote_not_grounded() {
        assert!(!is_grounded("Teachers in Japan were interviewed", PAGE, 0.6));
    }

    #[test]
    fn test_blank_quote_is_grounded() {
        assert!(is_grounded("   ", PAGE, 1.0));
        assert_eq!(token_overlap("", PAGE), 1.0);
    }
}
