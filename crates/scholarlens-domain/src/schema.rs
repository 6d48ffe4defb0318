//! Declarative classification schemas
//!
//! A schema is pure data: the result field name, the result shape, the
//! permitted vocabulary with definitions, the not-reported token, and the
//! dimension-specific instruction text. The same vocabulary list feeds the
//! validator, the prompt enumeration and the output contract.

/// Spellings models use for "the document does not say"
const NOT_REPORTED_ALIASES: &[&str] = &[
    "nr",
    "not reported",
    "notreported",
    "not applicable",
    "notapplicable",
    "n/a",
];

/// Shape of a dimension's result value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one token from the vocabulary
    Single,

    /// One or more vocabulary tokens joined by `separator`
    MultiFromVocabulary {
        /// Token separator in the raw output
        separator: char,
    },

    /// A single open-vocabulary phrase
    FreeText,

    /// One or more open-vocabulary phrases joined by `separator`
    FreeTextMulti {
        /// Token separator in the raw output
        separator: char,
    },

    /// A positive integer carried as a string
    Numeric,
}

impl Cardinality {
    /// Separator for multi-value shapes
    pub fn separator(&self) -> Option<char> {
        match self {
            Cardinality::MultiFromVocabulary { separator }
            | Cardinality::FreeTextMulti { separator } => Some(*separator),
            _ => None,
        }
    }

    /// Whether the output may hold several tokens
    pub fn is_multi_value(&self) -> bool {
        self.separator().is_some()
    }

    /// Whether tokens must come from the fixed vocabulary
    pub fn is_closed_vocabulary(&self) -> bool {
        matches!(
            self,
            Cardinality::Single | Cardinality::MultiFromVocabulary { .. }
        )
    }

    /// Short human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Cardinality::Single => "single",
            Cardinality::MultiFromVocabulary { .. } => "multi",
            Cardinality::FreeText => "text",
            Cardinality::FreeTextMulti { .. } => "text-list",
            Cardinality::Numeric => "numeric",
        }
    }
}

/// One permitted vocabulary token and the definition shown to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Token as it must appear in the output
    pub token: &'static str,

    /// Natural-language definition
    pub definition: &'static str,
}

/// Static definition of one metadata dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationSchema {
    /// Result field name, e.g. `participantsGroup`
    pub field: &'static str,

    /// Human-readable title, e.g. `Participants group`
    pub title: &'static str,

    /// Task sentence completing "Your task is to ..."
    pub task: &'static str,

    /// Optional definition paragraph shown before the vocabulary
    pub preamble: Option<&'static str>,

    /// Result shape
    pub cardinality: Cardinality,

    /// Permitted tokens (empty for open-vocabulary dimensions)
    pub vocabulary: &'static [Category],

    /// Sentinel meaning the information is absent
    pub not_reported: &'static str,

    /// Dimension-specific rule lines
    pub rules: &'static [&'static str],
}

impl ClassificationSchema {
    /// Vocabulary tokens in declaration order
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.vocabulary.iter().map(|c| c.token)
    }

    /// Canonical spelling of a vocabulary token, matched case-insensitively
    ///
    /// The not-reported token is not part of the vocabulary; see
    /// [`is_not_reported`](Self::is_not_reported).
    pub fn canonical_token(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.vocabulary
            .iter()
            .map(|c| c.token)
            .find(|token| token.eq_ignore_ascii_case(raw))
    }

    /// Whether `raw` spells the not-reported outcome
    pub fn is_not_reported(&self, raw: &str) -> bool {
        let raw = raw.trim();
        raw.eq_ignore_ascii_case(self.not_reported)
            || NOT_REPORTED_ALIASES
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(raw))
    }

    /// String used to join multi-value outputs, e.g. `", "`
    pub fn joiner(&self) -> &'static str {
        match self.cardinality.separator() {
            Some(';') => "; ",
            _ => ", ",
        }
    }

    /// All legal single-token outputs for closed vocabularies, NR last
    pub fn legal_tokens(&self) -> Vec<&'static str> {
        let mut tokens: Vec<&'static str> = self.tokens().collect();
        tokens.push(self.not_reported);
        tokens
    }
}
