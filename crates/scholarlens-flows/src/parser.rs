//! Parse model output into raw values and citations
//!
//! Parsing is purely structural. Vocabulary and page checks happen in the
//! gatekeeper afterwards.

use crate::error::FlowError;
use scholarlens_domain::{Cardinality, Citation, ClassificationSchema};
use serde_json::{Map, Value};
use tracing::debug;

/// Dimension label used in query-flow errors
pub const QUERY_DIMENSION: &str = "query";

/// A classification response before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClassification {
    /// Value field as text
    pub value: String,

    /// Citations in model order
    pub sources: Vec<Citation>,
}

/// A query response before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnswer {
    /// Answer text (possibly empty)
    pub answer: String,

    /// Whether the model reports the document answers the query
    pub answerable: bool,

    /// Citations in model order
    pub sources: Vec<Citation>,
}

/// Parse a classification response for `schema`
pub fn parse_classification(
    response: &str,
    schema: &ClassificationSchema,
) -> Result<RawClassification, FlowError> {
    let field = schema.field;
    let obj = parse_object(response, field)?;

    let value = match obj.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if schema.cardinality == Cardinality::Numeric => n.to_string(),
        Some(other) => {
            return Err(FlowError::violation(
                field,
                format!("'{}' must be a string, got {}", field, json_type(other)),
            ))
        }
        None => return Err(FlowError::violation(field, format!("missing '{}' field", field))),
    };

    let sources = match obj.get("sources") {
        Some(value) => parse_sources(value, field)?,
        None => return Err(FlowError::violation(field, "missing 'sources' field")),
    };

    for key in obj.keys().filter(|k| *k != field && *k != "sources") {
        debug!(dimension = field, key = %key, "Ignoring extra output field");
    }

    Ok(RawClassification { value, sources })
}

/// Parse a query response
///
/// Accepts the `{answer, answerable, sources}` contract and the older
/// single-source `{extractedInformation, sourcePage, sourceText}` shape.
pub fn parse_query(response: &str) -> Result<RawAnswer, FlowError> {
    let obj = parse_object(response, QUERY_DIMENSION)?;

    if obj.contains_key("extractedInformation") && !obj.contains_key("answer") {
        return parse_legacy_query(&obj);
    }

    let answer = match obj.get("answer") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            return Err(FlowError::violation(
                QUERY_DIMENSION,
                format!("'answer' must be a string, got {}", json_type(other)),
            ))
        }
    };

    let answerable = match obj.get("answerable") {
        Some(Value::Bool(b)) => *b,
        None => !answer.trim().is_empty(),
        Some(other) => {
            return Err(FlowError::violation(
                QUERY_DIMENSION,
                format!("'answerable' must be a boolean, got {}", json_type(other)),
            ))
        }
    };

    let sources = match obj.get("sources") {
        Some(value) => parse_sources(value, QUERY_DIMENSION)?,
        None if !answerable => Vec::new(),
        None => return Err(FlowError::violation(QUERY_DIMENSION, "missing 'sources' field")),
    };

    Ok(RawAnswer {
        answer,
        answerable,
        sources,
    })
}

fn parse_legacy_query(obj: &Map<String, Value>) -> Result<RawAnswer, FlowError> {
    let answer = obj
        .get("extractedInformation")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FlowError::violation(QUERY_DIMENSION, "'extractedInformation' must be a string")
        })?
        .to_string();

    let citation = Citation {
        page: parse_page(obj.get("sourcePage"), QUERY_DIMENSION)?,
        text: parse_text(obj.get("sourceText"), QUERY_DIMENSION)?,
    };

    // The older contract signals "not answerable" by omitting the source
    let answerable = !citation.is_placeholder();
    let sources = if answerable { vec![citation] } else { Vec::new() };

    Ok(RawAnswer {
        answer,
        answerable,
        sources,
    })
}

/// Extract JSON from response, handling markdown code blocks and chatter
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string (```json) and the closing fence
        let body = rest.split_once('\n').map_or("", |(_, body)| body);
        let body = body.trim_end();
        return body.strip_suffix("```").unwrap_or(body).trim();
    }

    if !trimmed.starts_with('{') {
        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}

fn parse_object(response: &str, dimension: &str) -> Result<Map<String, Value>, FlowError> {
    let json_str = extract_json(response);
    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| FlowError::violation(dimension, format!("JSON parse error: {}", e)))?;

    match json {
        Value::Object(obj) => Ok(obj),
        other => Err(FlowError::violation(
            dimension,
            format!("expected a JSON object, got {}", json_type(&other)),
        )),
    }
}

fn parse_sources(value: &Value, dimension: &str) -> Result<Vec<Citation>, FlowError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(FlowError::violation(
                dimension,
                format!("'sources' must be an array, got {}", json_type(other)),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let obj = item.as_object().ok_or_else(|| {
                FlowError::violation(dimension, format!("source {} is not an object", idx))
            })?;
            Ok(Citation {
                page: parse_page(obj.get("page"), dimension)?,
                text: parse_text(obj.get("text"), dimension)?,
            })
        })
        .collect()
}

fn parse_page(value: Option<&Value>, dimension: &str) -> Result<Option<u32>, FlowError> {
    let invalid = |v: &Value| FlowError::violation(dimension, format!("invalid page number {}", v));

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(v)),
        Some(v @ Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u32>().map(Some).map_err(|_| invalid(v))
        }
        Some(other) => Err(invalid(other)),
    }
}

fn parse_text(value: Option<&Value>, dimension: &str) -> Result<Option<String>, FlowError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(FlowError::violation(
            dimension,
            format!("source text must be a string, got {}", json_type(other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
