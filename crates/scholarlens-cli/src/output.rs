//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use scholarlens_domain::{Citation, ClassificationResult, QueryResult};
use scholarlens_flows::{DimensionOutcome, LoadedDocument, SchemaRegistry};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest quote shown in a table cell
const MAX_QUOTE_CHARS: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the registered dimensions.
    pub fn format_dimensions(&self, registry: &SchemaRegistry) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<Value> = registry
                    .iter()
                    .map(|schema| {
                        json!({
                            "field": schema.field,
                            "title": schema.title,
                            "cardinality": schema.cardinality.label(),
                            "vocabulary": schema.tokens().collect::<Vec<_>>(),
                            "notReported": schema.not_reported,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Title", "Shape", "Vocabulary"]);

                for schema in registry.iter() {
                    let vocabulary = if schema.vocabulary.is_empty() {
                        "(open)".to_string()
                    } else {
                        schema.tokens().collect::<Vec<_>>().join(", ")
                    };
                    builder.push_record([
                        schema.field,
                        schema.title,
                        schema.cardinality.label(),
                        vocabulary.as_str(),
                    ]);
                }

                Ok(self.render_table(builder))
            }
            OutputFormat::Quiet => {
                let fields: Vec<&str> = registry.iter().map(|schema| schema.field).collect();
                Ok(fields.join("\n"))
            }
        }
    }

    /// Format classification outcomes in request order.
    pub fn format_outcomes(&self, outcomes: &[DimensionOutcome], registry: &SchemaRegistry) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<Value> = outcomes
                    .iter()
                    .map(|(dimension, outcome)| match outcome {
                        Ok(result) => json!({
                            "dimension": dimension,
                            "value": render_value(result, registry),
                            "notReported": result.value.is_not_reported(),
                            "sources": result.sources.iter().map(citation_json).collect::<Vec<_>>(),
                            "ungrounded": result.ungrounded,
                            "model": result.metadata.model_name,
                            "processingTimeMs": result.metadata.processing_time_ms,
                        }),
                        Err(e) => json!({
                            "dimension": dimension,
                            "error": e.to_string(),
                            "retryable": e.is_retryable(),
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if outcomes.is_empty() {
                    return Ok(self.colorize("No dimensions classified.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Dimension", "Value", "Evidence", "Status"]);

                for (dimension, outcome) in outcomes {
                    match outcome {
                        Ok(result) => {
                            let evidence: Vec<String> = result.sources.iter().map(citation_line).collect();
                            let status = if result.ungrounded.is_empty() {
                                "ok".to_string()
                            } else {
                                format!("ok ({} ungrounded)", result.ungrounded.len())
                            };
                            builder.push_record([
                                dimension.clone(),
                                render_value(result, registry),
                                evidence.join("\n"),
                                status,
                            ]);
                        }
                        Err(e) => {
                            builder.push_record([dimension.clone(), "-".into(), String::new(), e.to_string()]);
                        }
                    }
                }

                Ok(self.render_table(builder))
            }
            OutputFormat::Quiet => {
                let lines: Vec<String> = outcomes
                    .iter()
                    .map(|(dimension, outcome)| match outcome {
                        Ok(result) => format!("{}={}", dimension, render_value(result, registry)),
                        Err(_) => format!("{}=ERROR", dimension),
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a query answer.
    pub fn format_answer(&self, result: &QueryResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "answer": result.answer,
                    "answerable": result.answerable,
                    "sources": result.sources.iter().map(citation_json).collect::<Vec<_>>(),
                    "ungrounded": result.ungrounded,
                    "model": result.metadata.model_name,
                    "processingTimeMs": result.metadata.processing_time_ms,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                if !result.answerable {
                    return Ok(self.warning(&result.answer));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Page", "Evidence"]);
                for (i, citation) in result.sources.iter().enumerate() {
                    let marker = if result.ungrounded.contains(&i) { "?" } else { "" };
                    builder.push_record([
                        format!("{}{}", i + 1, marker),
                        citation.page.map_or_else(|| "?".to_string(), |p| p.to_string()),
                        truncate(citation.text.as_deref().unwrap_or_default(), MAX_QUOTE_CHARS),
                    ]);
                }

                let mut out = result.answer.clone();
                if !result.sources.is_empty() {
                    out.push_str("\n\n");
                    out.push_str(&self.render_table(builder));
                }
                Ok(out)
            }
            OutputFormat::Quiet => Ok(result.answer.clone()),
        }
    }

    /// Format a successful load.
    pub fn document_loaded(&self, document: &LoadedDocument) -> String {
        self.success(&format!(
            "Loaded '{}' ({} page(s), id {})",
            document.name,
            document.corpus.len(),
            document.id
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render_value(result: &ClassificationResult, registry: &SchemaRegistry) -> String {
    match registry.get(result.dimension) {
        Ok(schema) => result.value.render(schema),
        Err(_) => result.value.tokens().join(", "),
    }
}

fn citation_json(citation: &Citation) -> Value {
    json!({ "page": citation.page, "text": citation.text })
}

fn citation_line(citation: &Citation) -> String {
    let page = citation.page.map_or_else(|| "p.?".to_string(), |p| format!("p.{}", p));
    match citation.text.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            format!("{}: \"{}\"", page, truncate(text.trim(), MAX_QUOTE_CHARS))
        }
        _ => page,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}
