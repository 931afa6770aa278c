//! Record formatters
//!
//! Two output formats are supported:
//! - Json: one object per line, built from the configured field templates
//! - Text: `timestamp | LEVEL | name | message`

use super::error::{LodgeError, Result};
use super::log_record::LogRecord;
use super::template::Template;
use serde_json::{Map, Value};

/// Layout of text-mode records
pub const TEXT_FORMAT: &str = "%(asctime)s | %(levelname)s | %(name)s | %(message)s";

/// A compiled JSON field template, mirroring the shape of the configured map
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTemplate {
    /// Non-string scalar or placeholder-free string, emitted as is
    Literal(Value),
    Text(Template),
    Array(Vec<FieldTemplate>),
    Object(Vec<(String, FieldTemplate)>),
}

impl FieldTemplate {
    fn compile(value: &Value, variable: &str) -> Result<Self> {
        let compiled = match value {
            Value::String(text) => {
                let template = Template::compile(text)
                    .map_err(|e| LodgeError::config_parse(variable, e))?;
                match template.literal_text() {
                    Some(literal) => FieldTemplate::Literal(Value::String(literal)),
                    None => FieldTemplate::Text(template),
                }
            }
            Value::Array(items) => FieldTemplate::Array(
                items
                    .iter()
                    .map(|item| Self::compile(item, variable))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => FieldTemplate::Object(
                map.iter()
                    .map(|(key, item)| Self::compile(item, variable).map(|field| (key.clone(), field)))
                    .collect::<Result<_>>()?,
            ),
            scalar => FieldTemplate::Literal(scalar.clone()),
        };
        Ok(compiled)
    }

    fn render(&self, record: &LogRecord) -> Value {
        match self {
            FieldTemplate::Literal(value) => value.clone(),
            FieldTemplate::Text(template) => Value::String(template.render(record)),
            FieldTemplate::Array(items) => {
                Value::Array(items.iter().map(|item| item.render(record)).collect())
            }
            FieldTemplate::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, item)| (key.clone(), item.render(record)))
                    .collect(),
            ),
        }
    }
}

/// Formatter attached to a stream appender
#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    /// Structured output: one JSON object per record
    Json(Vec<(String, FieldTemplate)>),

    /// Human-readable pipe-delimited output
    ///
    /// Example: `2025-01-08 10:30:45,123 | INFO | app.db | Connected`
    Text(Template),
}

impl Formatter {
    /// Build a JSON formatter from an already-merged field map.
    ///
    /// `variable` names the source of the fields in error messages.
    pub fn json(fields: &Map<String, Value>, variable: &str) -> Result<Self> {
        Self::json_layered([(variable, fields)])
    }

    /// Build a JSON formatter from field maps applied in order.
    ///
    /// A key in a later layer overrides the same key in an earlier one and
    /// keeps the earlier key's position.
    pub fn json_layered<'a, I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a Map<String, Value>)>,
    {
        let mut compiled: Vec<(String, FieldTemplate)> = Vec::new();
        for (variable, fields) in layers {
            for (key, value) in fields {
                let field = FieldTemplate::compile(value, variable)?;
                match compiled.iter_mut().find(|(existing, _)| existing == key) {
                    Some(slot) => slot.1 = field,
                    None => compiled.push((key.clone(), field)),
                }
            }
        }
        Ok(Formatter::Json(compiled))
    }

    pub fn text() -> Self {
        Formatter::Text(Template::pipe_delimited())
    }

    /// Format a record into a single line, without the trailing newline.
    ///
    /// Trace text, if any, is not included; the appender writes it after the line.
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        match self {
            Formatter::Json(fields) => {
                let object: Map<String, Value> = fields
                    .iter()
                    .map(|(key, field)| (key.clone(), field.render(record)))
                    .collect();
                Ok(serde_json::to_string(&Value::Object(object))?)
            }
            Formatter::Text(template) => {
                let mut sanitized = record.clone();
                sanitized.message = sanitize_message(&record.message);
                Ok(template.render(&sanitized))
            }
        }
    }
}

/// Escape line breaks so one call always produces one text line
fn sanitize_message(message: &str) -> String {
    message.replace('\n', "\\n").replace('\r', "\\r")
}
