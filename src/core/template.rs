//! Record templates
//!
//! Field templates use `%(field)s` placeholders, the same shape operators
//! already write in `LOG_BASE_FIELDS`:
//!
//! - `%(message)s`, `%(name)s`, `%(levelname)s`: record text
//! - `%(levelno)d`, `%(lineno)d`, `%(process)d`: numeric fields
//! - `%(levelname)-5s`: left-aligned to a minimum width
//! - `%%`: a literal percent sign
//!
//! Templates are compiled once when a logger is configured, so an unknown
//! field fails configuration instead of the first log call.

use super::log_record::LogRecord;
use chrono::Local;
use std::fmt;

/// `asctime` layout: local time with millisecond precision
pub const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Largest padding width `format!` accepts
pub const MAX_WIDTH: usize = u16::MAX as usize;

/// Record attribute a placeholder can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Message,
    AscTime,
    LevelName,
    LevelNo,
    Name,
    Created,
    Msecs,
    Process,
    Thread,
    ThreadName,
    PathName,
    FileName,
    Module,
    LineNo,
}

impl RecordField {
    fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "message" => RecordField::Message,
            "asctime" => RecordField::AscTime,
            "levelname" => RecordField::LevelName,
            "levelno" => RecordField::LevelNo,
            "name" => RecordField::Name,
            "created" => RecordField::Created,
            "msecs" => RecordField::Msecs,
            "process" => RecordField::Process,
            "thread" => RecordField::Thread,
            "threadName" => RecordField::ThreadName,
            "pathname" => RecordField::PathName,
            "filename" => RecordField::FileName,
            "module" => RecordField::Module,
            "lineno" => RecordField::LineNo,
            _ => return None,
        };
        Some(field)
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            RecordField::LevelNo
                | RecordField::Created
                | RecordField::Msecs
                | RecordField::Process
                | RecordField::LineNo
        )
    }

    fn render(&self, record: &LogRecord, conversion: Conversion) -> String {
        match self {
            RecordField::Message => record.message.clone(),
            RecordField::AscTime => record
                .timestamp
                .with_timezone(&Local)
                .format(ASCTIME_FORMAT)
                .to_string(),
            RecordField::LevelName => record.level.label().to_string(),
            RecordField::LevelNo => record.level.number().to_string(),
            RecordField::Name => record.logger_name.clone(),
            RecordField::Created => match conversion {
                Conversion::Integer => record.timestamp.timestamp().to_string(),
                Conversion::Str => {
                    let micros = record.timestamp.timestamp_micros();
                    format!("{:.6}", micros as f64 / 1_000_000.0)
                }
            },
            RecordField::Msecs => record.timestamp.timestamp_subsec_millis().to_string(),
            RecordField::Process => std::process::id().to_string(),
            RecordField::Thread => record.thread_id.clone(),
            RecordField::ThreadName => record
                .thread_name
                .clone()
                .unwrap_or_else(|| record.thread_id.clone()),
            RecordField::PathName => record
                .file
                .clone()
                .unwrap_or_else(|| "(unknown file)".to_string()),
            RecordField::FileName => match &record.file {
                Some(file) => file_name(file).to_string(),
                None => "(unknown file)".to_string(),
            },
            RecordField::Module => match &record.file {
                Some(file) => {
                    let name = file_name(file);
                    name.strip_suffix(".rs").unwrap_or(name).to_string()
                }
                None => "unknown".to_string(),
            },
            RecordField::LineNo => record.line.unwrap_or(0).to_string(),
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Str,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    field: RecordField,
    conversion: Conversion,
    width: usize,
    left_align: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A compiled `%(field)s` template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile a template, rejecting unknown fields and conversions
    pub fn compile(text: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            match chars.next() {
                Some((_, '%')) => literal.push('%'),
                Some((_, '(')) => {
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some((_, ')')) => break,
                            Some((_, ch)) => key.push(ch),
                            None => {
                                return Err(format!("unterminated placeholder at offset {}", pos))
                            }
                        }
                    }
                    let field = RecordField::from_key(&key)
                        .ok_or_else(|| format!("unknown record field '{}'", key))?;

                    let left_align = chars.next_if(|(_, ch)| *ch == '-').is_some();
                    let mut width = 0usize;
                    while let Some((_, digit)) = chars.next_if(|(_, ch)| ch.is_ascii_digit()) {
                        width = width
                            .checked_mul(10)
                            .and_then(|w| w.checked_add(digit.to_digit(10).unwrap_or(0) as usize))
                            .filter(|w| *w <= MAX_WIDTH)
                            .ok_or_else(|| {
                                format!("width for field '{}' exceeds {}", key, MAX_WIDTH)
                            })?;
                    }

                    let conversion = match chars.next() {
                        Some((_, 's')) => Conversion::Str,
                        Some((_, 'd')) if field.is_numeric() => Conversion::Integer,
                        Some((_, 'd')) => {
                            return Err(format!("field '{}' is not numeric", key));
                        }
                        Some((_, other)) => {
                            return Err(format!(
                                "unsupported conversion '{}' for field '{}'",
                                other, key
                            ));
                        }
                        None => return Err(format!("missing conversion for field '{}'", key)),
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(Placeholder {
                        field,
                        conversion,
                        width,
                        left_align,
                    }));
                }
                _ => return Err(format!("incomplete format at offset {}", pos)),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// `asctime | levelname | name | message`, the text-mode layout
    pub fn pipe_delimited() -> Self {
        let field = |field| {
            Segment::Field(Placeholder {
                field,
                conversion: Conversion::Str,
                width: 0,
                left_align: false,
            })
        };
        let separator = || Segment::Literal(" | ".to_string());
        Self {
            segments: vec![
                field(RecordField::AscTime),
                separator(),
                field(RecordField::LevelName),
                separator(),
                field(RecordField::Name),
                separator(),
                field(RecordField::Message),
            ],
        }
    }

    /// True when the template contains no placeholders
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// The unescaped text of a placeholder-free template
    pub fn literal_text(&self) -> Option<String> {
        if !self.is_literal() {
            return None;
        }
        let mut text = String::new();
        for segment in &self.segments {
            if let Segment::Literal(literal) = segment {
                text.push_str(literal);
            }
        }
        Some(text)
    }

    pub fn render(&self, record: &LogRecord) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(placeholder) => {
                    let value = placeholder.field.render(record, placeholder.conversion);
                    if placeholder.left_align {
                        out.push_str(&format!("{:<width$}", value, width = placeholder.width));
                    } else {
                        out.push_str(&format!("{:>width$}", value, width = placeholder.width));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "{}", text.replace('%', "%%"))?,
                Segment::Field(p) => {
                    let key = match p.field {
                        RecordField::Message => "message",
                        RecordField::AscTime => "asctime",
                        RecordField::LevelName => "levelname",
                        RecordField::LevelNo => "levelno",
                        RecordField::Name => "name",
                        RecordField::Created => "created",
                        RecordField::Msecs => "msecs",
                        RecordField::Process => "process",
                        RecordField::Thread => "thread",
                        RecordField::ThreadName => "threadName",
                        RecordField::PathName => "pathname",
                        RecordField::FileName => "filename",
                        RecordField::Module => "module",
                        RecordField::LineNo => "lineno",
                    };
                    write!(f, "%({})", key)?;
                    if p.left_align {
                        write!(f, "-")?;
                    }
                    if p.width > 0 {
                        write!(f, "{}", p.width)?;
                    }
                    match p.conversion {
                        Conversion::Str => write!(f, "s")?,
                        Conversion::Integer => write!(f, "d")?,
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    fn record() -> LogRecord {
        let mut record = LogRecord::new(LogLevel::Warn, "pkg.module", "disk almost full");
        record.file = Some("src/storage/disk.rs".to_string());
        record.line = Some(42);
        record
    }

    #[test]
    fn test_render_placeholders() {
        let template = Template::compile("%(levelname)s %(name)s: %(message)s").unwrap();
        assert_eq!(template.render(&record()), "WARN pkg.module: disk almost full");
    }

    #[test]
    fn test_literal_template() {
        let template = Template::compile("yes").unwrap();
        assert!(template.is_literal());
        assert_eq!(template.literal_text().as_deref(), Some("yes"));
        assert_eq!(template.render(&record()), "yes");
    }

    #[test]
    fn test_percent_escape() {
        let template = Template::compile("100%% of %(levelno)d").unwrap();
        assert_eq!(template.render(&record()), "100% of 30");
    }

    #[test]
    fn test_width_and_alignment() {
        let template = Template::compile("[%(levelname)-5s][%(lineno)4d]").unwrap();
        assert_eq!(template.render(&record()), "[WARN ][  42]");
    }

    #[test]
    fn test_location_fields() {
        let template = Template::compile("%(pathname)s|%(filename)s|%(module)s").unwrap();
        assert_eq!(
            template.render(&record()),
            "src/storage/disk.rs|disk.rs|disk"
        );
    }

    #[test]
    fn test_asctime_layout() {
        let rendered = Template::compile("%(asctime)s").unwrap().render(&record());
        // 2025-01-08 10:30:45,123
        assert_eq!(rendered.len(), 23);
        assert_eq!(&rendered[19..20], ",");
    }

    #[test]
    fn test_compile_errors() {
        assert!(Template::compile("%(nope)s").unwrap_err().contains("nope"));
        assert!(Template::compile("%(message)d").is_err());
        assert!(Template::compile("%(message)x").is_err());
        assert!(Template::compile("%(message").is_err());
        assert!(Template::compile("50% done").is_err());
        assert!(Template::compile("%(message)99999999999999999999999s")
            .unwrap_err()
            .contains("message"));
        assert!(Template::compile("%(message)70000s").is_err());
    }

    #[test]
    fn test_widest_width_renders() {
        let template = Template::compile("%(levelname)65535s").unwrap();
        let rendered = template.render(&record());
        assert_eq!(rendered.len(), MAX_WIDTH);
        assert!(rendered.ends_with("WARN"));
    }

    #[test]
    fn test_display_round_trips_source() {
        let source = "%(asctime)s | %(levelname)-5s | %(message)s %%";
        assert_eq!(Template::compile(source).unwrap().to_string(), source);
    }
}
