use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::formats::{BlogRecord, Media, MediaType, ProjectRecord, PublishedDate, RecordKind};

/// Why one entry of a collection file was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub reason: String,
}

/// A record type that can be recovered from a loosely-typed JSON entry.
pub trait Record: Clone {
    const KIND: RecordKind;

    fn from_value(value: &Value) -> Result<Self, String>;

    fn slug(&self) -> Option<&str>;

    fn title(&self) -> &str;

    /// Puts a validated collection into display order. Collections keep file
    /// order unless a type says otherwise.
    fn arrange(_records: &mut [Self]) {}
}

/// Outcome of validating a whole collection.
#[derive(Debug, Clone)]
pub struct Validated<R> {
    pub records: Vec<R>,
    pub rejected: Vec<Rejection>,
}

impl<R> Validated<R> {
    pub fn total(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

/// Keeps the well-formed entries of `value` in input order. Fails only when
/// `value` is not an array at all.
pub fn validate<R: Record>(value: &Value) -> Result<Validated<R>, PipelineError> {
    let Value::Array(entries) = value else {
        return Err(PipelineError::Format {
            found: json_type_name(value),
        });
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match R::from_value(entry) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::warn!(kind = R::KIND.label(), index, %reason, "dropping malformed record");
                rejected.push(Rejection { index, reason });
            }
        }
    }

    Ok(Validated { records, rejected })
}

impl Record for BlogRecord {
    const KIND: RecordKind = RecordKind::Blog;

    fn from_value(value: &Value) -> Result<Self, String> {
        let obj = as_object(value)?;
        let title = required_str(obj, "title")?;
        let raw_date = required_str(obj, "date")?;
        let summary = required_str(obj, "summary")?;
        let date = PublishedDate::parse(&raw_date)
            .ok_or_else(|| format!("date {raw_date:?} is not parseable"))?;

        Ok(Self {
            slug: optional_str(obj, "slug"),
            title,
            date,
            summary,
            category: optional_str(obj, "category"),
            media: lenient_media(obj),
            content: optional_str(obj, "content"),
        })
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn arrange(records: &mut [Self]) {
        crate::sort::newest_first(records);
    }
}

impl Record for ProjectRecord {
    const KIND: RecordKind = RecordKind::Project;

    fn from_value(value: &Value) -> Result<Self, String> {
        let obj = as_object(value)?;
        let title = required_str(obj, "title")?;
        let description = required_str(obj, "description")?;

        let tools = match obj.get("tools") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| "tools must only contain strings".to_owned())
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err("tools must be an array".to_owned()),
        };

        let github = required_str(obj, "github")?;
        let media = strict_media(obj)?;

        Ok(Self {
            slug: optional_str(obj, "slug"),
            title,
            description,
            tools,
            github,
            media,
            content: optional_str(obj, "content"),
        })
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, String> {
    value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", json_type_name(value)))
}

fn required_str(obj: &Map<String, Value>, field: &str) -> Result<String, String> {
    match obj.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(format!("{field} is empty")),
        Some(other) => Err(format!("{field} must be a string, got {}", json_type_name(other))),
        None => Err(format!("{field} is missing")),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Blog media is decorative: anything unusable is ignored instead of
/// rejecting the post.
fn lenient_media(obj: &Map<String, Value>) -> Option<Media> {
    let kind = obj.get("mediaType").and_then(Value::as_str).and_then(MediaType::parse)?;
    let path = optional_str(obj, "mediaPath")?;
    Some(Media { kind, path })
}

fn strict_media(obj: &Map<String, Value>) -> Result<Option<Media>, String> {
    let raw_kind = match obj.get("mediaType") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(format!(
                "mediaType must be a string, got {}",
                json_type_name(other)
            ));
        }
    };
    let kind = MediaType::parse(raw_kind)
        .ok_or_else(|| format!("mediaType {raw_kind:?} is not one of image, video"))?;
    let path = required_str(obj, "mediaPath")?;
    Ok(Some(Media { kind, path }))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
