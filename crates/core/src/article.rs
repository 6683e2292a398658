//! Article and enclosure records handed over by the feed host.
//!
//! This module defines [`Article`] and [`Enclosure`], the only records that outlive a
//! single enrichment call. Both keep every field they do not know about in a
//! flattened `extra` map, so a host can round-trip its own fields (`guid`, feed ids,
//! scores) through the pipeline without loss or reordering.
//!
//! It also provides the content safety net: renderers downstream of the pipeline
//! require `content` to be a string, so [`Article::ensure_content`] and
//! [`ensure_row_content`] coerce a missing or null `content` to `""`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// A syndicated article (RSS item / Atom entry).
///
/// `content` is optional because hosts hand over `null` for items without a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub enclosures: Vec<Enclosure>,

    /// Host fields this crate does not interpret, in their original order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Media attached to an article. Identity is its position in [`Article::enclosures`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,

    /// MIME type; empty when the feed did not declare one.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub content_type: String,

    /// Size in bytes. Hosts send it as a number or a numeric string.
    #[serde(default, deserialize_with = "lenient_length")]
    pub length: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Maps an explicit `null` to the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `120394`, `120394.0`, `"120394"` or `null`. Anything unreadable is `0`.
fn lenient_length<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let length = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or_default(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or_default()
        }
        _ => 0,
    };
    Ok(length)
}

impl Enclosure {
    pub fn new(link: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self { link: link.into(), content_type: content_type.into(), ..Default::default() }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

impl Article {
    /// Parses an article from host JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the article back to host JSON.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Content as a string slice, `""` when absent.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn has_image_enclosure(&self) -> bool {
        self.enclosures.iter().any(Enclosure::is_image)
    }

    /// Coerces a missing `content` to `""`. Returns `true` when it had to.
    ///
    /// Any present string is kept as-is, including `""` and `"0"`.
    pub fn ensure_content(&mut self) -> bool {
        if self.content.is_some() {
            return false;
        }

        tracing::debug!(title = %display_title(&self.title), "Fixed null/missing content for article");
        self.content = Some(String::new());
        true
    }
}

/// Applies the content safety net to a raw renderer row.
///
/// Rows come in three shapes: `{"headline": {...}}`, `{"article": {...}}`, or the
/// article object itself. `headline` wins when both wrappers are present, and the
/// other wrapper is left alone. A wrapper that is not an object (`"article": null`)
/// and an empty row pass through unchanged.
///
/// # Example
///
/// ```rust
/// use lustre_core::ensure_row_content;
/// use serde_json::json;
///
/// let row = ensure_row_content(json!({"headline": {"title": "T", "content": null}}));
/// assert_eq!(row["headline"]["content"], "");
/// ```
pub fn ensure_row_content(mut row: Value) -> Value {
    let Some(fields) = row.as_object_mut() else {
        return row;
    };

    if fields.is_empty() {
        return row;
    }

    let target = if fields.contains_key("headline") {
        fields.get_mut("headline").and_then(Value::as_object_mut)
    } else if fields.contains_key("article") {
        fields.get_mut("article").and_then(Value::as_object_mut)
    } else {
        Some(fields)
    };

    if let Some(article) = target {
        let missing = article.get("content").is_none_or(Value::is_null);
        if missing {
            let title = article.get("title").and_then(Value::as_str).unwrap_or_default();
            tracing::debug!(title = %display_title(title), "Fixed null/missing content for article");
            article.insert("content".to_string(), Value::String(String::new()));
        }
    }

    row
}

pub(crate) fn display_title(title: &str) -> &str {
    if title.is_empty() { "unknown" } else { title }
}
