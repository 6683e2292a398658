//! Inline `<img>` rewriting for article content.
//!
//! Each `<img>` tag is rewritten on its own, with targeted pattern matching over the
//! raw markup instead of a DOM. Everything outside `<img>` tags, and every attribute
//! the steps below do not touch, is copied through byte for byte.
//!
//! Per tag, in order:
//! 1. `data-src` becomes `src` when the tag has no `src` yet.
//! 2. The best `srcset` candidate replaces the `src` value, or is inserted as a new
//!    `src` right after the tag name.
//! 3. `loading="lazy"` is dropped. Other `loading` values stay.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::srcset::resolve_highest;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\s+[^>]*?>").expect("IMG_TAG_RE should compile"));
static DATA_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)data-src\s*=\s*("[^"]+"|'[^']+')"#).expect("DATA_SRC_RE should compile")
});
static HAS_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\ssrc\s*=").expect("HAS_SRC_RE should compile"));
static SRC_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)src\s*=\s*(?:"[^"]*"|'[^']*'|([^\s"'=<>`]+)(=?))"#).expect("SRC_VALUE_RE should compile")
});
static SRCSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\ssrcset\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("SRCSET_RE should compile")
});
static LAZY_LOADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+loading\s*=\s*(?:"lazy"|'lazy'|lazy\b)"#).expect("LAZY_LOADING_RE should compile")
});

/// A change applied to an `<img>` tag, reported for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modification {
    /// `data-src` renamed to `src`.
    DataSrcToSrc,
    /// Existing `src` value replaced by the best srcset candidate.
    SrcsetToSrc,
    /// New `src` inserted from the best srcset candidate.
    AddedSrcFromSrcset,
    /// `loading="lazy"` removed.
    RemovedLazyLoading,
}

impl Modification {
    pub fn label(self) -> &'static str {
        match self {
            Self::DataSrcToSrc => "data-src->src",
            Self::SrcsetToSrc => "srcset->src",
            Self::AddedSrcFromSrcset => "added src from srcset",
            Self::RemovedLazyLoading => "removed loading=lazy",
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rewritten content plus the distinct modifications applied, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineResult {
    pub content: String,
    pub modifications: Vec<Modification>,
}

impl InlineResult {
    pub fn is_modified(&self) -> bool {
        !self.modifications.is_empty()
    }

    /// Comma-separated labels, e.g. `"data-src->src, removed loading=lazy"`.
    pub fn summary(&self) -> String {
        self.modifications.iter().map(|m| m.label()).collect::<Vec<_>>().join(", ")
    }
}

/// Rewrites every `<img>` tag in `html`.
///
/// # Example
///
/// ```rust
/// use lustre_core::enhance_inline_images;
///
/// let result = enhance_inline_images(r#"<img data-src="a.jpg" loading="lazy">"#);
/// assert_eq!(result.content, r#"<img src="a.jpg">"#);
/// ```
pub fn enhance_inline_images(html: &str) -> InlineResult {
    let mut modifications = Vec::new();

    let content = IMG_TAG_RE
        .replace_all(html, |caps: &Captures| enhance_img_tag(&caps[0], &mut modifications))
        .into_owned();

    let mut seen = Vec::with_capacity(modifications.len());
    for modification in modifications {
        if !seen.contains(&modification) {
            seen.push(modification);
        }
    }

    InlineResult { content, modifications: seen }
}

/// Applies the three rewrite steps to a single `<img ...>` tag.
pub fn enhance_img_tag(tag: &str, modifications: &mut Vec<Modification>) -> String {
    let mut tag = Cow::Borrowed(tag);

    if !HAS_SRC_RE.is_match(&tag) {
        let renamed = DATA_SRC_RE.captures(&tag).map(|caps| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            format!("{}{}src={}{}", &tag[..whole.start], &caps[1], &caps[2], &tag[whole.end..])
        });

        if let Some(rewritten) = renamed {
            tag = Cow::Owned(rewritten);
            modifications.push(Modification::DataSrcToSrc);
        }
    }

    let highest = SRCSET_RE
        .captures(&tag)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .and_then(|value| resolve_highest(value.as_str()));

    if let Some(url) = highest {
        if HAS_SRC_RE.is_match(&tag) {
            let mut replaced = false;
            let rewritten = SRC_VALUE_RE
                .replace_all(&tag, |caps: &Captures| {
                    // `src= alt="x"`: the unquoted run is the next attribute's name, not a value.
                    if caps.get(3).is_some_and(|m| !m.as_str().is_empty()) {
                        return caps[0].to_string();
                    }
                    replaced = true;
                    format!("{}src=\"{}\"", &caps[1], url)
                })
                .into_owned();

            if replaced {
                tag = Cow::Owned(rewritten);
                modifications.push(Modification::SrcsetToSrc);
            }
        } else {
            // IMG_TAG_RE guarantees the tag opens with the four bytes `<img`.
            let rewritten = format!("{} src=\"{}\"{}", &tag[..4], url, &tag[4..]);
            tag = Cow::Owned(rewritten);
            modifications.push(Modification::AddedSrcFromSrcset);
        }
    }

    if LAZY_LOADING_RE.is_match(&tag) {
        let rewritten = LAZY_LOADING_RE.replace_all(&tag, "").into_owned();
        tag = Cow::Owned(rewritten);
        modifications.push(Modification::RemovedLazyLoading);
    }

    tag.into_owned()
}
