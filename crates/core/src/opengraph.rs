//! Open Graph and Twitter Card metadata from fetched article pages.
//!
//! Only the `<head>` is scanned (up to and including the first `</head>`), or the
//! whole page when it has none. Each `<meta>` tag is keyed by `property`, falling back
//! to `name`, and dispatched through [`MetaKey`]. Open Graph values take precedence:
//! Twitter Card values only fill fields that are still empty. `twitter:image` is held
//! back until the scan ends so an `og:image` later in the head still wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\s+[^>]*>").expect("META_TAG_RE should compile"));
static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sproperty\s*=\s*(?:"([^"]+)"|'([^']+)')"#).expect("PROPERTY_RE should compile")
});
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sname\s*=\s*(?:"([^"]+)"|'([^']+)')"#).expect("NAME_RE should compile"));
static CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\scontent\s*=\s*(?:"([^"]+)"|'([^']+)')"#).expect("CONTENT_RE should compile")
});

/// Metadata found in a page's `<meta>` tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OgMetadata {
    pub image: Option<String>,
    pub image_width: Option<i64>,
    pub image_height: Option<i64>,
    pub image_alt: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub title: Option<String>,
    pub site_name: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub published_time: Option<String>,
}

impl OgMetadata {
    /// True when there is something worth applying to an article.
    ///
    /// `title`, `site_name` and `type` alone do not count.
    pub fn is_useful(&self) -> bool {
        self.image.is_some() || self.description.is_some() || self.author.is_some() || !self.tags.is_empty()
    }

    fn apply(&mut self, key: MetaKey, content: &str, twitter_image: &mut Option<String>) {
        match key {
            MetaKey::OgImage => {
                if self.image.is_none() {
                    self.image = Some(decode(content));
                }
            }
            MetaKey::TwitterImage => {
                if twitter_image.is_none() {
                    *twitter_image = Some(decode(content));
                }
            }
            MetaKey::OgImageWidth => self.image_width = Some(parse_leading_int(content)),
            MetaKey::OgImageHeight => self.image_height = Some(parse_leading_int(content)),
            MetaKey::OgImageAlt => self.image_alt = Some(decode(content)),
            MetaKey::OgDescription => self.description = Some(decode(content)),
            MetaKey::OgTitle => self.title = Some(decode(content)),
            MetaKey::OgSiteName => self.site_name = Some(decode(content)),
            MetaKey::OgType => self.og_type = Some(content.to_string()),
            MetaKey::ArticleAuthor => self.author = Some(decode(content)),
            MetaKey::ArticleTag => self.tags.push(decode(content)),
            MetaKey::ArticlePublishedTime => self.published_time = Some(content.to_string()),
            MetaKey::TwitterDescription => {
                if self.description.is_none() {
                    self.description = Some(decode(content));
                }
            }
            MetaKey::TwitterAuthor => {
                if self.author.is_none() {
                    self.author = Some(decode(content));
                }
            }
            MetaKey::Unknown => {}
        }
    }
}

/// The `<meta>` keys the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    OgImage,
    OgImageWidth,
    OgImageHeight,
    OgImageAlt,
    OgDescription,
    OgTitle,
    OgSiteName,
    OgType,
    /// `og:article:author` or `article:author`.
    ArticleAuthor,
    /// `og:article:tag` or `article:tag`.
    ArticleTag,
    /// `og:article:published_time` or `article:published_time`.
    ArticlePublishedTime,
    TwitterImage,
    TwitterDescription,
    /// `twitter:creator` or `twitter:site`.
    TwitterAuthor,
    Unknown,
}

impl MetaKey {
    /// Classifies a `property`/`name` value, case-insensitively.
    pub fn parse(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "og:image" => Self::OgImage,
            "og:image:width" => Self::OgImageWidth,
            "og:image:height" => Self::OgImageHeight,
            "og:image:alt" => Self::OgImageAlt,
            "og:description" => Self::OgDescription,
            "og:title" => Self::OgTitle,
            "og:site_name" => Self::OgSiteName,
            "og:type" => Self::OgType,
            "og:article:author" | "article:author" => Self::ArticleAuthor,
            "og:article:tag" | "article:tag" => Self::ArticleTag,
            "og:article:published_time" | "article:published_time" => Self::ArticlePublishedTime,
            "twitter:image" => Self::TwitterImage,
            "twitter:description" => Self::TwitterDescription,
            "twitter:creator" | "twitter:site" => Self::TwitterAuthor,
            _ => Self::Unknown,
        }
    }
}

/// Extracts Open Graph / Twitter Card metadata from a page.
///
/// Returns `None` unless an image, description, author or tag was found.
///
/// # Example
///
/// ```rust
/// use lustre_core::extract_og_metadata;
///
/// let html = r#"<head><meta property="og:image" content="https://x/a.jpg"></head>"#;
/// let og = extract_og_metadata(html).unwrap();
/// assert_eq!(og.image.as_deref(), Some("https://x/a.jpg"));
///
/// assert!(extract_og_metadata(r#"<meta property="og:type" content="website">"#).is_none());
/// ```
pub fn extract_og_metadata(html: &str) -> Option<OgMetadata> {
    let head = head_section(html);
    let mut og = OgMetadata::default();
    let mut twitter_image = None;

    for tag in META_TAG_RE.find_iter(head) {
        let tag = tag.as_str();
        let Some(content) = attr_value(&CONTENT_RE, tag) else {
            continue;
        };
        let Some(key) = attr_value(&PROPERTY_RE, tag).or_else(|| attr_value(&NAME_RE, tag)) else {
            continue;
        };

        og.apply(MetaKey::parse(key), content, &mut twitter_image);
    }

    if og.image.is_none() {
        og.image = twitter_image;
    }

    og.is_useful().then_some(og)
}

/// Everything up to and including the first `</head>`, or the whole page.
fn head_section(html: &str) -> &str {
    const HEAD_CLOSE: &str = "</head>";

    html.to_ascii_lowercase()
        .find(HEAD_CLOSE)
        .map_or(html, |start| &html[..start + HEAD_CLOSE.len()])
}

fn attr_value<'a>(re: &Regex, tag: &'a str) -> Option<&'a str> {
    let caps = re.captures(tag)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

fn decode(value: &str) -> String {
    html_escape::decode_html_entities(value).into_owned()
}

/// Integer prefix of a string the way lenient numeric casts read it: `"630px"` is
/// 630, `"abc"` is 0.
fn parse_leading_int(value: &str) -> i64 {
    let value = value.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());

    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}
