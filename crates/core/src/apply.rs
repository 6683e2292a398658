//! Merging extracted Open Graph metadata into an article.
//!
//! Nothing the feed already provides is overwritten: an image enclosure is only
//! synthesized when none exists, the author is only filled when empty, and the
//! description is prepended to the content rather than replacing it.

use std::sync::LazyLock;

use regex::Regex;

use crate::article::{Article, Enclosure, display_title};
use crate::mime::infer_mime_type;
use crate::opengraph::OgMetadata;

/// Title given to a synthesized enclosure when the page has no `og:image:alt`.
pub const FEATURED_IMAGE_TITLE: &str = "Featured image";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("TAG_RE should compile"));

/// Applies `og` to `article`.
///
/// With `enhance_content`, a description longer than the article's visible text is
/// prepended as `<p>description</p><hr>`.
pub fn apply_og_metadata(article: &mut Article, og: &OgMetadata, enhance_content: bool) {
    if let Some(image) = &og.image
        && !article.has_image_enclosure()
    {
        let enclosure = Enclosure {
            link: image.clone(),
            content_type: infer_mime_type(image),
            length: 0,
            title: og.image_alt.clone().unwrap_or_else(|| FEATURED_IMAGE_TITLE.to_string()),
            ..Default::default()
        };
        article.enclosures.push(enclosure);
        tracing::debug!(url = %image, "Added og:image as enclosure");
    }

    if article.author.is_empty()
        && let Some(author) = og.author.as_deref().filter(|a| !a.is_empty())
    {
        article.author = author.to_string();
        tracing::debug!(author = %author, "Set author from Open Graph");
    }

    if enhance_content
        && let Some(description) = og.description.as_deref().filter(|d| !d.is_empty())
    {
        let content_len = strip_tags(article.content_str()).chars().count();
        if description.chars().count() > content_len {
            let escaped = html_escape::encode_safe(description);
            article.content = Some(format!("<p>{escaped}</p><hr>{}", article.content_str()));
            tracing::debug!(title = %display_title(&article.title), "Enhanced content with og:description");
        }
    }

    // Tags are not attached to the article yet.
    if !og.tags.is_empty() {
        tracing::debug!(tags = %og.tags.join(", "), "Found tags");
    }
}

/// Removes markup tags, keeping the text between them.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}
