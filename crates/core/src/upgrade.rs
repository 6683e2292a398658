//! Upgrading image enclosures to the largest rendition found on the article page.
//!
//! Feeds often ship a thumbnail as the enclosure while the article page carries the
//! same picture in several sizes. Page images are matched to enclosures by file
//! name, or by comparing paths after known CDN and CMS size markers are removed.

use std::sync::LazyLock;

use regex::Regex;

use crate::article::{Article, display_title};
use crate::mime::{file_name, file_stem, url_path};
use crate::srcset::resolve_highest;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\s+[^>]*?>").expect("IMG_TAG_RE should compile"));
static SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\ssrc\s*=\s*["']([^"']+)["']"#).expect("SRC_RE should compile"));
static SRCSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\ssrcset\s*=\s*["']([^"']+)["']"#).expect("SRCSET_RE should compile"));

/// Size markers stripped from a path, applied in order.
static SIZE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // BBC style `/ws/240/`, also `/resize/1024x/`
        (r"(?i)/\d+[wx]?/", "/"),
        (r"(?i)_w\d+\.", "."),
        // WordPress `-300x200.jpg`
        (r"(?i)-\d+x\d+(\.[^.]+)$", "${1}"),
        (r"(?i)-(?:thumbnail|thumb|small|medium|large|xlarge|xxlarge|scaled|full)(\.[^.]+)$", "${1}"),
        (r"(?i)_(?:thumbnail|thumb|small|medium|large|xlarge|xxlarge|scaled|full)(\.[^.]+)$", "${1}"),
        (r"(?i)-\d+(\.[^.]+)$", "${1}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("size pattern should compile"), replacement))
    .collect()
});

/// An `<img>` found on the article page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageImage {
    pub src: Option<String>,
    /// Best candidate of `raw_srcset`.
    pub highest_res: Option<String>,
    pub raw_srcset: Option<String>,
}

impl PageImage {
    /// The URL an enclosure is upgraded to: the srcset winner, else `src`.
    pub fn best_url(&self) -> Option<&str> {
        self.highest_res.as_deref().or(self.src.as_deref())
    }

    fn candidates(&self) -> impl Iterator<Item = &str> {
        [self.highest_res.as_deref(), self.src.as_deref()]
            .into_iter()
            .flatten()
            .filter(|url| !url.is_empty())
    }
}

/// Collects every `<img>` in the document that has a `src` or a usable `srcset`.
pub fn extract_page_images(html: &str) -> Vec<PageImage> {
    IMG_TAG_RE
        .find_iter(html)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let src = SRC_RE.captures(tag).map(|caps| caps[1].to_string());
            let raw_srcset = SRCSET_RE.captures(tag).map(|caps| caps[1].to_string());
            let highest_res = raw_srcset.as_deref().and_then(resolve_highest);

            if src.is_none() && highest_res.is_none() {
                return None;
            }
            Some(PageImage { src, highest_res, raw_srcset })
        })
        .collect()
}

/// Finds the page image that shows the same picture as `enclosure_url`.
///
/// Page images are tried in document order and the first match wins. Returns `None`
/// when nothing matches or the enclosure URL has no path.
pub fn match_and_upgrade_url(enclosure_url: &str, page_images: &[PageImage]) -> Option<String> {
    let enc_path = url_path(enclosure_url)?;
    let enc_name = file_name(&enc_path);
    let enc_stem = file_stem(enc_name);

    for image in page_images {
        for candidate in image.candidates() {
            let Some(candidate_path) = url_path(candidate) else {
                continue;
            };
            let name = file_name(&candidate_path);

            if name == enc_name
                || file_stem(name) == enc_stem
                || is_same_image_different_size(enclosure_url, candidate)
            {
                return image.best_url().map(str::to_string);
            }
        }
    }

    None
}

/// Strips size markers from a URL path.
///
/// # Example
///
/// ```rust
/// use lustre_core::normalize_size_path;
///
/// assert_eq!(normalize_size_path("/ws/240/news/photo.jpg"), "/ws/news/photo.jpg");
/// assert_eq!(normalize_size_path("/uploads/photo-300x200.jpg"), "/uploads/photo.jpg");
/// ```
pub fn normalize_size_path(path: &str) -> String {
    SIZE_PATTERNS
        .iter()
        .fold(path.to_string(), |acc, (re, replacement)| re.replace_all(&acc, *replacement).into_owned())
}

/// True when both URLs have a path and the paths agree once size markers are removed.
pub fn is_same_image_different_size(url1: &str, url2: &str) -> bool {
    match (url_path(url1), url_path(url2)) {
        (Some(path1), Some(path2)) => normalize_size_path(&path1) == normalize_size_path(&path2),
        _ => false,
    }
}

/// Points image enclosures at the best matching page image. Returns the number upgraded.
pub fn upgrade_enclosure_urls(article: &mut Article, html: &str) -> usize {
    if article.enclosures.is_empty() {
        return 0;
    }

    let page_images = extract_page_images(html);
    if page_images.is_empty() {
        tracing::debug!("No images found on article page");
        return 0;
    }

    let mut upgraded = 0;
    for enclosure in article.enclosures.iter_mut() {
        if !enclosure.is_image() || enclosure.link.is_empty() {
            continue;
        }

        if let Some(url) = match_and_upgrade_url(&enclosure.link, &page_images)
            && url != enclosure.link
        {
            tracing::debug!(from = %enclosure.link, to = %url, "Upgrading enclosure URL");
            enclosure.link = url;
            upgraded += 1;
        }
    }

    if upgraded > 0 {
        tracing::debug!(count = upgraded, title = %display_title(&article.title), "Upgraded enclosures");
    }
    upgraded
}
