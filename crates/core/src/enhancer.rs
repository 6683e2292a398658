//! The per-article enrichment pipeline.
//!
//! [`Enhancer::process_article`] runs the enabled steps in a fixed order:
//!
//! 1. inline `<img>` rewriting of the content
//! 2. enclosure type repair
//! 3. one fetch of the article page, only when a page-based step can use it
//! 4. Open Graph extraction and merge, then enclosure upgrading
//!
//! A failed fetch is logged and skips step 4 only. Nothing in the pipeline can make
//! an article fail; the worst case is an article returned as it came in.

use std::sync::LazyLock;

use regex::Regex;

use crate::apply::apply_og_metadata;
use crate::article::{Article, display_title};
use crate::config::EnhanceConfig;
use crate::enclosure::fix_enclosure_types;
use crate::fetch::PageFetcher;
use crate::inline::enhance_inline_images;
use crate::opengraph::extract_og_metadata;
use crate::upgrade::upgrade_enclosure_urls;

static IMG_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\s").expect("IMG_OPEN_RE should compile"));

/// Runs the enrichment pipeline with a fixed config and page fetcher.
///
/// Holds no per-article state, so one `Enhancer` can serve any number of articles,
/// concurrently if the fetcher allows it.
///
/// # Example
///
/// ```rust,no_run
/// use lustre_core::{Article, EnhanceConfig, Enhancer, FetchConfig, HttpFetcher};
///
/// # async fn run() -> lustre_core::Result<()> {
/// let fetcher = HttpFetcher::new(FetchConfig::default())?;
/// let enhancer = Enhancer::new(EnhanceConfig::builder().extract_og(true).build(), fetcher);
///
/// let article = Article::from_json(r#"{"title": "T", "link": "https://example.com/post"}"#)?;
/// let article = enhancer.process_article(article).await;
/// println!("{}", article.enclosures.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Enhancer<F> {
    config: EnhanceConfig,
    fetcher: F,
}

impl<F: PageFetcher> Enhancer<F> {
    pub fn new(config: EnhanceConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// Enriches one article and hands it back.
    pub async fn process_article(&self, mut article: Article) -> Article {
        let config = self.config;

        if config.inline_enhancement && let Some(content) = article.content.as_deref() {
            let result = enhance_inline_images(content);
            if result.is_modified() {
                tracing::debug!(
                    title = %display_title(&article.title),
                    modifications = %result.summary(),
                    "Enhanced inline images"
                );
                article.content = Some(result.content);
            }
        }

        if config.fix_enclosure_type {
            let fixed = fix_enclosure_types(&mut article.enclosures);
            if fixed > 0 {
                tracing::debug!(count = fixed, title = %display_title(&article.title), "Fixed enclosure types");
            }
        }

        if !should_fetch(&config, &article) || article.link.is_empty() {
            return article;
        }

        let html = match self.fetcher.fetch(&article.link).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!(url = %article.link, error = %e, "Could not fetch article page");
                return article;
            }
        };

        if config.extract_og {
            match extract_og_metadata(&html) {
                Some(og) => {
                    tracing::debug!(url = %article.link, ?og, "Found Open Graph metadata");
                    apply_og_metadata(&mut article, &og, config.enhance_content);
                }
                None => tracing::debug!(url = %article.link, "No Open Graph metadata"),
            }
        }

        if config.upgrade_enclosures && !article.enclosures.is_empty() {
            upgrade_enclosure_urls(&mut article, &html);
        }

        article
    }
}

/// True when the article has an image enclosure or an `<img>` tag in its content.
pub fn article_has_images(article: &Article) -> bool {
    article.has_image_enclosure() || IMG_OPEN_RE.is_match(article.content_str())
}

/// Whether any enabled page-based step could use the article page.
///
/// Open Graph extraction is only worth a fetch for articles without images;
/// upgrading needs at least one enclosure.
pub fn should_fetch(config: &EnhanceConfig, article: &Article) -> bool {
    (config.extract_og && !article_has_images(article))
        || (config.upgrade_enclosures && !article.enclosures.is_empty())
}
