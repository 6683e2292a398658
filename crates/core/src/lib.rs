pub mod apply;
pub mod article;
pub mod config;
pub mod enclosure;
pub mod enhancer;
pub mod error;
pub mod fetch;
pub mod inline;
pub mod mime;
pub mod opengraph;
pub mod srcset;
pub mod upgrade;

pub use apply::apply_og_metadata;
pub use article::{Article, Enclosure, ensure_row_content};
pub use config::{EnhanceConfig, EnhanceConfigBuilder};
pub use enclosure::fix_enclosure_types;
pub use enhancer::{Enhancer, article_has_images, should_fetch};
pub use error::{LustreError, Result};
pub use fetch::{FetchConfig, PageFetcher};
#[cfg(feature = "fetch")]
pub use fetch::{HttpFetcher, fetch_url};
pub use fetch::{fetch_file, fetch_stdin};
pub use inline::{InlineResult, Modification, enhance_inline_images};
pub use mime::infer_mime_type;
pub use opengraph::{MetaKey, OgMetadata, extract_og_metadata};
pub use srcset::{DescriptorKind, SrcsetCandidate, parse_srcset, resolve_highest};
pub use upgrade::{
    PageImage, extract_page_images, is_same_image_different_size, match_and_upgrade_url, normalize_size_path,
    upgrade_enclosure_urls,
};
