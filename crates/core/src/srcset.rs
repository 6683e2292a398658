//! `srcset` attribute parsing and highest-resolution selection.
//!
//! Width (`300w`) and density (`2x`) descriptors are put on a single scale so that
//! mixed lists can be compared: widths count as-is, densities are multiplied by
//! [`DENSITY_SCALE`]. Under this scale `2x` ranks like `2000w`.

use std::sync::LazyLock;

use regex::Regex;

/// Multiplier that maps a density descriptor onto the width scale.
pub const DENSITY_SCALE: f64 = 1000.0;

static CANDIDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^(.+?)\s+(\d+(?:\.\d+)?)([wx])$").expect("CANDIDATE_RE should compile"));

/// Unit of a srcset descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// `w` descriptor, intrinsic width in pixels.
    Width,
    /// `x` descriptor, pixel density.
    Density,
}

/// One `<url> <number>(w|x)` entry of a srcset list.
#[derive(Debug, Clone, PartialEq)]
pub struct SrcsetCandidate {
    pub url: String,
    pub descriptor_value: f64,
    pub descriptor_kind: DescriptorKind,
}

impl SrcsetCandidate {
    /// Parses one trimmed srcset segment. Returns `None` for bare URLs and
    /// malformed descriptors.
    pub fn parse(segment: &str) -> Option<Self> {
        let caps = CANDIDATE_RE.captures(segment)?;
        let descriptor_value = caps[2].parse::<f64>().ok()?;
        let descriptor_kind =
            if caps[3].eq_ignore_ascii_case("w") { DescriptorKind::Width } else { DescriptorKind::Density };

        Some(Self { url: caps[1].trim().to_string(), descriptor_value, descriptor_kind })
    }

    /// Position of this candidate on the unified width scale.
    pub fn score(&self) -> f64 {
        match self.descriptor_kind {
            DescriptorKind::Width => self.descriptor_value,
            DescriptorKind::Density => self.descriptor_value * DENSITY_SCALE,
        }
    }
}

/// Splits a srcset value into trimmed, non-empty segments.
pub fn srcset_segments(srcset: &str) -> impl Iterator<Item = &str> {
    srcset.split(',').map(str::trim).filter(|segment| !segment.is_empty())
}

/// Parses every well-formed candidate of a srcset value, skipping the rest.
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetCandidate> {
    srcset_segments(srcset).filter_map(SrcsetCandidate::parse).collect()
}

/// Picks the highest-resolution URL from a srcset value.
///
/// Scored candidates replace the current pick only when strictly better. A
/// segment without a usable descriptor is taken as a fallback, but only while
/// nothing has been picked yet, so it can never displace an earlier entry.
///
/// # Example
///
/// ```rust
/// use lustre_core::resolve_highest;
///
/// assert_eq!(resolve_highest("a.jpg 1200w, b.jpg 2x").as_deref(), Some("b.jpg"));
/// assert_eq!(resolve_highest("a.jpg 3000w, b.jpg 2x").as_deref(), Some("a.jpg"));
/// assert_eq!(resolve_highest("a.jpg, b.jpg").as_deref(), Some("a.jpg"));
/// assert_eq!(resolve_highest(",,"), None);
/// ```
pub fn resolve_highest(srcset: &str) -> Option<String> {
    let mut best_score = 0.0;
    let mut best_url: Option<String> = None;

    for segment in srcset_segments(srcset) {
        match SrcsetCandidate::parse(segment) {
            Some(candidate) => {
                let score = candidate.score();
                if score > best_score {
                    best_score = score;
                    best_url = Some(candidate.url);
                }
            }
            None => {
                if best_url.is_none() {
                    best_url = Some(segment.to_string());
                }
            }
        }
    }

    best_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_width_candidate() {
        let candidate = SrcsetCandidate::parse("image.jpg?w=300 300w").unwrap();
        assert_eq!(candidate.url, "image.jpg?w=300");
        assert_eq!(candidate.descriptor_kind, DescriptorKind::Width);
        assert_eq!(candidate.score(), 300.0);
    }

    #[test]
    fn test_parse_density_candidate() {
        let candidate = SrcsetCandidate::parse("retina.jpg 1.5X").unwrap();
        assert_eq!(candidate.descriptor_kind, DescriptorKind::Density);
        assert_eq!(candidate.score(), 1500.0);
    }

    #[test]
    fn test_parse_rejects_bare_and_malformed() {
        assert!(SrcsetCandidate::parse("image.jpg").is_none());
        assert!(SrcsetCandidate::parse("image.jpg abc").is_none());
        assert!(SrcsetCandidate::parse("image.jpg 300px").is_none());
        assert!(SrcsetCandidate::parse("300w").is_none());
    }

    #[test]
    fn test_resolve_width_descriptors() {
        let srcset = "small.jpg 300w, medium.jpg 768w, large.jpg 1200w";
        assert_eq!(resolve_highest(srcset), Some("large.jpg".to_string()));
    }

    #[test]
    fn test_resolve_unordered_widths() {
        let srcset = "large.jpg 1200w, small.jpg 300w, medium.jpg 768w";
        assert_eq!(resolve_highest(srcset), Some("large.jpg".to_string()));
    }

    #[test]
    fn test_resolve_density_descriptors() {
        assert_eq!(
            resolve_highest("image.jpg 1x, image@2x.jpg 2x, image@3x.jpg 3x"),
            Some("image@3x.jpg".to_string())
        );
        assert_eq!(resolve_highest("1x.jpg 1x, 2x.jpg 1.5x"), Some("2x.jpg".to_string()));
    }

    #[test]
    fn test_resolve_mixed_descriptors() {
        assert_eq!(resolve_highest("a 1200w, b 2x"), Some("b".to_string()));
        assert_eq!(resolve_highest("a 3000w, b 2x"), Some("a".to_string()));
    }

    #[test]
    fn test_equal_scores_keep_first() {
        assert_eq!(resolve_highest("a.jpg 2000w, b.jpg 2x"), Some("a.jpg".to_string()));
    }

    #[test]
    fn test_bare_urls_keep_first() {
        assert_eq!(resolve_highest("a.jpg, b.jpg"), Some("a.jpg".to_string()));
    }

    #[test]
    fn test_scored_candidate_overrides_bare() {
        assert_eq!(resolve_highest("image1.jpg abc, image2.jpg 1200w"), Some("image2.jpg".to_string()));
        assert_eq!(resolve_highest("fallback.jpg, real.jpg 1x"), Some("real.jpg".to_string()));
    }

    #[test]
    fn test_bare_never_overrides_scored() {
        assert_eq!(resolve_highest("real.jpg 800w, fallback.jpg"), Some("real.jpg".to_string()));
    }

    #[test]
    fn test_empty_and_comma_only() {
        assert_eq!(resolve_highest(""), None);
        assert_eq!(resolve_highest(",,"), None);
        assert_eq!(resolve_highest(" , , "), None);
    }

    #[test]
    fn test_trailing_and_duplicate_commas() {
        assert_eq!(resolve_highest("small.jpg 300w,, large.jpg 1200w,"), Some("large.jpg".to_string()));
    }

    #[test]
    fn test_multiline_srcset() {
        let srcset = "
            img-100.jpg 100w,
            img-2000.jpg 2000w,
            img-800.jpg 800w";
        assert_eq!(resolve_highest(srcset), Some("img-2000.jpg".to_string()));
    }

    #[test]
    fn test_zero_width_is_never_selected() {
        assert_eq!(resolve_highest("a.jpg 0w"), None);
    }

    #[test]
    fn test_parse_srcset_skips_malformed() {
        let candidates = parse_srcset("a.jpg 1x, broken, b.jpg 640w");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].url, "b.jpg");
    }
}
