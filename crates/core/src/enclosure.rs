//! Enclosure MIME type repair.

use crate::article::Enclosure;
use crate::mime::infer_mime_type;

/// Fills in `type` for enclosures that have a link but no declared type.
///
/// Declared types always win, even unusual ones. Returns how many enclosures were fixed.
pub fn fix_enclosure_types(enclosures: &mut [Enclosure]) -> usize {
    let mut fixed = 0;

    for enclosure in enclosures.iter_mut() {
        if !enclosure.content_type.is_empty() || enclosure.link.is_empty() {
            continue;
        }

        enclosure.content_type = infer_mime_type(&enclosure.link);
        fixed += 1;
        tracing::debug!(url = %enclosure.link, content_type = %enclosure.content_type, "Set enclosure type");
    }

    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixes_empty_types() {
        let mut enclosures = vec![
            Enclosure::new("https://example.com/a.jpg", ""),
            Enclosure::new("https://example.com/b.png", ""),
            Enclosure::new("https://example.com/c.mp3", ""),
        ];

        assert_eq!(fix_enclosure_types(&mut enclosures), 3);
        assert_eq!(enclosures[0].content_type, "image/jpeg");
        assert_eq!(enclosures[1].content_type, "image/png");
        assert_eq!(enclosures[2].content_type, "audio/mpeg");
    }

    #[test]
    fn test_declared_type_wins() {
        let mut enclosures = vec![Enclosure::new("https://example.com/a.png", "image/custom")];
        assert_eq!(fix_enclosure_types(&mut enclosures), 0);
        assert_eq!(enclosures[0].content_type, "image/custom");
    }

    #[test]
    fn test_extensionless_link_defaults_to_jpeg() {
        let mut enclosures = vec![Enclosure::new("https://x/a", "")];
        fix_enclosure_types(&mut enclosures);
        assert_eq!(enclosures[0].content_type, "image/jpeg");
    }

    #[test]
    fn test_empty_link_is_skipped() {
        let mut enclosures = vec![Enclosure::new("", "")];
        assert_eq!(fix_enclosure_types(&mut enclosures), 0);
        assert_eq!(enclosures[0].content_type, "");
    }

    #[test]
    fn test_data_url_enclosure() {
        let mut enclosures = vec![Enclosure::new("data:image/png;base64,iVBORw0KGgo=", "")];
        fix_enclosure_types(&mut enclosures);
        assert_eq!(enclosures[0].content_type, "image/png");
    }

    #[test]
    fn test_order_is_preserved() {
        let mut enclosures = vec![
            Enclosure::new("https://example.com/first.webp", ""),
            Enclosure::new("https://example.com/second.mp4", "video/mp4"),
            Enclosure::new("https://example.com/third.gif", ""),
        ];
        fix_enclosure_types(&mut enclosures);
        let links: Vec<_> = enclosures.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(
            links,
            vec!["https://example.com/first.webp", "https://example.com/second.mp4", "https://example.com/third.gif"]
        );
    }
}
