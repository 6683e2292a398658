//! MIME type inference from URLs.
//!
//! Feeds frequently ship enclosures with an empty `type`. This module guesses one
//! from the URL alone: `data:` URLs carry their own media type, everything else
//! is looked up by path extension. Unknown extensions fall back to `image/jpeg`.

use url::Url;

/// Fallback for data URLs without a media type and for unknown extensions.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Infers a MIME type from a URL. Never fails.
///
/// # Example
///
/// ```rust
/// use lustre_core::infer_mime_type;
///
/// assert_eq!(infer_mime_type("https://x/a.PNG"), "image/png");
/// assert_eq!(infer_mime_type("data:image/webp;base64,AAAA"), "image/webp");
/// assert_eq!(infer_mime_type("https://x/a"), "image/jpeg");
/// ```
pub fn infer_mime_type(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("data:") {
        let end = rest.find([';', ',']).unwrap_or(rest.len());
        let media_type = &rest[..end];
        return if media_type.is_empty() { DEFAULT_MIME_TYPE } else { media_type }.to_string();
    }

    url_path(url)
        .map(|path| extension(file_name(&path)).to_ascii_lowercase())
        .and_then(|ext| mime_for_extension(&ext))
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

/// Returns the path component of a URL with query and fragment removed.
///
/// Absolute URLs go through [`Url`], so their paths are normalized and
/// percent-encoded. Relative references (`images/a.jpg`, `//cdn/a.jpg`) have no
/// base to resolve against and are cut by hand. Opaque URLs (`data:`, `mailto:`)
/// and empty or root-only paths yield `None`.
pub fn url_path(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) if parsed.cannot_be_a_base() => return None,
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => relative_path(url.trim()).to_string(),
    };

    if path.is_empty() || path == "/" { None } else { Some(path) }
}

fn relative_path(reference: &str) -> &str {
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    let reference = &reference[..end];

    match reference.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map_or("", |slash| &authority_and_path[slash..]),
        None => reference,
    }
}

/// Last path segment, ignoring trailing slashes.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// File name without its final extension (`photo.tar.gz` -> `photo.tar`).
pub fn file_stem(name: &str) -> &str {
    name.rfind('.').map_or(name, |dot| &name[..dot])
}

/// Final extension of a file name without the dot, or `""`.
pub fn extension(name: &str) -> &str {
    name.rfind('.').map_or("", |dot| &name[dot + 1..])
}
