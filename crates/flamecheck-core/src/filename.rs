//! Client filename handling.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

/// Image extensions the upload form advertises.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Reduces a client-supplied filename to a single safe path segment.
///
/// The name is NFKD-decomposed and whatever is still non-ASCII is dropped
/// (`café` becomes `cafe`). `/` and whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is removed (backslashes included), and leading
/// or trailing `.`/`_` are trimmed. The result never contains a separator
/// and may be empty.
pub fn sanitize_filename(raw: &str) -> String {
    let ascii: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = ascii
        .split(is_separator_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// ASCII whitespace plus the vertical tab and the information separators
/// `\x1c`..`\x1f`, which also split words in the upload form's filenames.
fn is_separator_space(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '\x0b' | '\x1c'..='\x1f')
}

/// Case-insensitive check against [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
