//! Front-matter extraction
//!
//! Documents may start with a `---`-fenced metadata block. Only the `title`
//! key is used; it becomes the `heading` of every chunk from the document.

use regex::Regex;
use std::sync::OnceLock;

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^title:\s*"?([^"\n]*)"?\s*$"#).unwrap())
}

/// Split a raw document into `(heading, body)`.
///
/// The heading is the `title` value from a leading front-matter block, or
/// an empty string when the block or the key is absent. Documents without
/// front-matter are returned unchanged as the body.
pub fn split_front_matter(raw: &str) -> (String, String) {
    let Some(rest) = raw.strip_prefix("---") else {
        return (String::new(), raw.to_string());
    };
    // The opening fence must be a whole line
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (String::new(), raw.to_string());
    };

    let Some(end) = rest.find("\n---") else {
        // Unterminated front-matter: treat the whole document as body
        return (String::new(), raw.to_string());
    };

    let block = &rest[..end];
    let after = &rest[end + 4..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after)
        .to_string();

    let heading = title_regex()
        .captures(block)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    (heading, body)
}
