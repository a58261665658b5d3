//! Depth-aware splitting of middleware argument lists.
//!
//! The text between a route's path literal and its handler callback is a comma-separated
//! list of middleware references. Some of those references are call expressions with
//! their own argument lists (`upload.single('file')`, `rateLimit(10, 60)`), so a naive
//! split on `,` would break them apart. The tokenizer tracks parenthesis depth and only
//! splits on commas at depth zero.

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// Matches the request/response parameter names of an inline handler signature.
fn handler_marker() -> &'static Regex {
    static HANDLER_RE: OnceLock<Regex> = OnceLock::new();
    HANDLER_RE.get_or_init(|| Regex::new(r"\b(?:req|res)\b").expect("Invalid regex"))
}

/// Splits a middleware argument span into individual middleware references.
///
/// Segments are trimmed. Empty segments are dropped, as are segments that look like
/// part of the handler signature (they mention `req` or `res` as a whole identifier).
///
/// Unbalanced parentheses are tolerated: the depth counter may go negative or never
/// return to zero, and splitting simply continues wherever the depth is zero.
///
/// # Example
///
/// ```
/// use openapi_from_routes::tokenizer::split_middleware;
///
/// let chain = split_middleware("requireAuth, upload.single('file'), requireAdmin");
/// assert_eq!(chain, vec!["requireAuth", "upload.single('file')", "requireAdmin"]);
/// ```
pub fn split_middleware(span: &str) -> Vec<String> {
    let mut middleware = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for ch in span.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                push_segment(&mut middleware, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    push_segment(&mut middleware, &current);

    if depth != 0 {
        debug!("Unbalanced parentheses in middleware span (depth {}): {:?}", depth, span);
    }

    middleware
}

fn push_segment(middleware: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if trimmed.is_empty() || handler_marker().is_match(trimmed) {
        return;
    }
    middleware.push(trimmed.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_call_is_not_split() {
        let chain = split_middleware("requireAuth, upload.single('file'), requireAdmin");
        assert_eq!(chain, vec!["requireAuth", "upload.single('file')", "requireAdmin"]);
    }

    #[test]
    fn test_comma_inside_arguments() {
        let chain = split_middleware(" rateLimit(10, 60), validate(schema, { strict: true }) ");
        assert_eq!(chain, vec!["rateLimit(10, 60)", "validate(schema, { strict: true })"]);
    }

    #[test]
    fn test_empty_span() {
        assert!(split_middleware("").is_empty());
        assert!(split_middleware("   ").is_empty());
        assert!(split_middleware(" , ,").is_empty());
    }

    #[test]
    fn test_trailing_comma_is_dropped() {
        // The span normally ends with the comma that precedes the handler.
        assert_eq!(split_middleware(" requireAuth, "), vec!["requireAuth"]);
    }

    #[test]
    fn test_handler_signature_segments_are_dropped() {
        let chain = split_middleware("requireAuth, function handler(req, res) { next() }");
        assert_eq!(chain, vec!["requireAuth"]);
    }

    #[test]
    fn test_names_containing_req_are_kept() {
        let chain = split_middleware("requireAuth, requireSuperAdmin, resolveTenant");
        assert_eq!(chain, vec!["requireAuth", "requireSuperAdmin", "resolveTenant"]);
    }

    #[test]
    fn test_unclosed_parenthesis_does_not_panic() {
        // Depth never returns to zero, so nothing after the open paren is split.
        let chain = split_middleware("requireAuth, upload.single('file', requireAdmin");
        assert_eq!(chain, vec!["requireAuth", "upload.single('file', requireAdmin"]);
    }

    #[test]
    fn test_extra_closing_parenthesis_does_not_panic() {
        // Depth goes negative; commas are no longer at depth zero.
        let chain = split_middleware("a), b, c");
        assert_eq!(chain, vec!["a), b, c"]);
    }
}
