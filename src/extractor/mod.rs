//! Route extraction module for scanning route registration source text.
//!
//! This module provides a unified interface for extracting raw route records from the
//! source of a web server. Each registration style has its own extractor implementation
//! that knows how to recognize its call sites.
//!
//! # Supported Registration Styles
//!
//! - **Express**: See [`express::ExpressExtractor`]
//!
//! # Example
//!
//! ```
//! use openapi_from_routes::extractor::{RouteExtractor, express::ExpressExtractor};
//!
//! let source = r#"app.get("/api/customers", requireAuth, async (req, res) => {});"#;
//! let routes = ExpressExtractor::default().extract_routes(source);
//! assert_eq!(routes.len(), 1);
//! ```

pub mod express;

use std::fmt;

/// Trait for extracting raw route records from route registration source text.
///
/// Extraction is lexical and lenient: source regions that do not match the expected
/// call shape contribute no record and raise no error.
pub trait RouteExtractor {
    /// Extracts all route registrations from `source`, in order of first appearance.
    fn extract_routes(&self, source: &str) -> Vec<RawRoute>;
}

/// One discovered endpoint registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRoute {
    /// The HTTP method for this route
    pub method: HttpMethod,
    /// The literal route template (e.g., "/api/customers/:id")
    pub path: String,
    /// Middleware references in source order
    pub middleware: Vec<String>,
}

/// HTTP methods recognized in route registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
}

impl HttpMethod {
    /// Parses a verb as written at the call site (`get`, `post`, ...). Case-insensitive.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    /// Uppercase method name, e.g. `GET`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Lowercase method name, as used for OpenAPI path item keys.
    pub fn as_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Whether requests with this method carry a body.
    pub fn has_request_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RawRoute {
    /// Create a new RawRoute
    pub fn new(method: HttpMethod, path: impl Into<String>, middleware: Vec<String>) -> Self {
        Self {
            method,
            path: path.into(),
            middleware,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verb() {
        assert_eq!(HttpMethod::from_verb("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_verb("DELETE"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_verb("Patch"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_verb("head"), None);
        assert_eq!(HttpMethod::from_verb("use"), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Put.as_key(), "put");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_has_request_body() {
        assert!(HttpMethod::Post.has_request_body());
        assert!(HttpMethod::Put.has_request_body());
        assert!(HttpMethod::Patch.has_request_body());
        assert!(!HttpMethod::Get.has_request_body());
        assert!(!HttpMethod::Delete.has_request_body());
    }
}
