use crate::error::Result;
use crate::extractor::{HttpMethod, RawRoute, RouteExtractor};
use crate::tokenizer::split_middleware;
use regex::Regex;

use log::debug;

/// Extractor for Express-style registrations:
/// `app.get("/path", mw1, mw2, async (req, res) => { ... })`.
///
/// The receiver (`app` by default) is configurable so that `router.post(...)` style
/// sources can be scanned as well.
pub struct ExpressExtractor {
    receiver: String,
    /// Full registration: verb, path literal, middleware span, handler signature
    pattern: Regex,
    /// Just the `<receiver>.<verb>(` opening of a registration
    call_pattern: Regex,
}

impl ExpressExtractor {
    /// Creates an extractor that recognizes calls made on `receiver`.
    ///
    /// The receiver is matched literally; regex metacharacters are escaped. It must not
    /// be preceded by an identifier character or a `.`, so `app` does not match `webapp`.
    pub fn new(receiver: &str) -> Result<Self> {
        let receiver_call = format!(
            r"(?:^|[^\w$.]){}\.(get|post|put|delete|patch)\(",
            regex::escape(receiver)
        );
        let pattern = Regex::new(&format!(
            r#"{}\s*["']([^"']+)["']\s*,([\s\S]*?)(?:async\s*)?\(req[^)]*\)\s*=>"#,
            receiver_call
        ))?;
        let call_pattern = Regex::new(&receiver_call)?;
        debug!("Compiled route pattern for receiver '{}'", receiver);
        Ok(Self {
            receiver: receiver.to_string(),
            pattern,
            call_pattern,
        })
    }

    /// The receiver name this extractor matches.
    pub fn receiver(&self) -> &str {
        &self.receiver
    }
}

impl Default for ExpressExtractor {
    fn default() -> Self {
        Self::new("app").expect("Invalid regex")
    }
}

impl RouteExtractor for ExpressExtractor {
    fn extract_routes(&self, source: &str) -> Vec<RawRoute> {
        let mut routes = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.pattern.captures_at(source, pos) {
            let Some(whole) = caps.get(0) else {
                break;
            };
            let span = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

            if !self.is_argument_span(span) {
                // Not an inline-handler registration. Resume right after its start so the
                // registration the span ran into is still found.
                debug!("Skipping registration without inline handler at byte {}", whole.start());
                pos = whole.start() + next_char_len(&source[whole.start()..]);
                continue;
            }
            pos = whole.end();

            let (Some(verb), Some(path)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Some(method) = HttpMethod::from_verb(verb.as_str()) else {
                continue;
            };

            let path = path.as_str();
            if !path.starts_with('/') {
                debug!("Skipping {} registration with non-absolute path: {}", method, path);
                continue;
            }

            let middleware = split_middleware(span);

            debug!("Found route: {} {} {:?}", method, path, middleware);
            routes.push(RawRoute::new(method, path, middleware));
        }

        debug!("Extracted {} routes for receiver '{}'", routes.len(), self.receiver);
        routes
    }
}

impl ExpressExtractor {
    /// Whether `span` stays inside the registration's own argument list: it never closes
    /// the call's parenthesis and never reaches into another registration.
    fn is_argument_span(&self, span: &str) -> bool {
        let mut depth: i32 = 0;
        for ch in span.chars() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        !self.call_pattern.is_match(span)
    }
}

fn next_char_len(text: &str) -> usize {
    text.chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(source: &str) -> Vec<RawRoute> {
        ExpressExtractor::default().extract_routes(source)
    }

    #[test]
    fn test_simple_route_without_middleware() {
        let routes = extract(r#"app.get("/api/health", async (req, res) => { res.json({}) });"#);

        assert_eq!(routes, vec![RawRoute::new(HttpMethod::Get, "/api/health", vec![])]);
    }

    #[test]
    fn test_route_with_middleware_chain() {
        let source = r#"
            app.post("/api/customers/:id/files", requireAuth, upload.single('file'), requireAdmin, async (req, res) => {
                res.status(201).json({});
            });
        "#;
        let routes = extract(source);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].method, HttpMethod::Post);
        assert_eq!(routes[0].path, "/api/customers/:id/files");
        assert_eq!(
            routes[0].middleware,
            vec!["requireAuth", "upload.single('file')", "requireAdmin"]
        );
    }

    #[test]
    fn test_multiline_registration_with_typed_handler() {
        let source = r#"
  app.patch(
    '/api/leads/:leadId',
    requireAuth,
    async (req: AuthenticatedRequest, res: Response) => {
      res.json({ ok: true });
    }
  );
"#;
        let routes = extract(source);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].method, HttpMethod::Patch);
        assert_eq!(routes[0].path, "/api/leads/:leadId");
        assert_eq!(routes[0].middleware, vec!["requireAuth"]);
    }

    #[test]
    fn test_non_async_handler() {
        let routes = extract(r#"app.delete("/api/tasks/:id", requireAuth, (req, res) => res.sendStatus(204));"#);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].method, HttpMethod::Delete);
        assert_eq!(routes[0].middleware, vec!["requireAuth"]);
    }

    #[test]
    fn test_preserves_source_order() {
        let source = r#"
            app.get("/api/b", async (req, res) => {});
            app.put("/api/a/:id", async (req, res) => {});
            app.get("/api/c", async (req, res) => {});
        "#;
        let paths: Vec<_> = extract(source).into_iter().map(|r| r.path).collect();

        assert_eq!(paths, vec!["/api/b", "/api/a/:id", "/api/c"]);
    }

    #[test]
    fn test_dynamic_paths_are_skipped() {
        let source = r#"
            app.get(`/api/${prefix}/items`, async (req, res) => {});
            app.use("/api", apiRouter);
            const path = "/api/hidden";
            app.get(path, async (req, res) => {});
        "#;

        assert!(extract(source).is_empty());
    }

    #[test]
    fn test_relative_path_is_skipped() {
        assert!(extract(r#"app.get("api/relative", async (req, res) => {});"#).is_empty());
    }

    #[test]
    fn test_no_routes() {
        assert!(extract("").is_empty());
        assert!(extract("export function registerRoutes() { return null; }").is_empty());
    }

    #[test]
    fn test_named_handler_does_not_swallow_next_route() {
        let source = "app.get(\"/api/reports\", reportsController.list);\n\
                      app.delete(\"/api/customers/:id\", requireAuth, async (req, res) => {});";
        let routes = extract(source);

        assert_eq!(
            routes,
            vec![RawRoute::new(
                HttpMethod::Delete,
                "/api/customers/:id",
                vec!["requireAuth".to_string()],
            )]
        );
    }

    #[test]
    fn test_named_handler_with_middleware_is_skipped() {
        let source = r#"
            app.post("/api/imports", requireAdmin, importsController.create);
            app.get("/api/leads", async (req, res) => {});
            app.put("/api/leads/:id", requireAuth, leadsController.update);
            app.patch("/api/leads/:id", requireAuth, async (req, res) => {});
        "#;
        let found: Vec<_> = extract(source)
            .into_iter()
            .map(|r| (r.method, r.path, r.middleware))
            .collect();

        assert_eq!(
            found,
            vec![
                (HttpMethod::Get, "/api/leads".to_string(), vec![]),
                (
                    HttpMethod::Patch,
                    "/api/leads/:id".to_string(),
                    vec!["requireAuth".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn test_receiver_must_stand_alone() {
        let source = r#"
            webapp.get("/api/web", async (req, res) => {});
            myapp.post("/api/mine", async (req, res) => {});
            server.app.put("/api/nested", async (req, res) => {});
            app.get("/api/real", async (req, res) => {});
        "#;
        let paths: Vec<_> = extract(source).into_iter().map(|r| r.path).collect();

        assert_eq!(paths, vec!["/api/real"]);
    }

    #[test]
    fn test_custom_receiver() {
        let source = r#"
            router.get("/api/users", requireAdmin, async (req, res) => {});
            app.get("/api/ignored", async (req, res) => {});
        "#;
        let extractor = ExpressExtractor::new("router").unwrap();
        let routes = extractor.extract_routes(source);

        assert_eq!(extractor.receiver(), "router");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/api/users");
        assert_eq!(routes[0].middleware, vec!["requireAdmin"]);
    }

    #[test]
    fn test_receiver_is_escaped() {
        let extractor = ExpressExtractor::new("api.v1").unwrap();

        assert_eq!(
            extractor
                .extract_routes(r#"api.v1.get("/x", async (req, res) => {});"#)
                .len(),
            1
        );
        assert!(extractor
            .extract_routes(r#"apixv1.get("/x", async (req, res) => {});"#)
            .is_empty());
    }
}
