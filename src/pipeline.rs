//! End-to-end generation: source text to OpenAPI document.

use crate::classifier::{classify_all, EnrichedRoute};
use crate::extractor::RouteExtractor;
use crate::openapi_builder::{OpenApiBuilder, OpenApiDocument};
use log::{debug, warn};

/// Output of a generation run.
pub struct Generation {
    /// Every extracted route, enriched, in source order (duplicates included)
    pub routes: Vec<EnrichedRoute>,
    pub document: OpenApiDocument,
}

/// Runs extraction, classification and synthesis over `source`.
///
/// Finding no routes is not an error: the document is still complete, with an empty
/// path map and tag list.
pub fn generate(source: &str, extractor: &dyn RouteExtractor) -> Generation {
    let raw_routes = extractor.extract_routes(source);
    if raw_routes.is_empty() {
        warn!("No route registrations found in source");
    }

    let routes = classify_all(raw_routes);
    debug!("Classified {} routes", routes.len());

    let mut builder = OpenApiBuilder::new();
    for route in &routes {
        builder.add_route(route);
    }

    Generation {
        document: builder.build(),
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::express::ExpressExtractor;

    #[test]
    fn test_generate_empty_source() {
        let generation = generate("// no routes here", &ExpressExtractor::default());

        assert!(generation.routes.is_empty());
        assert!(generation.document.paths.is_empty());
        assert!(generation.document.tags.is_empty());
    }

    #[test]
    fn test_generate_keeps_duplicates_in_routes() {
        let source = r#"
            app.get("/api/x/:id", requireAuth, async (req, res) => {});
            app.get("/api/x/:id", async (req, res) => {});
        "#;
        let generation = generate(source, &ExpressExtractor::default());

        assert_eq!(generation.routes.len(), 2);
        assert_eq!(generation.document.paths.len(), 1);
        assert!(generation.document.paths["/api/x/{id}"]["get"].security.is_none());
    }
}
