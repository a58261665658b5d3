//! Summary statistics printed after a successful run.

use crate::classifier::EnrichedRoute;
use indexmap::IndexMap;
use std::fmt::Write;
use std::path::Path;

/// How many categories the rendered summary lists.
pub const TOP_CATEGORIES: usize = 10;

/// Aggregate counts over the extracted routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// Number of extracted registrations, duplicates included
    pub total_endpoints: usize,
    /// Endpoint count per tag, highest first; ties keep first-seen order
    pub category_counts: Vec<(String, usize)>,
}

impl Statistics {
    pub fn from_routes(routes: &[EnrichedRoute]) -> Self {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for route in routes {
            *counts.entry(route.tag.as_str()).or_insert(0) += 1;
        }

        let mut category_counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        // stable, so equal counts keep the order categories first appear in
        category_counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total_endpoints: routes.len(),
            category_counts,
        }
    }

    pub fn category_count(&self) -> usize {
        self.category_counts.len()
    }

    /// Renders the console summary, including next steps for the written document.
    pub fn render(&self, output_path: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Statistics:");
        let _ = writeln!(out, "   Total endpoints: {}", self.total_endpoints);
        let _ = writeln!(out, "   Categories: {}", self.category_count());
        let _ = writeln!(out, "   Top categories:");
        for (tag, count) in self.category_counts.iter().take(TOP_CATEGORIES) {
            let _ = writeln!(out, "      - {}: {} endpoints", tag, count);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "OpenAPI generation complete!");
        let _ = writeln!(out, "   Next steps:");
        let _ = writeln!(out, "   1. Review {}", output_path.display());
        let _ = writeln!(out, "   2. Configure your documentation site to use this document");
        let _ = writeln!(out, "   3. Run: npx mintlify dev (to preview docs locally)");
        out
    }
}
