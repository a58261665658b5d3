//! Classification and enrichment of raw route records.
//!
//! Every derived field is a pure function of the raw record: the tag comes from the
//! first segment after `/api/`, the summary from the method and trailing literal
//! segment, the path parameters from `:name` placeholders, and the auth flag from the
//! middleware names.

use crate::extractor::{HttpMethod, RawRoute};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// Fixed prefix under which the category segment is read.
const API_PREFIX: &str = "/api/";

/// Tag for paths outside [`API_PREFIX`].
pub const DEFAULT_TAG: &str = "General";

/// Middleware names that signal an authenticated route.
pub const AUTH_MARKERS: [&str; 3] = ["requireAuth", "requireAdmin", "requireSuperAdmin"];

/// Category labels keyed by the first segment after `/api/`.
const TAG_LABELS: &[(&str, &str)] = &[
    ("auth", "Authentication"),
    ("customers", "Customers"),
    ("leads", "Leads"),
    ("contacts", "Contacts"),
    ("companies", "Companies"),
    ("opportunities", "Opportunities"),
    ("pipeline", "Pipeline"),
    ("tasks", "Tasks"),
    ("inventory", "Inventory"),
    ("transactions", "Transactions"),
    ("activities", "Activities"),
    ("communications", "Communications"),
    ("voice", "Voice & Calling"),
    ("sms", "SMS"),
    ("email", "Email"),
    ("calendar", "Calendar"),
    ("analytics", "Analytics"),
    ("settings", "Settings"),
    ("organization", "Organization"),
    ("users", "Users"),
    ("webhooks", "Webhooks"),
    ("integrations", "Integrations"),
    ("ai", "AI Features"),
    ("notifications", "Notifications"),
    ("browse-ai-data-sources", "Job Site Prospecting"),
    ("xlsx-data-sources", "XLSX Data Sources"),
    ("service-areas", "Service Areas"),
    ("snowflake", "Snowflake Integration"),
];

/// Matches a `:name` path placeholder.
pub(crate) fn path_param_pattern() -> &'static Regex {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    PARAM_RE.get_or_init(|| Regex::new(r":([a-zA-Z0-9_]+)").expect("Invalid regex"))
}

/// A raw route with the fields needed to document it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRoute {
    pub method: HttpMethod,
    pub path: String,
    pub middleware: Vec<String>,
    /// Category label used for grouping operations
    pub tag: String,
    /// `:name` placeholders in left-to-right order
    pub path_parameters: Vec<PathParameter>,
    pub requires_auth: bool,
    /// Short human-readable description, e.g. "List Customers"
    pub summary: String,
}

/// A path placeholder and its generated description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParameter {
    pub name: String,
    pub description: String,
}

/// Enriches a raw route record.
pub fn classify(route: RawRoute) -> EnrichedRoute {
    let tag = extract_tag(&route.path);
    let path_parameters = extract_path_parameters(&route.path);
    let requires_auth = requires_auth(&route.middleware);
    let summary = generate_summary(route.method, &route.path);

    debug!(
        "Classified {} {} as '{}' ({}, auth: {})",
        route.method, route.path, summary, tag, requires_auth
    );

    EnrichedRoute {
        method: route.method,
        path: route.path,
        middleware: route.middleware,
        tag,
        path_parameters,
        requires_auth,
        summary,
    }
}

/// Enriches every route, keeping order.
pub fn classify_all(routes: Vec<RawRoute>) -> Vec<EnrichedRoute> {
    routes.into_iter().map(classify).collect()
}

/// Derives the category tag from the first segment after `/api/`.
pub fn extract_tag(path: &str) -> String {
    let Some(segment) = path
        .strip_prefix(API_PREFIX)
        .and_then(|rest| rest.split('/').next())
        .filter(|segment| !segment.is_empty())
    else {
        return DEFAULT_TAG.to_string();
    };

    TAG_LABELS
        .iter()
        .find(|(key, _)| *key == segment)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| capitalize(segment))
}

/// Builds a summary such as "List Customers" or "Get Service Areas".
pub fn generate_summary(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let resource = segments
        .iter()
        .rev()
        .find(|s| !s.starts_with(':'))
        .copied()
        .unwrap_or("resource");

    let action = match method {
        HttpMethod::Get if segments.last().is_some_and(|s| s.starts_with(':')) => "Get",
        HttpMethod::Get => "List",
        HttpMethod::Post => "Create",
        HttpMethod::Put | HttpMethod::Patch => "Update",
        HttpMethod::Delete => "Delete",
    };

    let resource_name = resource
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    format!("{} {}", action, resource_name)
}

/// Collects `:name` placeholders with generated descriptions.
pub fn extract_path_parameters(path: &str) -> Vec<PathParameter> {
    path_param_pattern()
        .captures_iter(path)
        .filter_map(|caps| caps.get(1))
        .map(|name| PathParameter {
            name: name.as_str().to_string(),
            description: format!("{} identifier", capitalize(name.as_str())),
        })
        .collect()
}

/// True if any middleware reference mentions one of the [`AUTH_MARKERS`].
pub fn requires_auth(middleware: &[String]) -> bool {
    middleware
        .iter()
        .any(|m| AUTH_MARKERS.iter().any(|marker| m.contains(marker)))
}

/// Uppercases the first character, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
