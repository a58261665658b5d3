use crate::classifier::{path_param_pattern, EnrichedRoute};
use crate::extractor::HttpMethod;
use crate::schemas::{shared_schemas, Schema};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use regex::Captures;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the cookie-based security scheme.
pub const SECURITY_SCHEME: &str = "cookieAuth";

const JSON_MEDIA_TYPE: &str = "application/json";

const API_TITLE: &str = "Quinn CRM API";
const API_VERSION: &str = "1.0.0";
const API_DESCRIPTION: &str = "\
AI-powered CRM API for equipment rental businesses. Quinn streamlines customer management,
sales pipeline tracking, inventory management, and communication workflows with intelligent
automation and insights.

## Authentication

Quinn uses session-based authentication with HTTP-only cookies. To authenticate:

1. Call `POST /api/auth/login` with email and password
2. Receive a session cookie (`sessionId`)
3. Include this cookie in all subsequent requests

## Multi-Tenant Architecture

All API endpoints are scoped to your organization. When authenticated, your requests
automatically access only your organization's data.

## Rate Limiting

API endpoints are rate-limited to prevent abuse. Standard limits:
- Authentication endpoints: 10 requests/minute
- Read operations: 100 requests/minute
- Write operations: 50 requests/minute

## Webhooks

Quinn supports webhooks for real-time integrations:
- Twilio (voice/SMS): `/api/webhooks/twilio/*`
- Gmail: `/api/webhooks/gmail/pubsub`
- Outlook: `/api/webhooks/outlook/email`
- Vapi (voice agent): `/api/webhooks/vapi`
- Aircall: `/api/webhooks/aircall`

All webhooks require signature validation for security.";

/// Fixed response set: status code and description.
const RESPONSES: [(&str, &str); 5] = [
    ("200", "Successful response"),
    ("400", "Bad request"),
    ("401", "Unauthorized"),
    ("404", "Not found"),
    ("500", "Internal server error"),
];

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// Paths collection (normalized path -> PathItem), in first-seen order
    paths: IndexMap<String, PathItem>,
    /// Tags seen so far, in first-seen order
    tags: IndexSet<String>,
    /// Operation IDs already handed out
    operation_ids: HashSet<String>,
}

/// OpenAPI PathItem object - lowercase method name to operation
pub type PathItem = IndexMap<String, Operation>;

/// Security requirement, e.g. `{ "cookieAuth": [] }`
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
}

/// OpenAPI Server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI Tag object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub summary: String,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    pub tags: Vec<String>,
    /// Responses keyed by status code
    pub responses: IndexMap<String, Response>,
    /// Present only for routes guarded by auth middleware
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Path parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body, for POST/PUT/PATCH only
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Parameter location (always "path" here)
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub schema: Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: IndexMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Schema,
}

/// OpenAPI Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// OpenAPI SecurityScheme object (API key flavour)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(rename = "in")]
    pub location: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI Components object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
    pub schemas: IndexMap<String, Schema>,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    /// Distinct operation tags, sorted by name
    pub tags: Vec<Tag>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

impl OpenApiBuilder {
    pub fn new() -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            paths: IndexMap::new(),
            tags: IndexSet::new(),
            operation_ids: HashSet::new(),
        }
    }

    /// Add a route to the OpenAPI document.
    ///
    /// A later route with the same normalized path and method replaces the earlier one.
    pub fn add_route(&mut self, route: &EnrichedRoute) {
        let openapi_path = normalize_path(&route.path);
        let method_key = route.method.as_key();
        debug!("Adding route: {} {} -> {}", route.method, route.path, openapi_path);

        self.tags.insert(route.tag.clone());

        let replaced_id = self
            .paths
            .get(&openapi_path)
            .and_then(|item| item.get(method_key))
            .map(|operation| operation.operation_id.clone());
        if let Some(id) = replaced_id {
            debug!("Replacing existing operation {} for {} {}", id, route.method, openapi_path);
            self.operation_ids.remove(&id);
        }

        let operation_id = self.claim_operation_id(route.method, &route.path);
        let operation = Self::build_operation(route, operation_id);

        self.paths
            .entry(openapi_path)
            .or_default()
            .insert(method_key.to_string(), operation);
    }

    /// Reserve an operation ID, suffixing `_2`, `_3`, ... if the plain one is taken.
    fn claim_operation_id(&mut self, method: HttpMethod, path: &str) -> String {
        let base = operation_id(method, path);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.operation_ids.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        if candidate != base {
            debug!("Operation ID {} already in use, using {}", base, candidate);
        }
        self.operation_ids.insert(candidate.clone());
        candidate
    }

    fn build_operation(route: &EnrichedRoute, operation_id: String) -> Operation {
        let security = route.requires_auth.then(|| {
            let mut requirement = SecurityRequirement::new();
            requirement.insert(SECURITY_SCHEME.to_string(), Vec::new());
            vec![requirement]
        });

        let parameters = (!route.path_parameters.is_empty()).then(|| {
            route
                .path_parameters
                .iter()
                .map(|p| Parameter {
                    name: p.name.clone(),
                    location: "path".to_string(),
                    required: true,
                    schema: Schema::typed("string"),
                    description: Some(p.description.clone()),
                })
                .collect()
        });

        let request_body = route.method.has_request_body().then(|| RequestBody {
            required: true,
            content: json_content(Schema::empty_object().with_description(format!(
                "Request body for {}",
                route.summary.to_lowercase()
            ))),
        });

        let responses = RESPONSES
            .iter()
            .map(|(status, description)| {
                let content = (*status == "200").then(|| json_content(Schema::typed("object")));
                (
                    status.to_string(),
                    Response {
                        description: description.to_string(),
                        content,
                    },
                )
            })
            .collect();

        Operation {
            summary: route.summary.clone(),
            operation_id,
            tags: vec![route.tag.clone()],
            responses,
            security,
            parameters,
            request_body,
        }
    }

    /// Build the final OpenAPI document
    pub fn build(self) -> OpenApiDocument {
        debug!(
            "Building final OpenAPI document with {} paths and {} tags",
            self.paths.len(),
            self.tags.len()
        );

        let mut tag_names: Vec<String> = self.tags.into_iter().collect();
        tag_names.sort();
        let tags = tag_names.into_iter().map(|name| Tag { name }).collect();

        OpenApiDocument {
            openapi: "3.0.0".to_string(),
            info: api_info(),
            servers: api_servers(),
            tags,
            paths: self.paths,
            components: components(),
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite `:param` placeholders to the OpenAPI `{param}` form.
pub fn normalize_path(path: &str) -> String {
    path_param_pattern()
        .replace_all(path, |caps: &Captures| format!("{{{}}}", &caps[1]))
        .into_owned()
}

/// Lowercase method plus the raw path with `/`, `:` and `-` replaced by `_`.
pub fn operation_id(method: HttpMethod, path: &str) -> String {
    let sanitized = path.replace(|c: char| matches!(c, '/' | ':' | '-'), "_");
    format!("{}_{}", method.as_key(), sanitized)
}

fn json_content(schema: Schema) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(JSON_MEDIA_TYPE.to_string(), MediaType { schema });
    content
}

fn api_info() -> Info {
    Info {
        title: API_TITLE.to_string(),
        version: API_VERSION.to_string(),
        description: Some(API_DESCRIPTION.to_string()),
        contact: Some(Contact {
            name: "Quinn Support".to_string(),
            email: "support@quinn.app".to_string(),
        }),
        license: Some(License {
            name: "Proprietary".to_string(),
        }),
    }
}

fn api_servers() -> Vec<Server> {
    vec![
        Server {
            url: "https://your-quinn-instance.replit.app".to_string(),
            description: Some("Production server".to_string()),
        },
        Server {
            url: "http://localhost:5000".to_string(),
            description: Some("Development server".to_string()),
        },
    ]
}

fn components() -> Components {
    let mut security_schemes = IndexMap::new();
    security_schemes.insert(
        SECURITY_SCHEME.to_string(),
        SecurityScheme {
            scheme_type: "apiKey".to_string(),
            location: "cookie".to_string(),
            name: "sessionId".to_string(),
            description: Some("Session cookie obtained via /api/auth/login".to_string()),
        },
    );

    Components {
        security_schemes,
        schemas: shared_schemas().clone(),
    }
}
