//! OpenAPI schema objects and the shared component schema library.
//!
//! The shared schemas describe the API's domain entities. They are authored here, not
//! derived from scanning, and are emitted unchanged in every generated document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// OpenAPI Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "uuid", "date-time", "email")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Enum values for enum types
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Required field names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    /// A schema of the given primitive type
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    /// An object schema with the given properties, in order
    pub fn object<I>(properties: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema)>,
    {
        Self {
            schema_type: Some("object".to_string()),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.to_string(), schema))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// An object schema with no declared properties
    pub fn empty_object() -> Self {
        Self::object(Vec::<(&'static str, Schema)>::new())
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_range(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn with_required(mut self, fields: &[&str]) -> Self {
        self.required = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }
}

fn string() -> Schema {
    Schema::typed("string")
}

fn uuid() -> Schema {
    string().with_format("uuid")
}

fn integer() -> Schema {
    Schema::typed("integer")
}

fn boolean() -> Schema {
    Schema::typed("boolean")
}

/// The shared component schemas, built once per process.
pub fn shared_schemas() -> &'static IndexMap<String, Schema> {
    static SHARED: OnceLock<IndexMap<String, Schema>> = OnceLock::new();
    SHARED.get_or_init(build_shared_schemas)
}

fn build_shared_schemas() -> IndexMap<String, Schema> {
    let mut schemas = IndexMap::new();

    schemas.insert(
        "Error".to_string(),
        Schema::object([("error", string().with_description("Error message"))])
            .with_required(&["error"]),
    );

    schemas.insert(
        "PaginationMeta".to_string(),
        Schema::object([
            ("currentPage", integer()),
            ("totalPages", integer()),
            ("totalItems", integer()),
            ("pageSize", integer()),
            ("hasNextPage", boolean()),
            ("hasPreviousPage", boolean()),
        ]),
    );

    schemas.insert(
        "Customer".to_string(),
        Schema::object([
            ("id", uuid()),
            ("organizationId", uuid()),
            ("customerName", string()),
            ("email", string().with_format("email").nullable()),
            ("phone", string().nullable()),
            ("address1", string().nullable()),
            ("city", string().nullable()),
            ("state", string().nullable()),
            ("zipCode", string().nullable()),
            ("companyId", uuid().nullable()),
            ("ownerId", uuid().nullable()),
            (
                "lifetimeOrders",
                Schema::typed("number").with_description("Total lifetime transaction value"),
            ),
        ]),
    );

    schemas.insert(
        "Lead".to_string(),
        Schema::object([
            ("id", uuid()),
            ("organizationId", uuid()),
            ("leadName", string()),
            ("email", string().with_format("email").nullable()),
            ("phone", string().nullable()),
            ("companyName", string().nullable()),
            (
                "status",
                string().with_enum(&[
                    "new",
                    "contacted",
                    "qualified",
                    "negotiation",
                    "converted",
                    "lost",
                ]),
            ),
            ("assignedTo", uuid().nullable()),
            (
                "aiScore",
                integer()
                    .with_range(0, 7)
                    .with_description("AI-generated lead quality score (0-7)"),
            ),
        ]),
    );

    schemas.insert(
        "Opportunity".to_string(),
        Schema::object([
            ("id", uuid()),
            ("organizationId", uuid()),
            ("customerId", uuid().nullable()),
            ("contactId", uuid().nullable()),
            ("stageId", uuid()),
            ("estimatedValue", Schema::typed("number")),
            ("probability", integer().with_range(0, 100)),
            ("expectedCloseDate", string().with_format("date").nullable()),
            ("isArchived", boolean()),
        ]),
    );

    schemas.insert(
        "Task".to_string(),
        Schema::object([
            ("id", uuid()),
            ("organizationId", uuid()),
            ("title", string()),
            ("description", string().nullable()),
            ("assignedTo", uuid().nullable()),
            ("customerId", uuid().nullable()),
            ("leadId", uuid().nullable()),
            ("contactId", uuid().nullable()),
            ("dueDate", string().with_format("date-time").nullable()),
            ("priority", string().with_enum(&["low", "medium", "high"])),
            ("status", string().with_enum(&["pending", "completed"])),
            (
                "isAiGenerated",
                boolean().with_description("True if task was created by AI"),
            ),
        ]),
    );

    schemas
}
