//! Serialization module for converting OpenAPI documents to JSON or YAML format.
//!
//! This module provides functions to serialize OpenAPI documents into standard formats
//! and write them to files.

use crate::error::{Error, Result};
use crate::openapi_builder::OpenApiDocument;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to JSON format with pretty printing.
///
/// The output is formatted with two-space indentation. Map ordering is fixed by the
/// document model, so identical documents always serialize to identical bytes.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
///
/// # Example
///
/// ```
/// use openapi_from_routes::openapi_builder::OpenApiBuilder;
/// use openapi_from_routes::serializer::serialize_json;
///
/// let doc = OpenApiBuilder::new().build();
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"openapi\": \"3.0.0\""));
/// ```
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serializes an OpenAPI document to YAML format.
///
/// # Errors
///
/// Returns [`Error::Yaml`] if serialization fails.
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Parent directories are created as needed.
///
/// # Arguments
///
/// * `content` - The string content to write
/// * `path` - The file path to write to
///
/// # Errors
///
/// Returns [`Error::OutputWriteFailure`] if a directory or the file cannot be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    let write_failure = |source| Error::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failure)?;
    }

    fs::write(path, content).map_err(write_failure)?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
