//! OpenAPI From Routes - OpenAPI documentation from route registration source.
//!
//! This library scans the source text of an Express-style server (`app.get("/path",
//! middleware, async (req, res) => ...)`) and produces an OpenAPI 3.0 document describing
//! every registered endpoint. Extraction is lexical and best-effort; it does not parse or
//! type-check the host language.
//!
//! # Architecture
//!
//! 1. [`tokenizer`] - Splits middleware argument lists, respecting nested calls
//! 2. [`extractor`] - Finds route registrations in source text
//! 3. [`classifier`] - Derives tags, summaries, path parameters and auth requirements
//! 4. [`openapi_builder`] - Groups routes into paths and assembles the document
//! 5. [`schemas`] - Schema objects and the shared component schemas
//! 6. [`pipeline`] - Runs the stages above end to end
//! 7. [`serializer`] - Serializes the document to JSON or YAML and writes it out
//! 8. [`report`] - Summary statistics for the console
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_routes::{
//!     extractor::express::ExpressExtractor,
//!     pipeline::generate,
//!     serializer::serialize_json,
//! };
//!
//! let source = r#"
//!     app.get("/api/customers/:id", requireAuth, async (req, res) => {
//!         res.json(await storage.getCustomer(req.params.id));
//!     });
//! "#;
//!
//! let generation = generate(source, &ExpressExtractor::default());
//! assert!(generation.document.paths.contains_key("/api/customers/{id}"));
//!
//! let json = serialize_json(&generation.document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod tokenizer;
pub mod extractor;
pub mod classifier;
pub mod schemas;
pub mod openapi_builder;
pub mod pipeline;
pub mod report;
pub mod serializer;
pub mod error;
