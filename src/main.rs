//! OpenAPI From Routes - Command-line tool for generating OpenAPI documentation.
//!
//! This binary scans an Express-style route registration file, extracts every endpoint
//! and writes an OpenAPI 3.0 document for a documentation site to consume.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-routes [OPTIONS] [ROUTES_FILE]
//! ```
//!
//! # Examples
//!
//! Generate `docs/openapi.json` from `server/routes.ts`:
//! ```bash
//! openapi-from-routes
//! ```
//!
//! Generate YAML from a router module:
//! ```bash
//! openapi-from-routes src/api/router.ts -r router -f yaml -o api.yaml
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_routes::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI From Routes starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
