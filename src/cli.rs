use crate::error::Error;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Generate an OpenAPI document from Express-style route registrations
#[derive(Parser, Debug)]
#[command(name = "openapi-from-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the route registration source file
    #[arg(value_name = "ROUTES_FILE", default_value = "server/routes.ts")]
    pub routes_file: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path [default: docs/openapi.json, or docs/openapi.yaml for yaml]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Name of the router object whose calls register routes
    #[arg(short = 'r', long = "receiver", default_value = "app")]
    pub receiver: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl CliArgs {
    /// The output path, falling back to `docs/openapi.<ext>`
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| {
            let file_name = match self.output_format {
                OutputFormat::Json => "openapi.json",
                OutputFormat::Yaml => "openapi.yaml",
            };
            PathBuf::from("docs").join(file_name)
        })
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.routes_file.is_file() {
        return Err(Error::InputNotFound {
            path: args.routes_file.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a readable file"),
        }
        .into());
    }

    if args.receiver.trim().is_empty() {
        anyhow::bail!("Receiver name must not be empty");
    }

    info!("Routes file: {}", args.routes_file.display());
    info!("Output format: {:?}", args.output_format);
    info!("Output file: {}", args.resolved_output_path().display());
    info!("Receiver: {}", args.receiver);

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::extractor::express::ExpressExtractor;
    use crate::pipeline::generate;
    use crate::report::Statistics;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting OpenAPI document generation...");

    // Step 1: Read the route source
    info!("Reading {}...", args.routes_file.display());
    let source = fs::read_to_string(&args.routes_file).map_err(|source| Error::InputNotFound {
        path: args.routes_file.clone(),
        source,
    })?;
    debug!("Read {} bytes", source.len());

    // Step 2: Extract, classify and synthesize
    info!("Parsing route definitions...");
    let extractor = ExpressExtractor::new(&args.receiver)?;
    let generation = generate(&source, &extractor);
    info!("Found {} API endpoints", generation.routes.len());

    // Step 3: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&generation.document)?,
        OutputFormat::Yaml => serialize_yaml(&generation.document)?,
    };

    // Step 4: Write the document
    let output_path = args.resolved_output_path();
    write_to_file(&content, &output_path)?;
    info!("OpenAPI document written to {}", output_path.display());

    // Step 5: Display summary
    let stats = Statistics::from_routes(&generation.routes);
    println!("{}", stats.render(&output_path));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = CliArgs::try_parse_from(["openapi-from-routes"]).unwrap();

        assert_eq!(args.routes_file, PathBuf::from("server/routes.ts"));
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.receiver, "app");
        assert!(!args.verbose);
        assert_eq!(args.resolved_output_path(), PathBuf::from("docs/openapi.json"));
    }

    #[test]
    fn test_yaml_default_output_path() {
        let args = CliArgs::try_parse_from(["openapi-from-routes", "routes.ts", "-f", "yaml"]).unwrap();

        assert_eq!(args.resolved_output_path(), PathBuf::from("docs/openapi.yaml"));
    }

    #[test]
    fn test_explicit_arguments() {
        let args = CliArgs::try_parse_from([
            "openapi-from-routes",
            "src/routes.ts",
            "-o",
            "out/api.json",
            "--receiver",
            "router",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.routes_file, PathBuf::from("src/routes.ts"));
        assert_eq!(args.resolved_output_path(), PathBuf::from("out/api.json"));
        assert_eq!(args.receiver, "router");
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_routes_file_is_rejected() {
        let args = CliArgs::try_parse_from(["openapi-from-routes", "does/not/exist.ts"]).unwrap();
        let err = parse_args_from_parsed(args).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InputNotFound { .. })
        ));
    }
}
