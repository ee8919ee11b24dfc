//! @ai:module:intent CLI entry point for the property parser
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, parser, batch, output

use clap::{Parser, Subcommand, ValueEnum};
use kgprops::config::DEFAULT_CONFIG_FILE;
use kgprops::{batch, output, Config, EntityKind, OutputFormat, PropertyParser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kgprops")]
#[command(author, version, about = "Parse and check entity property annotations")]
struct Cli {
    /// Path to configuration file (defaults to ./kgprops.toml when present)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single annotation
    Parse {
        /// Raw annotation, marker included (e.g. "KGC:Serializable")
        annotation: String,

        /// Entity category; inferred from the marker when omitted
        #[arg(long, short)]
        kind: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Parse every entity listed in a TOML manifest
    Check {
        /// Path to the manifest
        manifest: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// List registered rules in lookup order
    Rules {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write the default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn load_config(path: Option<&Path>) -> kgprops::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
        None => Ok(Config::default()),
    }
}

fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kgprops=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Init { output } = &cli.command {
        return match Config::default().save(output) {
            Ok(()) => {
                println!("Wrote {}", output.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        };
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let registry = match config.build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut parser = PropertyParser::new(&config.grammar, &registry);

    match cli.command {
        Commands::Parse {
            annotation,
            kind,
            format,
        } => {
            let kind = match kind {
                Some(name) => match name.parse::<EntityKind>() {
                    Ok(kind) => kind,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::from(2);
                    }
                },
                None => match EntityKind::from_marker(&annotation) {
                    Some(kind) => kind,
                    None => {
                        eprintln!("Error: no entity marker found in `{}`, pass --kind", annotation);
                        return ExitCode::from(2);
                    }
                },
            };

            match parser.get_properties(&annotation, kind) {
                Ok(group) => {
                    println!("{}", output::format_group(&group, format.into()));
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {} ({})", e, parser.parsing_error());
                    ExitCode::from(1)
                }
            }
        }

        Commands::Check { manifest, format } => match batch::load_manifest(&manifest) {
            Ok(manifest) => {
                let report = batch::check_manifest(&manifest, &mut parser);
                println!("{}", output::format_report(&report, format.into()));

                if report.passed() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Rules { format } => {
            println!("{}", output::format_rules(&registry.describe(), format.into()));
            ExitCode::SUCCESS
        }

        Commands::Init { .. } => ExitCode::SUCCESS,
    }
}
