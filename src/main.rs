//! @ai:module:intent CLI entry point for apidrift
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on check, config, directive, inventory, output

use apidrift::{
    check_config, directive, output, Canonicalizer, CodeInventory, Config, ManifestInventory,
    OutputFormat,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "apidrift.toml";

#[derive(Parser)]
#[command(name = "apidrift")]
#[command(author, version, about = "Find drift between documented APIs and code annotations")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the documentation tree against the code manifest
    Check {
        /// Path to configuration file (defaults to ./apidrift.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Documentation source directory
        #[arg(long)]
        docs: Option<PathBuf>,

        /// Code manifest produced by the scanner
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Root module to check (repeatable); replaces the configured modules
        #[arg(long = "module", short = 'm')]
        modules: Vec<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,

        /// Fail with exit code 1 if any drift is found
        #[arg(long, default_value = "false")]
        fail_on_drift: bool,
    },

    /// Show the API references extracted from a documentation file
    Extract {
        /// Path to a documentation file
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Resolve API names to their canonical identity
    Canonicalize {
        /// Dotted API names
        #[arg(required = true)]
        names: Vec<String>,

        /// Code manifest providing the symbol table
        #[arg(long)]
        manifest: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
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

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "apidrift=debug" } else { "apidrift=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// @ai:intent Load the explicit config, the default file if present, or defaults
/// @ai:effects fs:read
fn load_config(path: Option<&Path>) -> apidrift::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG).is_file() => Config::load(Path::new(DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            config,
            docs,
            manifest,
            modules,
            format,
            fail_on_drift,
        } => {
            let result = load_config(config.as_deref()).and_then(|mut config| {
                if let Some(docs) = docs {
                    config.docs.source_dir = docs;
                }
                if let Some(manifest) = manifest {
                    config.code.manifest = manifest;
                }
                if !modules.is_empty() {
                    config.code.modules.clear();
                    config.code.modules.insert("cli".to_string(), modules);
                }
                check_config(&config)
            });

            match result {
                Ok(report) => {
                    println!("{}", output::format_report(&report, format.into()));

                    if fail_on_drift && report.has_drift() {
                        ExitCode::from(1)
                    } else {
                        ExitCode::SUCCESS
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }

        Commands::Extract { path, format } => match directive::parse_file(&path) {
            Ok(references) => {
                println!("{}", output::format_references(&path, &references, format.into()));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Canonicalize {
            names,
            manifest,
            format,
        } => match ManifestInventory::load(&manifest) {
            Ok(code) => {
                let canonicalizer = Canonicalizer::new(code.symbols());
                let pairs: Vec<(String, String)> = names
                    .into_iter()
                    .map(|name| {
                        let canonical = canonicalizer.canonical_name(&name);
                        (name, canonical)
                    })
                    .collect();

                let rendered = output::format_canonical_names(&pairs, format.into());
                println!("{}", rendered.trim_end());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Init { output, force } => {
            if output.exists() && !force {
                eprintln!(
                    "Error: {} already exists (use --force to overwrite)",
                    output.display()
                );
                return ExitCode::from(2);
            }

            match Config::default().save(&output) {
                Ok(()) => {
                    tracing::info!("Wrote default configuration to {}", output.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }
    }
}
