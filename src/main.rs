use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;
use tile_migrations::{
    apply_migration, list_migrations, read_document, validate_catalog, write_document, Catalog,
    DocumentFormat,
};

#[derive(Parser)]
#[command(name = "tile-migrate")]
#[command(about = "Apply and inspect property migrations for the Splunk nozzle tile")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the migrations registered in a catalog
    List {
        /// Catalog to list (standalone, tile-product)
        #[arg(short, long, default_value = "standalone")]
        catalog: Catalog,
    },

    /// Apply one migration to a property object
    Apply {
        /// Migration name, e.g. 202007281325_splunk-nozzle
        name: String,

        /// Catalog the migration is registered in
        #[arg(short, long, default_value = "standalone")]
        catalog: Catalog,

        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document format (json, yaml); guessed from the input extension when omitted
        #[arg(short, long)]
        format: Option<DocumentFormat>,
    },

    /// Check a catalog's registry for duplicate or malformed entries
    Validate {
        /// Catalog to validate
        #[arg(short, long, default_value = "standalone")]
        catalog: Catalog,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Commands::List { catalog } => list(catalog),
        Commands::Apply {
            name,
            catalog,
            input,
            output,
            format,
        } => apply(&name, catalog, input, output, format),
        Commands::Validate { catalog } => validate(catalog),
    }
}

fn list(catalog: Catalog) -> Result<()> {
    println!("Migrations in {} ({}):", catalog, catalog.directory());
    for info in list_migrations(catalog) {
        println!(
            "  {}  {}  {}",
            info.name,
            info.created_at.format("%Y-%m-%d %H:%M UTC"),
            info.description
        );
    }
    Ok(())
}

fn apply(
    name: &str,
    catalog: Catalog,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<DocumentFormat>,
) -> Result<()> {
    let format = format
        .or_else(|| input.as_deref().and_then(DocumentFormat::from_path))
        .unwrap_or_default();

    let text = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let mut object = read_document(&text, format).context("Failed to parse property object")?;
    apply_migration(catalog, name, &mut object)?;
    let text = write_document(&object, format)?;

    match &output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote migrated properties to {}", path.display());
        }
        None => {
            std::io::stdout()
                .write_all(text.as_bytes())
                .context("Failed to write stdout")?;
        }
    }

    Ok(())
}

fn validate(catalog: Catalog) -> Result<()> {
    let result = validate_catalog(catalog);

    for warning in &result.warnings {
        log::warn!("{}", warning);
    }
    for error in &result.errors {
        log::error!("{}", error);
    }

    println!(
        "{}: {}/{} migrations valid",
        catalog, result.valid_count, result.total_count
    );

    if !result.is_valid() {
        anyhow::bail!("Catalog {} has {} invalid migrations", catalog, result.errors.len());
    }
    Ok(())
}
