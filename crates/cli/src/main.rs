//! openapi-docs-gen CLI
//!
//! Command-line interface for generating and cleaning OpenAPI documentation
//! pages from a site configuration file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use openapi_docs_gen_common::{PluginConfig, SiteConfig};
use openapi_docs_gen_generator::{
    clean_docs, clean_version_docs, generate_docs, generate_version_docs, CleanReport,
    GenerationReport, Selector, UnitOutcome, VersionSelector,
};
use openapi_docs_gen_parser::openapi::HttpFetcher;
use openapi_docs_gen_parser::SpecLoader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-docs-gen")]
#[command(version, about = "Generate documentation pages from OpenAPI specs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site configuration file
    #[arg(short, long, global = true, default_value = "docs-config.yaml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate docs for one configuration unit or all of them
    #[command(name = "gen-api-docs")]
    #[command(after_help = "EXAMPLES:\n  \
        # Generate docs for the petstore unit\n  \
        openapi-docs-gen gen-api-docs petstore\n\n  \
        # Generate every unit of the openapi plugin instance\n  \
        openapi-docs-gen gen-api-docs all --plugin-id openapi")]
    GenApiDocs {
        /// Unit key, or `all`
        target: String,

        /// Plugin instance to use when several are configured
        #[arg(short, long)]
        plugin_id: Option<String>,

        /// Timeout in seconds for fetching remote specs
        #[arg(long)]
        fetch_timeout: Option<u64>,
    },

    /// Generate docs for versions of a configuration unit
    #[command(name = "gen-api-docs:version")]
    #[command(after_help = "EXAMPLES:\n  \
        # Generate one version\n  \
        openapi-docs-gen gen-api-docs:version petstore:1.0.0\n\n  \
        # Generate every version and the versions manifest\n  \
        openapi-docs-gen gen-api-docs:version petstore:all")]
    GenApiDocsVersion {
        /// `<id>:<version>` or `<id>:all`
        target: String,

        /// Plugin instance to use when several are configured
        #[arg(short, long)]
        plugin_id: Option<String>,

        /// Timeout in seconds for fetching remote specs
        #[arg(long)]
        fetch_timeout: Option<u64>,
    },

    /// Remove generated docs of one configuration unit or all of them
    #[command(name = "clean-api-docs")]
    CleanApiDocs {
        /// Unit key, or `all`
        target: String,

        /// Plugin instance to use when several are configured
        #[arg(short, long)]
        plugin_id: Option<String>,
    },

    /// Remove generated docs of versions of a configuration unit
    #[command(name = "clean-api-docs:version")]
    CleanApiDocsVersion {
        /// `<id>:<version>` or `<id>:all`
        target: String,

        /// Plugin instance to use when several are configured
        #[arg(short, long)]
        plugin_id: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    let site = load_site(&cli.config)?;

    match cli.command {
        Commands::GenApiDocs {
            target,
            plugin_id,
            fetch_timeout,
        } => {
            let plugin = resolve_plugin(&site, plugin_id.as_deref())?;
            let mut loader = spec_loader(fetch_timeout)?;
            let selector = Selector::parse(&target);

            eprintln!("{} Generating API docs for {}", "→".cyan(), target.yellow());
            let outcomes = generate_docs(plugin, &selector, &mut loader)
                .with_context(|| format!("Failed to generate API docs for \"{}\"", target))?;
            report_generation(&outcomes, cli.verbose);
        }
        Commands::GenApiDocsVersion {
            target,
            plugin_id,
            fetch_timeout,
        } => {
            let plugin = resolve_plugin(&site, plugin_id.as_deref())?;
            let mut loader = spec_loader(fetch_timeout)?;
            let (key, selector) = VersionSelector::parse(&target)?;

            eprintln!(
                "{} Generating versioned API docs for {}",
                "→".cyan(),
                target.yellow()
            );
            let outcomes = generate_version_docs(plugin, &key, &selector, &mut loader)
                .with_context(|| format!("Failed to generate API docs for \"{}\"", target))?;
            report_generation(&outcomes, cli.verbose);
        }
        Commands::CleanApiDocs { target, plugin_id } => {
            let plugin = resolve_plugin(&site, plugin_id.as_deref())?;
            let selector = Selector::parse(&target);

            eprintln!("{} Cleaning API docs for {}", "→".cyan(), target.yellow());
            let outcomes = clean_docs(plugin, &selector)
                .with_context(|| format!("Failed to clean API docs for \"{}\"", target))?;
            report_clean(&outcomes, cli.verbose);
        }
        Commands::CleanApiDocsVersion { target, plugin_id } => {
            let plugin = resolve_plugin(&site, plugin_id.as_deref())?;
            let (key, selector) = VersionSelector::parse(&target)?;

            eprintln!(
                "{} Cleaning versioned API docs for {}",
                "→".cyan(),
                target.yellow()
            );
            let outcomes = clean_version_docs(plugin, &key, &selector)
                .with_context(|| format!("Failed to clean API docs for \"{}\"", target))?;
            report_clean(&outcomes, cli.verbose);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_site(path: &Path) -> Result<SiteConfig> {
    let site = SiteConfig::load(path)
        .with_context(|| format!("Failed to load site configuration {}", path.display()))?;
    tracing::debug!(
        config = %path.display(),
        plugins = site.entries().count(),
        "loaded site configuration"
    );
    Ok(site)
}

fn resolve_plugin<'a>(site: &'a SiteConfig, plugin_id: Option<&str>) -> Result<&'a PluginConfig> {
    site.resolve_plugin(plugin_id)
        .context("Failed to resolve API docs plugin")
}

fn spec_loader(fetch_timeout: Option<u64>) -> Result<SpecLoader> {
    let fetcher = match fetch_timeout {
        Some(secs) => HttpFetcher::with_timeout(Duration::from_secs(secs)),
        None => HttpFetcher::new(),
    }
    .context("Failed to create HTTP client")?;

    Ok(SpecLoader::with_fetcher(Box::new(fetcher)))
}

fn report_generation(outcomes: &[UnitOutcome<GenerationReport>], verbose: bool) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                for diagnostic in &report.diagnostics {
                    eprintln!("{} {}: {}", "⚠".yellow(), outcome.name, diagnostic);
                }
                for failure in &report.failures {
                    eprintln!("{} {}: {}", "⚠".yellow(), outcome.name, failure);
                }
                if verbose {
                    for path in &report.skipped {
                        eprintln!("  Skipped existing {}", path.display());
                    }
                }
                eprintln!(
                    "{} {}: {} created, {} skipped, {} failed",
                    "✓".green(),
                    outcome.name.bold(),
                    report.created.len(),
                    report.skipped.len(),
                    report.failures.len()
                );
            }
            Err(e) => eprintln!("{} {}: {}", "⚠".yellow(), outcome.name.bold(), e),
        }
    }
}

fn report_clean(outcomes: &[UnitOutcome<CleanReport>], verbose: bool) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                if verbose {
                    for path in &report.removed {
                        eprintln!("  Removed {}", path.display());
                    }
                }
                for failure in &report.failures {
                    eprintln!("{} {}: {}", "⚠".yellow(), outcome.name, failure);
                }
                eprintln!(
                    "{} {}: {} removed",
                    "✓".green(),
                    outcome.name.bold(),
                    report.removed.len()
                );
            }
            Err(e) => eprintln!("{} {}: {}", "⚠".yellow(), outcome.name.bold(), e),
        }
    }
}
