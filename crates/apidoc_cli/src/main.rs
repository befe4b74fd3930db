//! `apidoc` - generate the API reference document for the docs site
//!
//! Reads the editor's TypeScript declarations and writes the JSON document the
//! API pages render. Missing or unusual declarations only shrink the document;
//! the command fails only when the configuration is invalid or the document
//! cannot be written.

use anyhow::{Context, Result};
use apidoc_etch::{ApiDocBuilder, EtchConfig, ReportPrinter};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "apidoc.toml";

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "APIDOC_LOG";

#[derive(Debug, Parser)]
#[command(name = "apidoc", version, about = "Generate the editor API reference JSON")]
struct Cli {
    /// TOML config file (defaults to ./apidoc.toml when present)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Root of the declaration tree
    #[arg(long, value_name = "DIR")]
    types_root: Option<PathBuf>,

    /// JSON document to write
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// package.json supplying the version
    #[arg(long = "package-json", value_name = "FILE")]
    package_json: Option<PathBuf>,

    /// Version used when package.json cannot be read
    #[arg(long, value_name = "VERSION")]
    fallback_version: Option<String>,

    /// Assemble and report without writing the document
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Disable coloured output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Log debug output
    #[arg(short = 'v', long, default_value_t = false, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file (explicit or discovered in `cwd`) and apply the
/// command-line overrides
fn resolve_config(cli: &Cli, cwd: &Path) -> Result<EtchConfig> {
    let discovered = cwd.join(DEFAULT_CONFIG);
    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None if discovered.is_file() => Some(discovered),
        None => None,
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "using config file");
            EtchConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => EtchConfig::default(),
    };

    if let Some(root) = &cli.types_root {
        config.types_root = root.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(manifest) = &cli.package_json {
        config.package_manifest = Some(manifest.clone());
    }
    if let Some(version) = &cli.fallback_version {
        config.fallback_version = version.clone();
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let config = resolve_config(&cli, &cwd)?;

    tracing::info!(
        types_root = %config.types_root.display(),
        "generating API documentation"
    );

    let output = ApiDocBuilder::from_config(config)
        .dry_run(cli.check)
        .build()
        .context("failed to generate API documentation")?;

    ReportPrinter::new(&output, !cli.no_color).print_to_stdout();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.default_log_level());
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "apidoc",
            "--types-root",
            "vendor/types",
            "-o",
            "out/api.json",
            "--check",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.types_root, Some(PathBuf::from("vendor/types")));
        assert_eq!(cli.output, Some(PathBuf::from("out/api.json")));
        assert!(cli.check);
        assert_eq!(cli.default_log_level(), "debug");

        assert!(Cli::try_parse_from(["apidoc", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_resolve_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["apidoc"]).unwrap();

        let config = resolve_config(&cli, dir.path()).unwrap();
        assert_eq!(config, EtchConfig::default());
        assert_eq!(cli.default_log_level(), "info");
    }

    #[test]
    fn test_resolve_config_discovers_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG),
            "types_root = \"types\"\nfallback_version = \"3.0.0\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["apidoc", "--fallback-version", "9.9.9"]).unwrap();
        let config = resolve_config(&cli, dir.path()).unwrap();

        assert_eq!(config.types_root, dir.path().join("types"));
        assert_eq!(config.fallback_version, "9.9.9");
    }

    #[test]
    fn test_resolve_config_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "unknown_key = 1\n").unwrap();

        let cli = Cli::try_parse_from(["apidoc", "-c", path.to_str().unwrap()]).unwrap();
        let err = resolve_config(&cli, dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown_key"));
    }
}
