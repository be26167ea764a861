//! doctree CLI - Documentation tree builder.
//!
//! Loads a markdown documentation package, resolves docstring inheritance
//! and missing optional dependencies, and writes one HTML page per module
//! under the output directory.

mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doctree_build::TreeWriter;
use doctree_config::{CliSettings, Config};
use doctree_model::{DocstringMode, LoadOptions, link_inheritance, load_package};
use doctree_render::{PageRenderer, RenderOptions};

use error::CliError;
use output::Output;

/// doctree - Documentation tree builder.
#[derive(Parser)]
#[command(name = "doctree", version, about)]
struct Cli {
    /// Package source directory (overrides config).
    source_dir: Option<PathBuf>,

    /// Output directory for the generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover doctree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render $..$ and $$..$$ as LaTeX math.
    #[arg(long)]
    latex_math: bool,

    /// List members in declaration order instead of sorted by name.
    #[arg(long)]
    source_order: bool,

    /// Fill missing member docstrings from inherited modules.
    #[arg(long)]
    inherit_docstrings: bool,

    /// Mark a module as a known-absent optional dependency (repeatable).
    #[arg(long = "absent", value_name = "MODULE")]
    absent: Vec<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let cli_settings = CliSettings {
        source_dir: cli.source_dir,
        output_dir: cli.output_dir,
        latex_math: cli.latex_math.then_some(true),
        source_order: cli.source_order.then_some(true),
        inherit_docstrings: cli.inherit_docstrings.then_some(true),
        absent_modules: cli.absent,
    };
    let config = Config::load(cli.config.as_deref(), Some(&cli_settings))?;

    output.info(&format!("Source: {}", config.paths.source_dir.display()));
    output.info(&format!("Output: {}", config.paths.output_dir.display()));

    let load_options = LoadOptions {
        meta_filename: config.modules.meta_filename.clone(),
        absent_modules: config.modules.absent.iter().cloned().collect(),
        root_name: config.package_name.clone(),
    };
    let mut root = load_package(&config.paths.source_dir, &load_options)?;

    let mode = if config.modules.inherit_docstrings {
        DocstringMode::Inherited
    } else {
        DocstringMode::Declared
    };
    link_inheritance(&mut root, mode)?;

    let render_options = RenderOptions::new()
        .with_latex_math(config.render.latex_math)
        .with_source_order(config.render.source_order);
    let writer = TreeWriter::new(PageRenderer::new(render_options), &config.paths.output_dir);
    let written = writer.write(&root)?;

    output.success(&format!(
        "Wrote {written} pages to {}",
        config.paths.output_dir.display()
    ));
    Ok(())
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
            "doctree",
            "docs",
            "--output-dir",
            "site",
            "--latex-math",
            "--absent",
            "nativeplot",
            "--absent",
            "fastsolve",
        ])
        .unwrap();

        assert_eq!(cli.source_dir, Some(PathBuf::from("docs")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("site")));
        assert!(cli.latex_math);
        assert!(!cli.source_order);
        assert_eq!(cli.absent, vec!["nativeplot", "fastsolve"]);
    }

    #[test]
    fn test_end_to_end_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("docs");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("index.md"), "# pkg").unwrap();
        std::fs::write(source.join("util.md"), "Utilities.").unwrap();
        let out = temp_dir.path().join("site");
        // Explicit empty config so discovery never picks up a stray file.
        let config = temp_dir.path().join("doctree.toml");
        std::fs::write(&config, "").unwrap();

        let cli = Cli::try_parse_from([
            "doctree",
            source.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();

        run(cli, &Output::new()).unwrap();
        assert!(out.join("docs/index.html").is_file());
        assert!(out.join("docs/util.html").is_file());
    }
}
