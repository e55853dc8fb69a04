//! adflens CLI - convert HTML to vendor ADF, render it back and diff vendors.
//!
//! Reads one HTML input, runs every selected vendor transformer on it and
//! prints a text or JSON report. `--page` additionally writes the
//! standalone HTML report.

mod error;
mod output;

use std::io::Read;
use std::path::PathBuf;

use adflens::report::render_page;
use adflens::{Vendor, VendorPair, Workbench, WorkbenchConfig};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// Convert HTML into Bitbucket, Confluence and Jira ADF and compare them.
#[derive(Parser)]
#[command(name = "adflens", version, about)]
struct Cli {
    /// HTML file to convert (`-` or absent reads stdin).
    input: Option<PathBuf>,

    /// Inline HTML instead of INPUT.
    #[arg(short = 'e', long = "html", conflicts_with = "input")]
    html: Option<String>,

    /// Vendor to run (repeatable; default: all).
    #[arg(short, long = "vendor")]
    vendors: Vec<Vendor>,

    /// Vendor pair to diff as `left:right` (repeatable).
    #[arg(short = 'c', long = "compare")]
    comparisons: Vec<VendorPair>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write the HTML report page to this path.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let input = read_input(&cli)?;
    let config = WorkbenchConfig::from_lists(cli.vendors, cli.comparisons);
    let workbench = Workbench::new(config)?;

    let run = workbench.run(&input)?;
    info!(
        vendors = run.outputs.len(),
        comparisons = run.comparisons.len(),
        "workbench run finished"
    );

    match cli.format {
        Format::Text => output.text_report(&run)?,
        Format::Json => output.print(&serde_json::to_string_pretty(&run)?)?,
    }

    if let Some(path) = cli.page {
        std::fs::write(&path, render_page(&input, &run))?;
        output.info(&format!("Wrote report page to {}", path.display()));
    }
    Ok(())
}

/// Inline HTML, the INPUT file, or stdin.
fn read_input(cli: &Cli) -> Result<String, CliError> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }

    match &cli.input {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut html = String::new();
            std::io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}
