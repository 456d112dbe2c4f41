use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use linesplice::config::SpliceConfig;
use linesplice::diff::DEFAULT_CONTEXT;
use linesplice::splice::{Bounds, LineRange, SpliceReport, Splicer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File whose lines are replaced (defaults to the configured target)
    target: Option<PathBuf>,

    /// File whose full contents are spliced in (defaults to the configured replacement)
    replacement: Option<PathBuf>,

    /// Config file (.toml, .json, .yaml); defaults to ./linesplice.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First line to replace (0-based, inclusive)
    #[arg(short, long)]
    start: Option<usize>,

    /// Line where the kept tail begins (0-based, exclusive)
    #[arg(short, long)]
    end: Option<usize>,

    /// Read --start and --end as inclusive 1-based line numbers
    #[arg(long)]
    one_based: bool,

    /// Clamp out-of-range boundaries instead of failing
    #[arg(long)]
    clamp: bool,

    /// Show what would change without writing the target
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print a unified diff of the change
    #[arg(short, long)]
    diff: bool,

    /// Lines of context around diff hunks
    #[arg(long, default_value_t = DEFAULT_CONTEXT)]
    context: usize,

    /// Only write if the target's SHA-256 matches this value
    #[arg(long, value_name = "HEX")]
    expect_sha256: Option<String>,

    /// Write the target in place instead of through a temporary file
    #[arg(long)]
    no_atomic: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Save the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration
    fn apply_to(&self, config: &mut SpliceConfig) {
        if let Some(target) = &self.target {
            config.job.target = target.clone();
        }
        if let Some(replacement) = &self.replacement {
            config.job.replacement = replacement.clone();
        }
        if let Some(start) = self.start {
            config.job.start = start;
        }
        if let Some(end) = self.end {
            config.job.end = end;
        }
        if self.one_based {
            config.job.one_based = true;
        }
        if let Some(expected) = &self.expect_sha256 {
            config.job.expect_sha256 = Some(expected.clone());
        }
        if self.clamp {
            config.write.bounds = Bounds::Clamp;
        }
        if self.no_atomic {
            config.write.atomic = false;
        }
        if self.verbose {
            config.log.level = "debug".to_string();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_path) =
        SpliceConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    linesplice::init_with_logger(&config.log.level, std::io::stderr().is_terminal())
        .context("Failed to initialize logging")?;

    if let Some(path) = &config_path {
        debug!("Loaded configuration from {}", path.display());
    }

    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let range: LineRange = config.job.range().context("Invalid line range")?;

    let mut options = config.splice_options();
    options.dry_run = cli.dry_run;
    if cli.diff || cli.dry_run {
        options.diff_context = Some(cli.context);
    }

    let report = Splicer::new(&config.job.target, &config.job.replacement, range)
        .with_options(options)
        .run()
        .with_context(|| format!("Failed to update {}", config.job.target.display()))?;

    if !report.changed() {
        info!(
            "Replacement matches lines {} of {}, content unchanged",
            range,
            report.target.display()
        );
    }

    let stdout = std::io::stdout();
    print_report(&mut stdout.lock(), &report, cli.json)?;

    Ok(())
}

/// Write the console confirmation for a finished splice
fn print_report(out: &mut impl Write, report: &SpliceReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        return Ok(());
    }

    if let Some(diff) = &report.diff {
        write!(out, "{}", diff)?;
    }

    if report.written {
        writeln!(out, "Successfully updated {}", report.target.display())?;
    } else {
        writeln!(out, "Dry run: {} not modified", report.target.display())?;
    }

    Ok(())
}
