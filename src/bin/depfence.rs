//! DepFence CLI: scan dependency manifests for maintainer abandonment risk

use clap::{Parser, ValueEnum};
use colored::Colorize;
use depfence::{render_json, render_sarif, render_table, scan, truncate_reports, ScanConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "depfence")]
#[command(about = "Scan dependencies for maintainer abandonment risk", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to requirements.txt or package.json
    file: PathBuf,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Output JSON (legacy alias for `-o json`)
    #[arg(long)]
    json: bool,

    /// Exit 1 if any dependency risk score >= N (legacy CI gate, 0 = off)
    #[arg(long = "fail-over", value_name = "N", default_value_t = 0)]
    fail_over: u8,

    /// Exit 1 if any dependency risk score >= T * 100 (fractional CI gate)
    #[arg(long, value_name = "T")]
    threshold: Option<f64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Sarif,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if !cli.file.is_file() {
        eprintln!(
            "{} file not found: {}",
            "Error:".red().bold(),
            cli.file.display()
        );
        process::exit(2);
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{} failed to load config: {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        },
        None => ScanConfig::default(),
    };

    // Legacy --json wins over the default table format
    let format = if cli.json { OutputFormat::Json } else { cli.output };

    let spinner = (format == OutputFormat::Table).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Scanning dependencies...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    });

    let result = scan(&cli.file, &config).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let reports = match result {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("{} scan failed: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let total = reports.len();
    let (shown, truncated) = truncate_reports(reports, config.free_limit);

    let rendered = match format {
        OutputFormat::Json => render_json(&shown, truncated),
        OutputFormat::Sarif => render_sarif(&shown),
        OutputFormat::Table => Ok(render_table(&shown)),
    };

    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{} failed to render report: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }

    if format == OutputFormat::Table {
        if truncated {
            eprintln!(
                "\n⚠ Showing {}/{} deps - upgrade at depfence.dev/pricing",
                config.free_limit, total
            );
        }
        let risky = shown.iter().filter(|r| r.score >= 50).count();
        if risky > 0 {
            println!(
                "\n🚨 {} package(s) at HIGH+ abandonment risk!",
                risky.to_string().red().bold()
            );
        }
    }

    // Either gate may fire independently
    let legacy_hit = cli.fail_over > 0 && shown.iter().any(|r| r.score >= cli.fail_over);
    let threshold_hit = cli
        .threshold
        .map(|t| shown.iter().any(|r| f64::from(r.score) >= t * 100.0))
        .unwrap_or(false);

    if legacy_hit || threshold_hit {
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: &PathBuf) -> Result<ScanConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: ScanConfig = toml::from_str(&content)?;
    Ok(config)
}
