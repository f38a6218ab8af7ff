//! CLI tool for auditing vendored dependency licenses

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vendor_license_audit::{audit_project, download, manifest, AuditConfig, LockFormat};

#[derive(Parser)]
#[command(name = "vendor-audit")]
#[command(about = "Audit vendored dependencies: detect licenses and emit a compliance manifest", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the project to audit (lock file and vendor/ live here)
    #[arg(short = 'p', long, default_value = ".")]
    project_path: PathBuf,

    /// Lock format to read (dep | glide); auto-detected when omitted
    #[arg(long)]
    lock_format: Option<LockFormat>,

    /// Manifest output format for the structured variant
    #[arg(short = 'f', long, default_value = "yaml")]
    format: OutputFormat,

    /// Download the synthesized source archives too
    #[arg(long)]
    download: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Yaml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut builder = AuditConfig::builder().download(cli.download);
    if let Some(format) = cli.lock_format {
        builder = builder.lock_format(format);
    }
    let config = builder.build();

    // Lock-file problems are the only fatal errors; everything downstream
    // degrades per dependency.
    let report = match audit_project(&cli.project_path, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if config.download {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message("Downloading source packages...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        match download::download_archives(&report.entries, &config.network).await {
            Ok(0) => {}
            Ok(failures) => warn!("{} package downloads failed", failures),
            Err(e) => warn!("Download stage unavailable: {}", e),
        }

        spinner.finish_and_clear();
    }

    let output = match report.format {
        LockFormat::Dep => match cli.format {
            OutputFormat::Yaml => manifest::to_yaml(&report.entries),
            OutputFormat::Json => manifest::to_json(&report.entries),
        },
        LockFormat::Glide => Ok(manifest::to_flat(&report.rows)),
    };

    match output {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("{} Failed to serialize manifest: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }

    if !report.missing.is_empty() {
        eprintln!("\n\nThe following packages are missing license files:");
        for name in &report.missing {
            eprintln!(" -> {}", name);
        }
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
