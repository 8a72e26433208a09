mod config;
mod error;
mod progress;
mod report;
mod translator;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};

use config::{InputManifest, ReportOptions};
use report::best_practices::RULES;
use translator::{Catalog, Translate};

#[derive(Parser)]
#[command(name = "ecoreport", about = "Merge eco-index page audits into one JSON report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LocaleArgs {
    /// Language for rule labels (en, fr)
    #[arg(short, long, default_value = "en")]
    language: String,
    /// Custom locale file, shaped like {"rules": {"CompressHttp": "..."}}
    #[arg(long)]
    locale_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the consolidated JSON report
    Json {
        /// Destination file for the report
        #[arg(short, long)]
        output: PathBuf,
        /// Log lines instead of a progress bar
        #[arg(long, env = "CI", value_parser = FalseyValueParser::new())]
        ci: bool,
        #[command(flatten)]
        locale: LocaleArgs,
        /// JSON manifest listing page reports and the global report
        #[arg(short, long, conflicts_with_all = ["global", "pages"])]
        manifest: Option<PathBuf>,
        /// Global (run summary) report
        #[arg(short, long, required_unless_present = "manifest")]
        global: Option<PathBuf>,
        /// Page reports, in report order
        pages: Vec<PathBuf>,
    },
    /// List best-practice rules with their localized labels
    Rules {
        #[command(flatten)]
        locale: LocaleArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Json {
            output,
            ci,
            locale,
            manifest,
            global,
            pages,
        } => {
            let inputs = match (manifest, global) {
                (Some(path), _) => InputManifest::load(&path)
                    .with_context(|| format!("Failed to load manifest {}", path.display()))?,
                (None, Some(global)) => InputManifest::from_paths(global, pages),
                (None, None) => anyhow::bail!("Either --manifest or --global is required"),
            };
            let options = ReportOptions {
                report_output_file: output,
                ci,
                language: locale.language,
                locale_file: locale.locale_file,
            };
            let catalog = options.catalog()?;

            let report = report::create_json_report(&inputs, &options, &catalog)
                .context("Failed to create JSON report")?;
            println!(
                "Wrote {} ({} pages, {} errors)",
                options.report_output_file.display(),
                report.all_reports_variables.len(),
                report.nb_errors
            );
        }
        Commands::Rules { locale } => {
            let catalog = Catalog::load(&locale.language, locale.locale_file.as_deref())?;
            println!("{:>3} | {:<32} | Label ({})", "#", "Rule", catalog.language());
            println!("{}", "-".repeat(80));
            for (i, rule) in RULES.iter().enumerate() {
                println!("{:>3} | {:<32} | {}", i + 1, rule, catalog.translate_rule(rule));
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
