use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use survey_pulse::config::{self, Settings};
use survey_pulse::dashboard::{Dashboard, UploadOutcome, View};
use survey_pulse::models::{Category, Sentiment};
use survey_pulse::table::{self, TableFilter};
use survey_pulse::{ingest, report, words};

#[derive(Parser)]
#[command(name = "survey-pulse")]
#[command(about = "Sentiment dashboard for categorized survey feedback", long_about = None)]
struct Cli {
    /// Replace the bundled responses with an uploaded CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// JSON settings file (falls back to SURVEY_PULSE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the overview dashboard
    Overview {
        #[arg(long)]
        json: bool,
    },
    /// Show the dashboard for one category
    Category {
        name: Category,
        #[arg(long)]
        json: bool,
    },
    /// List responses, optionally searched and filtered
    Table {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        sentiment: Option<Sentiment>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Most frequent words in positive or negative feedback
    Words {
        sentiment: Sentiment,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write a markdown report
    Report {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export the current responses as CSV
    Export {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Check a CSV file without loading it
    Validate { file: PathBuf },
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    init_tracing(cli.verbose, settings.log_json);

    let mut dashboard = Dashboard::default();
    if let Some(path) = &cli.csv {
        match dashboard.upload(path).await {
            UploadOutcome::Replaced { source, count } => {
                eprintln!("Successfully uploaded {count} survey responses from {source}.");
            }
            UploadOutcome::Rejected { message } => {
                eprintln!("{message}");
                eprintln!("Continuing with the current dataset.");
            }
        }
    }

    match cli.command {
        Commands::Overview { json } => {
            dashboard.select(View::Overview);
            let snapshot = dashboard.snapshot();
            if json {
                let summary = report::summarize_overview(&snapshot, &settings);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::build_report(&snapshot, dashboard.view(), &settings));
            }
        }
        Commands::Category { name, json } => {
            dashboard.select(View::Category(name));
            let snapshot = dashboard.snapshot();
            if json {
                let summary = report::summarize_category(&snapshot, name, &settings);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::build_report(&snapshot, dashboard.view(), &settings));
            }
        }
        Commands::Table {
            search,
            category,
            sentiment,
            limit,
        } => {
            let filter = TableFilter {
                query: search,
                category,
                sentiment,
            };
            let rows = table::filter_responses(dashboard.responses(), &filter);
            let limit = limit.or(settings.table_limit);
            print!("{}", table::render_table("Survey Responses", &rows, limit));
        }
        Commands::Words { sentiment, limit } => {
            let found = words::top_words(
                dashboard.responses(),
                sentiment,
                limit.unwrap_or(settings.top_words),
            );
            print!("{}", report::render_words(sentiment, &found));
        }
        Commands::Report { category, out } => {
            dashboard.select(category.map_or(View::Overview, View::Category));
            let report = report::build_report(&dashboard.snapshot(), dashboard.view(), &settings);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { category, out } => {
            dashboard.select(category.map_or(View::Overview, View::Category));
            let rows = report::view_rows(dashboard.responses(), dashboard.view());
            let file = std::fs::File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            let written = table::write_csv(rows, file)?;
            println!("Exported {written} responses to {}.", out.display());
        }
        Commands::Validate { file } => match ingest::load_upload(&file).await {
            Ok(upload) => {
                println!(
                    "{} is valid: {} survey responses accepted.",
                    file.display(),
                    upload.responses.len()
                );
            }
            Err(err) => {
                anyhow::bail!("{}: {err}", file.display());
            }
        },
    }

    Ok(())
}
