use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use results_normalizer::{
    config::Config,
    metrics::render_metrics,
    services::{report_renderer::render_text, HttpFetcher, ResultsService},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Fetch a candidate's test results and print the normalized report.
#[derive(Debug, Parser)]
#[command(name = "results-report", version)]
struct Cli {
    /// Candidate identifier
    #[arg(long, env = "RESULTS_CANDIDATE_ID")]
    candidate: String,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print Prometheus metrics after the report
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        "Configuration loaded for environment: {:?}",
        std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
    );

    let fetcher = HttpFetcher::new(&config).context("Failed to build results API client")?;
    let service = ResultsService::new(fetcher, config.results_path.clone());

    let report = service
        .candidate_results(&cli.candidate)
        .await
        .with_context(|| format!("Failed to load results for candidate {}", cli.candidate))?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if cli.metrics {
        println!("{}", render_metrics()?);
    }

    Ok(())
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // logs go to stderr so the report on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "results_normalizer=info,results_report=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
