mod analyze;
mod history;
mod sink;


use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "genie")]
#[command(about = "Fetch, analyze and summarize YouTube comments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a video's comments and print the JSON report
    Analyze(AnalyzeArgs),
    /// Show stored comment batches for a video
    History {
        /// Video id or URL
        video: String,

        /// Maximum number of batches to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Apply pending database migrations
    Migrate,
}

#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Video id or URL (watch, youtu.be, shorts and embed links are accepted)
    pub video: String,

    /// Maximum number of analyzed comments to keep (overrides `GENIE_MAX_COMMENTS`)
    #[arg(long)]
    pub max_comments: Option<u32>,

    /// Comments analyzed concurrently per page (overrides `GENIE_PAGE_CONCURRENCY`)
    #[arg(long)]
    pub page_concurrency: Option<usize>,

    /// Do not persist the kept comments even if `DATABASE_URL` is set
    #[arg(long)]
    pub no_store: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Resolve a CLI video argument to a bare video id.
pub(crate) fn resolve_video_id(input: &str) -> anyhow::Result<String> {
    genie_youtube::extract_video_id(input)
        .ok_or_else(|| anyhow::anyhow!("could not find a video id in '{input}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = genie_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "loaded configuration");

    match cli.command {
        Commands::Analyze(args) => {
            let succeeded = analyze::run_analyze(&config, &args).await?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::History { video, limit } => {
            let pool = genie_db::connect_pool_from_config(&config).await?;
            history::run_history(&pool, &video, limit).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Migrate => {
            let pool = genie_db::connect_pool_from_config(&config).await?;
            let applied = genie_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
            Ok(ExitCode::SUCCESS)
        }
    }
}
