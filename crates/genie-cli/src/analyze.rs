//! `genie analyze` handler.

use std::sync::Arc;
use std::time::Duration;

use genie_pipeline::{PipelineConfig, RunResponse};

use crate::sink::PgCommentSink;
use crate::{resolve_video_id, AnalyzeArgs};

/// Pipeline parameters from config, with CLI flags taking precedence.
pub(crate) fn pipeline_config(
    config: &genie_core::AppConfig,
    args: &AnalyzeArgs,
) -> PipelineConfig {
    PipelineConfig {
        max_comments: args.max_comments.unwrap_or(config.max_comments),
        page_concurrency: args.page_concurrency.unwrap_or(config.page_concurrency),
        call_timeout: Duration::from_secs(config.request_timeout_secs),
    }
}

/// Run the pipeline for one video and print the JSON response on stdout.
///
/// Returns `Ok(false)` when the run failed; the `{"error": ...}` body has
/// already been printed at that point.
///
/// # Errors
///
/// Returns an error if the video argument holds no id, `YOUTUBE_API_KEY` is
/// unset, a client cannot be built or the response cannot be serialized.
pub(crate) async fn run_analyze(
    config: &genie_core::AppConfig,
    args: &AnalyzeArgs,
) -> anyhow::Result<bool> {
    let video_id = resolve_video_id(&args.video)?;
    let pipeline_config = pipeline_config(config, args);
    let youtube_key = config.require_youtube_api_key()?;
    let language_key = config.require_language_api_key()?;

    let youtube = genie_youtube::YoutubeClient::with_base_url(
        youtube_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.youtube_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?;
    let language = genie_language::LanguageClient::with_base_url(
        language_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.language_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Natural Language client: {e}"))?;

    let mut pipeline =
        genie_pipeline::google_pipeline(Arc::new(youtube), Arc::new(language), pipeline_config);

    if let Some(sink) = open_sink(config, args.no_store).await {
        pipeline = pipeline.with_sink(Arc::new(sink));
    }

    let response = RunResponse::from(pipeline.run(&video_id).await);
    let body = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{body}");

    if let RunResponse::Failed { error } = &response {
        tracing::error!(video_id = %video_id, error = %error, "comment pipeline failed");
    }

    Ok(!response.is_error())
}

/// Persistence is best-effort: a missing URL or unreachable database only
/// disables the sink.
async fn open_sink(config: &genie_core::AppConfig, no_store: bool) -> Option<PgCommentSink> {
    if no_store || config.database_url.is_none() {
        return None;
    }

    match genie_db::connect_pool_from_config(config).await {
        Ok(pool) => Some(PgCommentSink::new(pool)),
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable; comments will not be stored");
            None
        }
    }
}
