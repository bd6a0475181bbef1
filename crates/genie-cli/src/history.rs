//! `genie history` handler.

use crate::resolve_video_id;

/// Print stored comment batches for a video, newest first.
///
/// # Errors
///
/// Returns an error if the video argument holds no id or the query fails.
pub(crate) async fn run_history(pool: &sqlx::PgPool, video: &str, limit: i64) -> anyhow::Result<()> {
    let video_id = resolve_video_id(video)?;
    let batches = genie_db::list_comment_batches(pool, &video_id, limit).await?;

    if batches.is_empty() {
        println!("no stored comment batches for video '{video_id}'; run `genie analyze` first");
        return Ok(());
    }

    println!("{:<10}{:<20}COMMENTS", "BATCH", "CAPTURED");
    for batch in &batches {
        let captured = batch.captured_at.format("%Y-%m-%d %H:%M").to_string();
        println!("{:<10}{:<20}{}", batch.id, captured, batch.comment_count);
    }

    Ok(())
}
