//! Queries over `exercise_completions`.

use chrono::{DateTime, Utc};
use practice::ProgressEntry;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Insert one completion keyed by its client-generated id. Returns `false`
/// when the entry was already stored, which makes replays harmless.
pub async fn insert_completion<'e, E: PgExecutor<'e>>(
    exec: E,
    child_id: Uuid,
    entry: &ProgressEntry,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO exercise_completions
            (id, child_id, exercise_id, correct_steps, total_steps, completed_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(entry.id)
    .bind(child_id)
    .bind(&entry.exercise_id)
    .bind(entry.correct_steps as i32)
    .bind(entry.total_steps as i32)
    .bind(entry.completed_at)
    .execute(exec)
    .await?;
    Ok(result.rows_affected() == 1)
}

type CompletionRow = (Uuid, Uuid, String, i32, i32, DateTime<Utc>);

pub async fn completions_for<'e, E: PgExecutor<'e>>(
    exec: E,
    child_id: Uuid,
) -> Result<Vec<ProgressEntry>, sqlx::Error> {
    let rows: Vec<CompletionRow> = sqlx::query_as(
        "SELECT id, child_id, exercise_id, correct_steps, total_steps, completed_at
         FROM exercise_completions WHERE child_id = $1 ORDER BY completed_at",
    )
    .bind(child_id)
    .fetch_all(exec)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, child_id, exercise_id, correct_steps, total_steps, completed_at)| ProgressEntry {
                id,
                child_id: child_id.to_string(),
                exercise_id,
                correct_steps: correct_steps.max(0) as u32,
                total_steps: total_steps.max(0) as u32,
                completed_at,
            },
        )
        .collect())
}
