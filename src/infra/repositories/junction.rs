use sqlx::{Sqlite, SqliteConnection, Executor};
use crate::domain::models::assignment::Relation;
use crate::error::AppError;

/// Makes the stored set for `owner_id` exactly `member_ids`. Must run on a
/// transaction connection; the caller decides when to commit.
pub async fn replace_set(
    conn: &mut SqliteConnection,
    relation: Relation,
    owner_id: &str,
    member_ids: &[String],
) -> Result<(), AppError> {
    let delete = format!(
        "DELETE FROM {} WHERE {} = ?",
        relation.table(),
        relation.owner_column()
    );
    sqlx::query(&delete)
        .bind(owner_id)
        .execute(&mut *conn)
        .await
        .map_err(AppError::Database)?;

    let insert = format!(
        "INSERT INTO {} ({}, {}) VALUES (?, ?) ON CONFLICT DO NOTHING",
        relation.table(),
        relation.owner_column(),
        relation.member_column()
    );
    for member_id in member_ids {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(member_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::referential(e, &format!("Unknown id in {}: {}", relation.table(), member_id)))?;
    }
    Ok(())
}

pub async fn list_set<'e, E>(executor: E, relation: Relation, owner_id: &str) -> Result<Vec<String>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let select = format!(
        "SELECT {} FROM {} WHERE {} = ? ORDER BY rowid",
        relation.member_column(),
        relation.table(),
        relation.owner_column()
    );
    sqlx::query_scalar::<_, String>(&select)
        .bind(owner_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::Database)
}
