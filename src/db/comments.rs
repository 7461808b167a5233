//! # 댓글(Comment) 데이터베이스 쿼리 모듈
//!
//! 댓글은 글과 작성자를 모두 참조합니다. 둘 다 존재해야 저장할 수 있습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

const COMMENT_COLUMNS: &str =
    "id, content, author_id, article_id, created_time, updated_time";

pub async fn create_comment(
    pool: &SqlitePool,
    req: &CreateCommentRequest,
) -> Result<Comment, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (content, author_id, article_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&req.content)
    .bind(req.author_id)
    .bind(req.article_id)
    .execute(pool)
    .await?;

    get_comment(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}

pub async fn get_comment(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, AppError> {
    fetch_comment(pool, id).await
}

async fn fetch_comment<'e, E>(executor: E, id: i64) -> Result<Option<Comment>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

/// 특정 글에 달린 모든 댓글을 작성 순서대로 조회합니다.
pub async fn list_comments_for_article(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Comment>, AppError> {
    fetch_comments_for_article(pool, article_id).await
}

pub(crate) async fn fetch_comments_for_article<'e, E>(
    executor: E,
    article_id: i64,
) -> Result<Vec<Comment>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let comments = sqlx::query_as::<_, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments
        WHERE article_id = ?
        ORDER BY created_time, id
        "#
    ))
    .bind(article_id)
    .fetch_all(executor)
    .await?;

    Ok(comments)
}

/// 댓글을 부분 업데이트합니다. 해당 id가 없으면 `Ok(None)`.
pub async fn update_comment(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateCommentRequest,
) -> Result<Option<Comment>, AppError> {
    let mut tx = pool.begin().await?;

    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE comments SET updated_time = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(content) = &req.content {
        query.push(", content = ").push_bind(content.as_str());
    }
    if let Some(author_id) = req.author_id {
        query.push(", author_id = ").push_bind(author_id);
    }
    if let Some(article_id) = req.article_id {
        query.push(", article_id = ").push_bind(article_id);
    }
    query.push(" WHERE id = ").push_bind(id);

    let result = query.build().execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let comment = fetch_comment(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(comment)
}

pub async fn delete_comment(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
