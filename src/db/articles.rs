//! # 글(Article) 데이터베이스 쿼리 모듈
//!
//! `articles` 테이블의 생성/조회/수정/삭제 함수입니다.
//! 목록/검색처럼 페이지가 있는 조회는 `queries` 모듈에 있습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

/// `Article` 구조체와 같은 순서의 컬럼 목록
pub(crate) const ARTICLE_COLUMNS: &str =
    "id, title, content, author_id, created_time, updated_time";

/// 새 글을 저장하고 저장된 글을 반환합니다.
///
/// # 에러
/// `author_id`가 존재하지 않는 사용자를 가리키면 외래키 제약 위반으로
/// `AppError::Database`가 반환됩니다 (`AppError::is_foreign_key_violation`).
pub async fn create_article(
    pool: &SqlitePool,
    req: &CreateArticleRequest,
) -> Result<Article, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO articles (title, content, author_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&req.title)
    .bind(&req.content)
    .bind(req.author_id)
    .execute(pool)
    .await?;

    get_article(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created article".to_string()))
}

/// ID로 글 하나를 조회합니다. 없으면 `Ok(None)`.
pub async fn get_article(pool: &SqlitePool, id: i64) -> Result<Option<Article>, AppError> {
    fetch_article(pool, id).await
}

pub(crate) async fn fetch_article<'e, E>(executor: E, id: i64) -> Result<Option<Article>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let article = sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(article)
}

/// 글을 부분 업데이트합니다.
///
/// 작성자를 바꾸는 경우에도 외래키 제약이 적용됩니다.
/// 해당 id가 없으면 `Ok(None)`.
pub async fn update_article(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateArticleRequest,
) -> Result<Option<Article>, AppError> {
    let mut tx = pool.begin().await?;

    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE articles SET updated_time = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(title) = &req.title {
        query.push(", title = ").push_bind(title.as_str());
    }
    if let Some(content) = &req.content {
        query.push(", content = ").push_bind(content.as_str());
    }
    if let Some(author_id) = req.author_id {
        query.push(", author_id = ").push_bind(author_id);
    }
    query.push(" WHERE id = ").push_bind(id);

    let result = query.build().execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let article = fetch_article(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(article)
}

/// 글을 삭제합니다. 글에 달린 댓글과 라벨도 함께 삭제됩니다.
///
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 id의 글이 없음
pub async fn delete_article(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
