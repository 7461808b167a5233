use crate::error::AppError;
use crate::models::*;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

pub async fn create_label(pool: &SqlitePool, req: &CreateLabelRequest) -> Result<Label, AppError> {
    let result = sqlx::query("INSERT INTO labels (name, article_id) VALUES (?, ?)")
        .bind(&req.name)
        .bind(req.article_id)
        .execute(pool)
        .await?;

    get_label(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created label".to_string()))
}

pub async fn get_label(pool: &SqlitePool, id: i64) -> Result<Option<Label>, AppError> {
    fetch_label(pool, id).await
}

async fn fetch_label<'e, E>(executor: E, id: i64) -> Result<Option<Label>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let label = sqlx::query_as::<_, Label>("SELECT id, name, article_id FROM labels WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(label)
}

/// 특정 글에 붙은 라벨을 생성 순서(id)대로 조회합니다.
pub async fn list_labels_for_article(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Label>, AppError> {
    fetch_labels_for_article(pool, article_id).await
}

pub(crate) async fn fetch_labels_for_article<'e, E>(
    executor: E,
    article_id: i64,
) -> Result<Vec<Label>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let labels = sqlx::query_as::<_, Label>(
        "SELECT id, name, article_id FROM labels WHERE article_id = ? ORDER BY id",
    )
    .bind(article_id)
    .fetch_all(executor)
    .await?;

    Ok(labels)
}

/// 라벨 이름이나 소속 글을 바꿉니다.
///
/// 라벨에는 타임스탬프가 없으므로, 바꿀 필드가 하나도 없으면 UPDATE 없이 현재 값을 반환합니다.
pub async fn update_label(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateLabelRequest,
) -> Result<Option<Label>, AppError> {
    if req.name.is_none() && req.article_id.is_none() {
        return get_label(pool, id).await;
    }

    let mut tx = pool.begin().await?;

    let mut query = QueryBuilder::<Sqlite>::new("UPDATE labels SET ");
    let mut assignments = query.separated(", ");
    if let Some(name) = &req.name {
        assignments.push("name = ").push_bind_unseparated(name.as_str());
    }
    if let Some(article_id) = req.article_id {
        assignments.push("article_id = ").push_bind_unseparated(article_id);
    }
    query.push(" WHERE id = ").push_bind(id);

    let result = query.build().execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let label = fetch_label(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(label)
}

pub async fn delete_label(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM labels WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::*;

    #[tokio::test]
    async fn label_requires_existing_article() {
        let pool = memory_pool().await;

        let err = create_label(
            &pool,
            &CreateLabelRequest {
                name: "rust".to_string(),
                article_id: 7,
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn rename_and_move_label() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let first = seed_article(&pool, alice.id, "First", "body").await;
        let second = seed_article(&pool, alice.id, "Second", "body").await;
        let label = seed_label(&pool, first.id, "rsut").await;

        let renamed = update_label(
            &pool,
            label.id,
            &UpdateLabelRequest {
                name: Some("rust".to_string()),
                ..Default::default()
            },
        )
        .await?
        .expect("label exists");
        assert_eq!(renamed.name, "rust");
        assert_eq!(renamed.article_id, first.id);

        let moved = update_label(
            &pool,
            label.id,
            &UpdateLabelRequest {
                article_id: Some(second.id),
                ..Default::default()
            },
        )
        .await?
        .expect("label exists");
        assert_eq!(moved.article_id, second.id);

        assert!(list_labels_for_article(&pool, first.id).await?.is_empty());
        assert_eq!(list_labels_for_article(&pool, second.id).await?, vec![moved.clone()]);

        let unchanged = update_label(&pool, label.id, &UpdateLabelRequest::default()).await?;
        assert_eq!(unchanged, Some(moved));
        Ok(())
    }

    #[tokio::test]
    async fn missing_label_update_and_delete() -> Result<(), AppError> {
        let pool = memory_pool().await;

        let update = UpdateLabelRequest {
            name: Some("x".to_string()),
            ..Default::default()
        };
        assert!(update_label(&pool, 1, &update).await?.is_none());
        assert!(update_label(&pool, 1, &UpdateLabelRequest::default()).await?.is_none());
        assert!(!delete_label(&pool, 1).await?);
        Ok(())
    }
}
