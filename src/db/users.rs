use crate::error::AppError;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

const USER_COLUMNS: &str =
    "id, name, email, password, gender, avatar_url, created_time, updated_time";

pub async fn create_user(pool: &SqlitePool, req: &CreateUserRequest) -> Result<User, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password, gender, avatar_url)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.password)
    .bind(&req.gender)
    .bind(&req.avatar_url)
    .execute(pool)
    .await?;

    get_user(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    fetch_user(pool, id).await
}

async fn fetch_user<'e, E>(executor: E, id: i64) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(user)
}

/// 이메일로 사용자를 찾습니다. 이메일은 유일 제약이 없으므로 가장 먼저 가입한 사용자를 반환합니다.
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ? ORDER BY id LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// 사용자 정보를 부분 업데이트합니다.
///
/// 요청에 들어 있는 필드만 바꾸고 `updated_time`을 현재 시각으로 갱신합니다.
/// 해당 id가 없으면 `Ok(None)`.
pub async fn update_user(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateUserRequest,
) -> Result<Option<User>, AppError> {
    let mut tx = pool.begin().await?;

    let mut query = QueryBuilder::<Sqlite>::new(
        "UPDATE users SET updated_time = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(name) = &req.name {
        query.push(", name = ").push_bind(name.as_str());
    }
    if let Some(email) = &req.email {
        query.push(", email = ").push_bind(email.as_str());
    }
    if let Some(password) = &req.password {
        query.push(", password = ").push_bind(password.as_str());
    }
    if let Some(gender) = &req.gender {
        query.push(", gender = ").push_bind(gender.as_str());
    }
    if let Some(avatar_url) = &req.avatar_url {
        query.push(", avatar_url = ").push_bind(avatar_url.as_deref());
    }
    query.push(" WHERE id = ").push_bind(id);

    let result = query.build().execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let user = fetch_user(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(user)
}

/// 사용자를 삭제합니다.
///
/// 사용자의 글(과 그 글의 댓글, 라벨)과 사용자가 쓴 댓글이 함께 삭제됩니다.
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
