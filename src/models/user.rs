use serde::{Deserialize, Serialize};

/// `users` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub gender: String,
    pub avatar_url: Option<String>,
    pub created_time: String,
    pub updated_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    /// None = 변경 안 함, Some(None) = 아바타 제거, Some(Some(url)) = 교체
    pub avatar_url: Option<Option<String>>,
}
