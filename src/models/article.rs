use serde::{Deserialize, Serialize};

/// `articles` 테이블 한 행
///
/// 작성자는 `author_id`로만 참조합니다. 삭제 시 댓글과 라벨이 함께 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_time: String,
    pub updated_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i64>,
}
