use serde::{Deserialize, Serialize};

/// `comments` 테이블 한 행
///
/// 글(`article_id`)과 작성자(`author_id`) 양쪽을 참조하며,
/// 둘 중 하나가 삭제되면 함께 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub article_id: i64,
    pub created_time: String,
    pub updated_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub author_id: i64,
    pub article_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
    pub author_id: Option<i64>,
    pub article_id: Option<i64>,
}
