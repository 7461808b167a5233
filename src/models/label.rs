//! # 라벨 모델 정의
//!
//! 라벨은 글 하나에 속하는 분류 이름입니다.
//! 다대다 관계가 아니라, 같은 이름이라도 글마다 별도의 행으로 저장됩니다.

use serde::{Deserialize, Serialize};

/// `labels` 테이블 한 행. 타임스탬프 컬럼은 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub article_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLabelRequest {
    pub name: String,
    pub article_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLabelRequest {
    pub name: Option<String>,
    pub article_id: Option<i64>,
}
