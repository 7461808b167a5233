//! # 에러 처리 모듈
//!
//! 라이브러리에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 저장소 계층의 에러(연결 실패, 제약 조건 위반 등)는 도메인 에러로
//! 번역하지 않고 `AppError::Database`로 감싸 그대로 전달합니다.
//! "찾을 수 없음"은 에러가 아니라 `Ok(None)` / `Ok(false)`로 표현합니다.

use thiserror::Error;

/// 라이브러리 전체에서 사용하는 에러 타입
#[derive(Debug, Error)]
pub enum AppError {
    /// 데이터베이스 오류
    /// #[from]: sqlx 함수의 결과에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 페이지 번호나 페이지 크기가 0인 경우
    #[error("Invalid pagination: page={page}, page_size={page_size} (both must be at least 1)")]
    InvalidPagination { page: u32, page_size: u32 },

    /// 연결 풀 드라이버가 없는 데이터베이스 종류
    #[error("Unsupported database kind: {0}")]
    UnsupportedDatabase(String),

    /// 내부 오류 (예: 방금 삽입한 행을 다시 읽지 못함)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 외래키 제약 조건 위반인지 확인합니다.
    ///
    /// 존재하지 않는 작성자로 글을 만드는 경우 등에서 발생합니다.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db_err)) => {
                db_err.kind() == sqlx::error::ErrorKind::ForeignKeyViolation
            }
            _ => false,
        }
    }
}
