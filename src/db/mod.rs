//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 저장소와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `schema`: 테이블 정의와 인덱스 레지스트리, 스키마 생성
//! - `users` / `articles` / `comments` / `labels`: 엔티티별 CRUD 쿼리
//! - `queries`: 페이지네이션 목록, 키워드 검색, 관계 포함 조회
//!
//! ## 세션(Session)
//! 연결 풀은 `connect()`로 명시적으로 만듭니다 (전역 상태 없음).
//! 조회 헬퍼는 호출마다 풀에서 연결 하나를 빌려(`acquire`) 단독으로 사용하고,
//! 연결은 스코프를 벗어날 때(`Drop`) 에러 경로를 포함해 항상 풀로 반환됩니다.

pub mod articles;
pub mod comments;
pub mod labels;
pub mod queries;
pub mod schema;
pub mod users;

pub use articles::*;
pub use comments::*;
pub use labels::*;
pub use queries::*;
pub use schema::*;
pub use users::*;

use crate::config::{Config, PoolSettings};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// 설정으로부터 연결 풀을 만듭니다.
///
/// SQLite 파일이 없으면 새로 만들고, 모든 연결에서 외래키 제약을 켭니다.
/// (연쇄 삭제 `ON DELETE CASCADE`가 동작하려면 필수)
///
/// # 에러
/// - `AppError::UnsupportedDatabase`: SQLite가 아닌 종류가 설정된 경우
/// - `AppError::Database`: 연결 실패
pub async fn connect(config: &Config) -> Result<SqlitePool, AppError> {
    if !config.is_sqlite() {
        return Err(AppError::UnsupportedDatabase(config.kind.clone()));
    }

    let options = SqliteConnectOptions::from_str(&config.database_url())?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = pool_options(&config.pool).connect_with(options).await?;
    tracing::info!(url = %config.redacted_url(), "Connected to database");

    Ok(pool)
}

fn pool_options(settings: &PoolSettings) -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .min_connections(settings.size)
        .max_connections(settings.max_connections())
        .max_lifetime(settings.recycle)
        .test_before_acquire(settings.pre_ping)
}
