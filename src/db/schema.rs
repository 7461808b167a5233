//! # 스키마 정의와 인덱스 레지스트리
//!
//! 네 개의 테이블(`users`, `articles`, `comments`, `labels`)과
//! 자주 필터링/정렬되는 컬럼의 보조 인덱스를 선언합니다.
//!
//! ## 소유 관계
//! ```text
//! users ──< articles ──< comments
//!   │           └──────< labels
//!   └──────────────────< comments (작성자, 비소유 참조이지만 함께 삭제)
//! ```
//! 모든 외래키는 `ON DELETE CASCADE`이므로 사용자를 지우면
//! 그 사용자의 글, 그 글들의 댓글/라벨, 그 사용자가 쓴 댓글이 모두 삭제됩니다.
//!
//! 인덱스는 조회 시점이 아니라 스키마 생성 시점에만 만듭니다.

use crate::error::AppError;
use sqlx::SqlitePool;

/// 테이블 이름과 생성 DDL (생성 순서대로: 부모 → 자식)
pub const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         VARCHAR(255) NOT NULL,
            email        VARCHAR(255) NOT NULL,
            password     VARCHAR(255) NOT NULL,
            gender       VARCHAR(255) NOT NULL,
            avatar_url   VARCHAR(255),
            created_time TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_time TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    ),
    (
        "articles",
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        VARCHAR(255) NOT NULL,
            content      TEXT NOT NULL,
            author_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_time TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_time TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    ),
    (
        "comments",
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            content      TEXT NOT NULL,
            author_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            article_id   INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
            created_time TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_time TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    ),
    (
        "labels",
        r#"
        CREATE TABLE IF NOT EXISTS labels (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       VARCHAR(255) NOT NULL,
            article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE
        )
        "#,
    ),
];

/// 단일 컬럼 보조 인덱스 선언
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

impl IndexDef {
    const fn new(name: &'static str, table: &'static str, column: &'static str) -> Self {
        Self { name, table, column }
    }

    /// 이미 있으면 아무 일도 하지 않는 CREATE INDEX 문
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            self.name, self.table, self.column
        )
    }
}

/// 인덱스 레지스트리
pub const INDEXES: &[IndexDef] = &[
    // 글: 작성자 필터, 생성 시각 정렬, 제목 검색
    IndexDef::new("idx_article_author", "articles", "author_id"),
    IndexDef::new("idx_article_created_time", "articles", "created_time"),
    IndexDef::new("idx_article_title", "articles", "title"),
    // 댓글
    IndexDef::new("idx_comment_article", "comments", "article_id"),
    IndexDef::new("idx_comment_author", "comments", "author_id"),
    IndexDef::new("idx_comment_created_time", "comments", "created_time"),
    // 라벨
    IndexDef::new("idx_label_article", "labels", "article_id"),
    IndexDef::new("idx_label_name", "labels", "name"),
    // 사용자
    IndexDef::new("idx_user_email", "users", "email"),
    IndexDef::new("idx_user_created_time", "users", "created_time"),
];

/// 모든 테이블과 인덱스를 만듭니다.
///
/// 하나의 트랜잭션 안에서 `IF NOT EXISTS`로 실행하므로
/// 이미 준비된 데이터베이스에 여러 번 호출해도 안전합니다.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    for &(name, ddl) in TABLES {
        sqlx::query(ddl).execute(&mut *tx).await?;
        tracing::debug!(table = name, "Ensured table");
    }

    for index in INDEXES {
        sqlx::query(&index.create_sql()).execute(&mut *tx).await?;
        tracing::debug!(index = index.name, table = index.table, "Ensured index");
    }

    tx.commit().await?;
    tracing::info!(
        tables = TABLES.len(),
        indexes = INDEXES.len(),
        "Schema is ready"
    );

    Ok(())
}
