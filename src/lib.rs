//! # article-system
//!
//! 글 발행 애플리케이션(사용자, 글, 댓글, 라벨)의 관계형 데이터 모델과
//! 페이지네이션/검색 조회 헬퍼입니다.
//!
//! - `config`: 환경변수 기반 접속 설정과 연결 문자열
//! - `db`: 연결 풀, 스키마/인덱스 생성, 엔티티 CRUD, 조회 헬퍼
//! - `models`: 엔티티와 조회 결과 구조체
//! - `error`: `AppError`
//!
//! ```no_run
//! use article_system::{config::Config, db, models::Pagination};
//!
//! # async fn run() -> Result<(), article_system::error::AppError> {
//! let pool = db::connect(&Config::from_env()).await?;
//! db::create_tables(&pool).await?;
//! let page = db::list_articles(&pool, Pagination::new(1, 20)?, None).await?;
//! println!("{} articles", page.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
