//! # article-system CLI 진입점
//!
//! 이 파일은 article-system 바이너리의 **시작점(entry point)**입니다.
//! 라이브러리(`article_system`)가 제공하는 스키마 생성과 조회 함수를
//! 명령줄에서 호출할 수 있게 감싸는 얇은 층입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화 (stderr로 출력, stdout은 JSON 결과 전용)
//! 3. 명령줄 인자 파싱
//! 4. 설정을 읽어 연결 풀 생성
//! 5. 서브커맨드 실행
//!
//! ## 서브커맨드
//! - `init`: 테이블과 인덱스 생성
//! - `articles`: 글 목록 (페이지, 작성자 필터)
//! - `search <KEYWORD>`: 제목/본문 검색
//! - `show <ID>`: 글과 댓글, 라벨 (없으면 `null`)

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
// 바이너리는 같은 패키지의 라이브러리 크레이트를 `article_system::...` 경로로 사용합니다.
use anyhow::Result; // 어떤 에러 타입이든 `?`로 전파할 수 있는 범용 Result
use article_system::{config::Config, db, models::Pagination, models::DEFAULT_PAGE_SIZE};
use clap::{Args, Parser, Subcommand}; // clap: derive 매크로 기반 명령줄 파서
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[derive(Parser)]: 구조체 정의로부터 명령줄 파서를 자동 생성합니다.
// 필드의 doc 주석(`///`)은 그대로 `--help` 출력의 설명이 됩니다.
#[derive(Parser, Debug)]
#[command(
    name = "article-system",
    version,
    about = "Schema provisioning and read queries for the article database"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// #[derive(Subcommand)]: enum의 각 variant가 하나의 서브커맨드가 됩니다.
// 예: `Commands::Show { id }` ↔ `article-system show 42`
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create all tables and indexes (safe to run repeatedly)
    Init,
    /// List articles newest first
    Articles {
        // #[command(flatten)]: PageArgs의 옵션(--page, --page-size)을 이 서브커맨드에 펼쳐 넣음
        #[command(flatten)]
        page: PageArgs,
        /// Only articles written by this user id
        #[arg(long)]
        author: Option<i64>, // 옵션을 주지 않으면 None (필터 없음)
    },
    /// Find articles whose title or content contains KEYWORD
    Search {
        keyword: String, // 위치 인자 (`--` 없이 그대로 받음)
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one article with its comments and labels
    Show { id: i64 },
}

/// 목록/검색 서브커맨드가 공유하는 페이지 옵션
#[derive(Args, Debug)]
struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

impl PageArgs {
    // 0 페이지나 0 크기는 여기서 AppError::InvalidPagination으로 거절됩니다.
    // `?`가 AppError를 anyhow::Error로 자동 변환합니다.
    fn pagination(&self) -> Result<Pagination> {
        Ok(Pagination::new(self.page, self.page_size)?)
    }
}

// #[tokio::main]: 비동기 런타임(Tokio)을 만들고 main을 그 안에서 실행하는 매크로
// sqlx의 모든 쿼리는 async이므로 런타임이 필요합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일에서 DATA_* 변수를 읽어옵니다.
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다. (시스템 환경변수만 사용)
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry()에 필터와 포맷터를 레이어처럼 쌓아 전역 로거로 등록합니다.
    tracing_subscriber::registry()
        .with(
            // RUST_LOG가 없으면 이 크레이트는 info, sqlx는 warn 레벨
            // sqlx 문장 로그(실행한 SQL)를 보려면 RUST_LOG=sqlx=debug
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_system=info,sqlx=warn".into()),
        )
        // stdout은 JSON 결과만 내보내야 파이프로 넘길 수 있으므로 로그는 stderr로 보냅니다.
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // ── 3단계: 명령줄 인자 파싱 ──
    // 잘못된 인자나 --help는 여기서 메시지를 출력하고 프로세스를 종료합니다.
    let cli = Cli::parse();

    // ── 4단계: 설정 로딩 및 연결 풀 생성 ──
    // Config::from_env()는 모든 항목에 기본값이 있어 실패하지 않습니다.
    // 로그에는 비밀번호를 가린 URL만 남깁니다.
    let config = Config::from_env();
    tracing::info!(url = %config.redacted_url(), "Using database");

    // SQLite가 아닌 종류(DATA_TYPE=mysql 등)는 여기서 UnsupportedDatabase 에러
    let pool = db::connect(&config).await?;

    // ── 5단계: 서브커맨드 실행 ──
    // 각 조회 함수는 풀에서 연결 하나를 빌려 쓰고, 끝나면 자동으로 반환합니다.
    match cli.command {
        Commands::Init => {
            // IF NOT EXISTS로 만들므로 여러 번 실행해도 안전합니다.
            db::create_tables(&pool).await?;
            println!("Database ready: {}", config.redacted_url());
        }
        Commands::Articles { page, author } => {
            let result = db::list_articles(&pool, page.pagination()?, author).await?;
            print_json(&result)?;
        }
        Commands::Search { keyword, page } => {
            let result = db::search_articles(&pool, &keyword, page.pagination()?).await?;
            print_json(&result)?;
        }
        Commands::Show { id } => {
            // Option<ArticleWithRelations>: 글이 없으면 JSON `null`
            let result = db::get_article_with_relations(&pool, id).await?;
            print_json(&result)?;
        }
    }

    // 열려 있는 연결을 정리하고 종료합니다. (SQLite 파일 잠금 해제)
    pool.close().await;
    Ok(())
}

/// 결과를 들여쓴 JSON으로 stdout에 출력합니다.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
