//! # 페이지네이션과 조회 결과 구조체
//!
//! 목록/검색 조회가 돌려주는 `ArticlePage`와,
//! 글 하나와 그 관계(댓글, 라벨)를 묶은 `ArticleWithRelations`를 정의합니다.
//!
//! ## 페이지 계산
//! ```text
//! offset      = (page - 1) * page_size
//! total_pages = ceil(total / page_size) = (total + page_size - 1) / page_size
//! ```

use serde::{Deserialize, Serialize};

use super::{Article, Comment, Label};
use crate::error::AppError;

/// 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// 1부터 시작하는 페이지 번호와 페이지 크기
///
/// `new()`를 거쳐야만 만들 수 있으므로 두 값 모두 항상 1 이상입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    /// 페이지 번호나 크기가 0이면 `AppError::InvalidPagination`을 반환합니다.
    pub fn new(page: u32, page_size: u32) -> Result<Self, AppError> {
        if page == 0 || page_size == 0 {
            return Err(AppError::InvalidPagination { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 건너뛸 행 수
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.page_size))
    }

    /// SQL LIMIT 값
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// 전체 건수로부터 전체 페이지 수를 계산합니다 (올림 나눗셈).
    pub fn total_pages(&self, total: i64) -> i64 {
        let size = i64::from(self.page_size);
        (total + size - 1) / size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 글 목록 한 페이지와 페이지 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlePage {
    /// 생성 시각 내림차순으로 정렬된 이 페이지의 글
    pub articles: Vec<Article>,
    /// 조건에 맞는 전체 글 수
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

impl ArticlePage {
    pub fn new(articles: Vec<Article>, total: i64, pagination: Pagination) -> Self {
        Self {
            articles,
            total,
            page: pagination.page(),
            page_size: pagination.page_size(),
            total_pages: pagination.total_pages(total),
        }
    }

    /// 결과가 하나도 없는 페이지
    pub fn empty(pagination: Pagination) -> Self {
        Self::new(Vec::new(), 0, pagination)
    }
}

/// 글 하나와 그 글을 참조하는 모든 댓글, 라벨
///
/// 글이 없으면 이 구조체 대신 `None`이 반환되므로,
/// 이 값이 있다는 것은 글이 존재한다는 뜻입니다. 관계 목록은 비어 있을 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleWithRelations {
    pub article: Article,
    pub comments: Vec<Comment>,
    pub labels: Vec<Label>,
}
