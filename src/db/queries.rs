//! # 조회 헬퍼 모듈
//!
//! 읽기 전용 조회 세 가지를 제공합니다.
//! - `list_articles`: 작성자 필터가 있는 페이지네이션 목록
//! - `search_articles`: 제목/본문 부분 문자열 검색
//! - `get_article_with_relations`: 글과 그 댓글, 라벨을 한 번에 조회
//!
//! 각 함수는 풀에서 연결 하나(세션)를 빌려 모든 쿼리를 그 연결에서 실행합니다.
//! 연결은 함수가 끝나면(에러로 끝나더라도) `Drop`으로 풀에 반환됩니다.
//!
//! ## 정렬
//! 목록과 검색은 `created_time DESC, id DESC`로 정렬합니다.
//! 같은 밀리초에 만들어진 글도 순서가 고정되므로, 쓰기가 없는 동안
//! 1..N 페이지를 이어 붙이면 페이지 없이 조회한 결과와 같습니다.

use crate::db::articles::{fetch_article, ARTICLE_COLUMNS};
use crate::db::comments::fetch_comments_for_article;
use crate::db::labels::fetch_labels_for_article;
use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 글 목록을 페이지 단위로 조회합니다.
///
/// `author_id`가 주어지면 그 사용자가 쓴 글만 포함합니다.
///
/// ## SQL 쿼리 설명
/// ```sql
/// SELECT COUNT(*) FROM articles [WHERE author_id = ?]   -- 전체 건수
/// SELECT ... FROM articles [WHERE author_id = ?]
/// ORDER BY created_time DESC, id DESC
/// LIMIT page_size OFFSET (page - 1) * page_size          -- 이 페이지의 글
/// ```
pub async fn list_articles(
    pool: &SqlitePool,
    pagination: Pagination,
    author_id: Option<i64>,
) -> Result<ArticlePage, AppError> {
    tracing::debug!(
        page = pagination.page(),
        page_size = pagination.page_size(),
        author_id,
        "Listing articles"
    );

    let mut conn = pool.acquire().await?;

    let filter = if author_id.is_some() {
        " WHERE author_id = ?"
    } else {
        ""
    };

    let count_sql = format!("SELECT COUNT(*) FROM articles{filter}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(author_id) = author_id {
        count_query = count_query.bind(author_id);
    }
    let total = count_query.fetch_one(&mut *conn).await?;

    if total == 0 {
        return Ok(ArticlePage::empty(pagination));
    }

    let page_sql = format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles{filter} \
         ORDER BY created_time DESC, id DESC LIMIT ? OFFSET ?"
    );
    let mut page_query = sqlx::query_as::<_, Article>(&page_sql);
    if let Some(author_id) = author_id {
        page_query = page_query.bind(author_id);
    }
    let articles = page_query
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&mut *conn)
        .await?;

    Ok(ArticlePage::new(articles, total, pagination))
}

/// 제목 또는 본문에 키워드가 포함된 글을 검색합니다.
///
/// 순위가 있는 전문검색이 아니라 `LIKE '%키워드%'` 순차 탐색입니다.
/// SQLite의 `LIKE`는 ASCII 범위에서 대소문자를 구분하지 않습니다.
///
/// - 빈 키워드는 저장소에 묻지 않고 빈 페이지를 반환합니다.
///   공백도 부분 문자열이므로 `" "`는 공백이 들어 있는 글과 매칭됩니다.
/// - 키워드의 `%`, `_`, `\`는 와일드카드가 아닌 문자 그대로 매칭됩니다.
pub async fn search_articles(
    pool: &SqlitePool,
    keyword: &str,
    pagination: Pagination,
) -> Result<ArticlePage, AppError> {
    if keyword.is_empty() {
        return Ok(ArticlePage::empty(pagination));
    }

    tracing::debug!(
        keyword,
        page = pagination.page(),
        page_size = pagination.page_size(),
        "Searching articles"
    );

    let pattern = contains_pattern(keyword);
    let mut conn = pool.acquire().await?;

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM articles
        WHERE title LIKE ?1 ESCAPE '\' OR content LIKE ?1 ESCAPE '\'
        "#,
    )
    .bind(&pattern)
    .fetch_one(&mut *conn)
    .await?;

    if total == 0 {
        return Ok(ArticlePage::empty(pagination));
    }

    let articles = sqlx::query_as::<_, Article>(&format!(
        r#"
        SELECT {ARTICLE_COLUMNS}
        FROM articles
        WHERE title LIKE ?1 ESCAPE '\' OR content LIKE ?1 ESCAPE '\'
        ORDER BY created_time DESC, id DESC
        LIMIT ?2 OFFSET ?3
        "#
    ))
    .bind(&pattern)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(ArticlePage::new(articles, total, pagination))
}

/// 글 하나와 그 글의 모든 댓글, 라벨을 조회합니다.
///
/// JOIN 대신 같은 연결에서 쿼리 세 개를 순서대로 실행합니다.
///
/// ## 반환값
/// - `Ok(None)`: 글이 없음 (댓글/라벨은 조회하지 않음)
/// - `Ok(Some(..))`: 글이 있음. 댓글과 라벨 목록은 비어 있을 수 있음
pub async fn get_article_with_relations(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Option<ArticleWithRelations>, AppError> {
    tracing::debug!(article_id, "Fetching article with relations");

    let mut conn = pool.acquire().await?;

    let Some(article) = fetch_article(&mut *conn, article_id).await? else {
        return Ok(None);
    };
    let comments = fetch_comments_for_article(&mut *conn, article_id).await?;
    let labels = fetch_labels_for_article(&mut *conn, article_id).await?;

    Ok(Some(ArticleWithRelations {
        article,
        comments,
        labels,
    }))
}

/// 키워드를 `LIKE` 부분 문자열 패턴으로 바꿉니다. (이스케이프 문자: `\`)
fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::*;

    fn page(page: u32, page_size: u32) -> Pagination {
        Pagination::new(page, page_size).unwrap()
    }

    fn ids(articles: &[Article]) -> Vec<i64> {
        articles.iter().map(|a| a.id).collect()
    }

    /// 작성자 두 명과 글 `n`개(번갈아 작성)를 준비합니다. 반환값은 최신순 id.
    async fn seed_articles(pool: &SqlitePool, n: usize) -> (i64, i64, Vec<i64>) {
        let alice = seed_user(pool, "alice").await;
        let bob = seed_user(pool, "bob").await;
        let mut created = Vec::new();
        for i in 0..n {
            let author = if i % 2 == 0 { alice.id } else { bob.id };
            let article = seed_article(pool, author, &format!("Post {i}"), "body").await;
            created.push(article.id);
        }
        created.reverse();
        (alice.id, bob.id, created)
    }

    #[test]
    fn pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("snake_case"), "%snake\\_case%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[tokio::test]
    async fn listing_is_newest_first_with_page_metadata() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let (_, _, newest_first) = seed_articles(&pool, 7).await;

        let first = list_articles(&pool, page(1, 3), None).await?;
        assert_eq!(first.total, 7);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.page, 1);
        assert_eq!(first.page_size, 3);
        assert_eq!(ids(&first.articles), newest_first[..3].to_vec());

        let last = list_articles(&pool, page(3, 3), None).await?;
        assert_eq!(ids(&last.articles), newest_first[6..].to_vec());

        let beyond = list_articles(&pool, page(4, 3), None).await?;
        assert!(beyond.articles.is_empty());
        assert_eq!(beyond.total, 7);
        assert_eq!(beyond.total_pages, 3);
        Ok(())
    }

    #[tokio::test]
    async fn pages_concatenate_to_the_unpaginated_order() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let (_, _, newest_first) = seed_articles(&pool, 11).await;

        let all = list_articles(&pool, page(1, 100), None).await?;
        assert_eq!(ids(&all.articles), newest_first);

        for size in 1..=5u32 {
            let mut collected = Vec::new();
            let first = list_articles(&pool, page(1, size), None).await?;
            assert_eq!(first.total_pages, (11 + i64::from(size) - 1) / i64::from(size));
            for p in 1..=first.total_pages as u32 {
                let current = list_articles(&pool, page(p, size), None).await?;
                assert!(current.articles.len() <= size as usize);
                collected.extend(ids(&current.articles));
            }
            assert_eq!(collected, newest_first, "page_size={size}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn listing_filters_by_author() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let (alice, bob, _) = seed_articles(&pool, 5).await;

        let by_alice = list_articles(&pool, page(1, 10), Some(alice)).await?;
        assert_eq!(by_alice.total, 3);
        assert!(by_alice.articles.iter().all(|a| a.author_id == alice));

        let by_bob = list_articles(&pool, page(1, 1), Some(bob)).await?;
        assert_eq!(by_bob.total, 2);
        assert_eq!(by_bob.total_pages, 2);
        assert_eq!(by_bob.articles.len(), 1);

        let nobody = list_articles(&pool, page(1, 10), Some(999)).await?;
        assert_eq!(nobody.total, 0);
        assert_eq!(nobody.total_pages, 0);
        assert!(nobody.articles.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() -> Result<(), AppError> {
        let pool = memory_pool().await;

        let result = list_articles(&pool, Pagination::default(), None).await?;
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.page_size, DEFAULT_PAGE_SIZE);
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_title_or_content() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let in_title = seed_article(&pool, alice.id, "Borrow checker tips", "plain body").await;
        let in_content = seed_article(&pool, alice.id, "Weekly notes", "the borrow checker again").await;
        let unrelated = seed_article(&pool, alice.id, "Cooking", "pasta").await;

        let found = search_articles(&pool, "borrow checker", page(1, 10)).await?;
        assert_eq!(found.total, 2);
        assert_eq!(ids(&found.articles), vec![in_content.id, in_title.id]);
        assert!(!ids(&found.articles).contains(&unrelated.id));

        let paged = search_articles(&pool, "borrow", page(2, 1)).await?;
        assert_eq!(paged.total, 2);
        assert_eq!(paged.total_pages, 2);
        assert_eq!(ids(&paged.articles), vec![in_title.id]);
        Ok(())
    }

    #[tokio::test]
    async fn empty_or_unmatched_keyword_yields_empty_page() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        seed_article(&pool, alice.id, "Hello", "world").await;

        for keyword in ["", "absent"] {
            let result = search_articles(&pool, keyword, page(1, 10)).await?;
            assert!(result.articles.is_empty(), "keyword={keyword:?}");
            assert_eq!(result.total, 0);
            assert_eq!(result.total_pages, 0);
        }
        Ok(())
    }

    #[tokio::test]
    async fn whitespace_keyword_is_an_ordinary_substring() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let spaced_title = seed_article(&pool, alice.id, "Hello world", "one").await;
        let double_space = seed_article(&pool, alice.id, "Solid", "two  spaces").await;
        seed_article(&pool, alice.id, "Compact", "nospaces").await;

        let single = search_articles(&pool, " ", page(1, 10)).await?;
        assert_eq!(single.total, 2);
        assert_eq!(ids(&single.articles), vec![double_space.id, spaced_title.id]);

        let double = search_articles(&pool, "  ", page(1, 10)).await?;
        assert_eq!(double.total, 1);
        assert_eq!(double.total_pages, 1);
        assert_eq!(ids(&double.articles), vec![double_space.id]);
        Ok(())
    }

    #[tokio::test]
    async fn wildcard_characters_match_literally() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let percent = seed_article(&pool, alice.id, "100% safe", "body").await;
        seed_article(&pool, alice.id, "1000 lines", "body").await;
        let underscore = seed_article(&pool, alice.id, "snake_case", "body").await;
        seed_article(&pool, alice.id, "snakeXcase", "body").await;

        let found = search_articles(&pool, "0%", page(1, 10)).await?;
        assert_eq!(ids(&found.articles), vec![percent.id]);

        let found = search_articles(&pool, "e_c", page(1, 10)).await?;
        assert_eq!(ids(&found.articles), vec![underscore.id]);
        Ok(())
    }

    #[tokio::test]
    async fn relations_for_missing_article_are_absent() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let article = seed_article(&pool, alice.id, "Gone soon", "body").await;
        crate::db::delete_article(&pool, article.id).await?;

        assert!(get_article_with_relations(&pool, article.id).await?.is_none());
        assert!(get_article_with_relations(&pool, 12345).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn relations_present_with_empty_lists() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let article = seed_article(&pool, alice.id, "Lonely", "no replies").await;

        let fetched = get_article_with_relations(&pool, article.id)
            .await?
            .expect("article exists");
        assert_eq!(fetched.article, article);
        assert!(fetched.comments.is_empty());
        assert!(fetched.labels.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn relations_include_only_this_articles_children() -> Result<(), AppError> {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let article = seed_article(&pool, alice.id, "Main", "body").await;
        let other = seed_article(&pool, bob.id, "Other", "body").await;

        let c1 = seed_comment(&pool, bob.id, article.id, "first").await;
        let c2 = seed_comment(&pool, alice.id, article.id, "second").await;
        seed_comment(&pool, alice.id, other.id, "elsewhere").await;
        let l1 = seed_label(&pool, article.id, "rust").await;
        seed_label(&pool, other.id, "misc").await;

        let fetched = get_article_with_relations(&pool, article.id)
            .await?
            .expect("article exists");
        assert_eq!(fetched.article.id, article.id);
        assert_eq!(fetched.comments, vec![c1, c2]);
        assert_eq!(fetched.labels, vec![l1]);
        Ok(())
    }
}
