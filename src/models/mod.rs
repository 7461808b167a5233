//! # 데이터 모델 모듈
//!
//! 저장소 테이블 한 행에 대응하는 엔티티 구조체와
//! 생성/수정 요청 구조체, 조회 결과 구조체를 정의합니다.
//! - `user`: 사용자(User)
//! - `article`: 글(Article)
//! - `comment`: 댓글(Comment)
//! - `label`: 라벨(Label)
//! - `page`: 페이지네이션 입력과 조회 결과 묶음
//!
//! 관계는 역참조 포인터 없이 외래키 id 필드로만 표현합니다.
//! 관계 탐색은 `db` 모듈의 명시적 조회로 합니다.

pub mod article;
pub mod comment;
pub mod label;
pub mod page;
pub mod user;

pub use article::*;
pub use comment::*;
pub use label::*;
pub use page::*;
pub use user::*;
