//! # 데이터 모델 모듈
//!
//! - `recipe`: 레시피 문서와 생성/수정 요청 구조체
//!
//! `pub use recipe::*;`로 재공개하여 `crate::models::Recipe`처럼 짧게 접근합니다.

pub mod recipe;

pub use recipe::*;
