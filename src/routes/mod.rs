//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `home`: 루트 인사말 페이지
//! - `recipes`: 레시피 CRUD 핸들러

pub mod home;
pub mod recipes;

pub use home::*;
pub use recipes::*;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀. 서버 시작 시 한 번 만들어 모든 요청이 공유합니다.
    pub pool: SqlitePool,
}

/// 전체 라우터를 구성합니다.
///
/// API 라우트에 매칭되지 않는 요청은 `public_dir`의 정적 파일로 넘어갑니다.
pub fn app(state: AppState, public_dir: &str) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/recipes", get(list_recipes).post(create_recipe))
        // {id}는 URL 경로 파라미터 (Path<String>으로 핸들러에서 추출)
        .route(
            "/recipes/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .with_state(state)
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}
