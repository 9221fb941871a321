//! # 루트 페이지 핸들러
//!
//! - `GET /` → HTML 인사말

use axum::response::Html;

/// `GET /` — 서비스 인사말을 HTML로 반환합니다.
///
/// State 등 아무 Extractor도 필요 없고, 실패하지 않는 핸들러입니다.
/// `Html` 래퍼가 Content-Type: text/html 헤더를 설정합니다.
pub async fn home() -> Html<&'static str> {
    Html("<h1>Recipes API</h1>")
}
