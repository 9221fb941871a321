//! # 에러 처리 모듈
//!
//! 이 서비스의 에러는 한 종류뿐입니다: "저장소 작업 실패".
//! DB 연결 문제, 잘못된 ID 형식, 존재하지 않는 문서, 잘못된 요청 본문 모두
//! 같은 범주로 취급되어 HTTP 500과 작업별 고정 메시지로 변환됩니다.
//!
//! 이 모듈의 핵심:
//! - `StoreError`: 실패 원인 (로그에만 기록)
//! - `Operation`: 실패한 작업 종류 (응답 메시지를 결정)
//! - `AppError`: 둘을 묶은 핸들러 에러. `IntoResponse`로 HTTP 응답이 됩니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 저장소 작업이 실패한 원인
#[derive(Debug, Error)]
pub enum StoreError {
    /// 데이터베이스 오류
    /// #[from]: `?` 연산자로 sqlx::Error가 자동 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// ID가 UUID 형식이 아님
    #[error("Invalid recipe id: {0}")]
    InvalidId(#[from] uuid::Error),

    /// 형식은 올바르지만 해당 ID의 문서가 없음
    #[error("No recipe with id {0}")]
    Missing(String),

    /// 요청 본문을 레시피 문서로 해석할 수 없음
    #[error("Malformed recipe document: {0}")]
    MalformedBody(#[from] JsonRejection),
}

/// 레시피 핸들러가 수행하는 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Operation {
    /// 클라이언트에게 보여줄 고정 메시지
    pub fn message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create a recipe",
            Operation::List => "Failed to get all recipes",
            Operation::Get => "Error while getting a recipe",
            Operation::Update => "Error while updating the recipe",
            Operation::Delete => "Failed to delete recipe",
        }
    }

    /// 메시지를 담을 JSON 필드 이름 (삭제만 `error`를 사용합니다)
    fn field(self) -> &'static str {
        match self {
            Operation::Delete => "error",
            _ => "message",
        }
    }
}

/// 핸들러에서 반환하는 에러
///
/// 핸들러가 `Result<T, AppError>`를 반환하면, Axum이 `IntoResponse`를 호출하여
/// 500 응답으로 변환합니다. 실패가 핸들러 밖으로 새어 나가는 일은 없습니다.
#[derive(Debug, Error)]
#[error("{}: {source}", .operation.message())]
pub struct AppError {
    pub operation: Operation,
    #[source]
    pub source: StoreError,
}

/// `Result<T, E>`에 실패한 작업 정보를 붙이는 확장 트레이트
///
/// 예: `db::list_recipes(&pool).await.during(Operation::List)?`
pub trait ResultExt<T> {
    fn during(self, operation: Operation) -> Result<T, AppError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<StoreError>,
{
    fn during(self, operation: Operation) -> Result<T, AppError> {
        self.map_err(|e| AppError {
            operation,
            source: e.into(),
        })
    }
}

impl IntoResponse for AppError {
    /// 원인은 로그에만 남기고, 클라이언트에는 작업별 고정 메시지만 반환합니다.
    fn into_response(self) -> Response {
        tracing::error!(operation = ?self.operation, "{}", self.source);

        let field = self.operation.field();
        let body = Json(json!({ field: self.operation.message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
