//! # 레시피(Recipe) 라우트 핸들러
//!
//! 레시피의 CRUD(생성/조회/수정/삭제)를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `POST   /recipes`      → 새 레시피 생성 (201)
//! - `GET    /recipes`      → 전체 레시피 목록 (200)
//! - `GET    /recipes/{id}` → 단일 레시피 조회 (200)
//! - `PUT    /recipes/{id}` → 레시피 부분 수정 (200)
//! - `DELETE /recipes/{id}` → 레시피 삭제 (204)
//!
//! ## 에러 처리
//! 각 핸들러는 저장소 호출의 실패를 `.during(Operation::...)`로 감싸
//! `AppError`로 바꿉니다. 원인과 관계없이 응답은 항상 500과 작업별 메시지입니다.
//! 존재하지 않는 ID도 조회/수정에서는 같은 500 응답이 됩니다.

use crate::{
    db,
    error::{AppError, Operation, ResultExt, StoreError},
    models::*,
    routes::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

/// `POST /recipes` — 새 레시피를 생성합니다.
///
/// # Extractor
/// - `payload`: `Json<RecipeInput>` 대신 `Result`로 받습니다.
///   Axum의 기본 동작은 잘못된 본문에 4xx를 돌려주지만, 이 서비스에서는
///   다른 저장소 실패와 똑같이 500으로 응답해야 하기 때문입니다.
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    // 구조 분해 패턴: Json(input)에서 내부 값만 꺼냅니다.
    // 본문이 JSON이 아니거나 필드 타입이 맞지 않으면 여기서 500으로 끝납니다.
    let Json(input) = payload.during(Operation::Create)?;

    let recipe = db::create_recipe(&state.pool, &input)
        .await
        .during(Operation::Create)?;
    tracing::info!(id = %recipe.id, "Recipe created");

    // (StatusCode, Json) 튜플: 201 Created와 함께 생성된 문서를 반환
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// `GET /recipes` — 전체 레시피 목록을 조회합니다.
///
/// 필터나 페이지네이션 없이 배열 그대로 반환합니다. 비어 있으면 `[]`입니다.
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = db::list_recipes(&state.pool)
        .await
        .during(Operation::List)?;
    tracing::debug!(count = recipes.len(), "Listed recipes");

    Ok(Json(recipes))
}

/// `GET /recipes/{id}` — 단일 레시피를 조회합니다.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = db::get_recipe(&state.pool, &id)
        .await
        // .and_then(): 조회 결과가 None이면 "없음"도 같은 저장소 실패로 바꿉니다.
        .and_then(|found| found.ok_or(StoreError::Missing(id)))
        .during(Operation::Get)?;
    tracing::debug!(id = %recipe.id, "Fetched recipe");

    Ok(Json(recipe))
}

/// `PUT /recipes/{id}` — 레시피를 부분 수정합니다.
///
/// 요청 본문에 포함된 필드만 덮어씁니다.
/// 예: `{ "isArchived": true }` → 보관 여부만 변경, 나머지는 그대로
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>, AppError> {
    let Json(input) = payload.during(Operation::Update)?;

    let recipe = db::update_recipe(&state.pool, &id, &input)
        .await
        .and_then(|updated| updated.ok_or(StoreError::Missing(id)))
        .during(Operation::Update)?;
    tracing::info!(id = %recipe.id, "Recipe updated");

    Ok(Json(recipe))
}

/// `DELETE /recipes/{id}` — 레시피를 삭제합니다.
///
/// 문서가 실제로 지워졌는지와 관계없이 204 No Content를 반환합니다.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    // deleted는 로그에만 쓰입니다. 없던 문서를 지워도 응답은 같습니다.
    let deleted = db::delete_recipe(&state.pool, &id)
        .await
        .during(Operation::Delete)?;
    tracing::info!(%id, deleted, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::{
        db,
        routes::{app, AppState},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        // 테스트마다 독립된 인메모리 DB를 사용합니다.
        let pool = db::memory_pool().await;
        app(AppState { pool }, "public")
    }

    /// 요청을 보내고 (상태 코드, 본문 바이트)를 돌려줍니다.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create(app: &Router, body: Value) -> Value {
        let (status, created) = send_json(app, "POST", "/recipes", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        created
    }

    #[tokio::test]
    async fn home_serves_html_greeting() {
        let app = test_app().await;

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("<h1>"));
    }

    #[tokio::test]
    async fn create_echoes_fields_with_generated_id() {
        let app = test_app().await;

        let created = create(&app, json!({ "title": "Pasta", "duration": 20 })).await;

        assert_eq!(created["title"], "Pasta");
        assert_eq!(created["duration"], 20);
        assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(created["isArchived"], false);
        assert_eq!(created["ingredients"], json!([]));
    }

    #[tokio::test]
    async fn create_keeps_every_submitted_field() {
        let app = test_app().await;
        let submitted = json!({
            "title": "Carbonara",
            "instructions": "Mix eggs and cheese.",
            "level": "Amateur Chef",
            "ingredients": ["spaghetti", "eggs", "pecorino"],
            "image": "https://images.example.com/carbonara.jpg",
            "duration": 25,
            "isArchived": true,
            "created": "2024-03-01T12:00:00Z"
        });

        let created = create(&app, submitted.clone()).await;

        for (key, value) in submitted.as_object().unwrap() {
            assert_eq!(&created[key], value, "field {key}");
        }
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let app = test_app().await;

        let first = create(&app, json!({ "title": "Soup" })).await;
        let second = create(&app, json!({ "title": "Soup" })).await;

        assert_ne!(first["id"], second["id"]);
    }

    #[tokio::test]
    async fn create_with_wrong_field_type_is_a_fault() {
        let app = test_app().await;

        let (status, body) =
            send_json(&app, "POST", "/recipes", Some(json!({ "duration": "forever" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to create a recipe" }));
    }

    #[tokio::test]
    async fn list_on_empty_collection_is_empty_array() {
        let app = test_app().await;

        let (status, body) = send_json(&app, "GET", "/recipes", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn list_returns_all_created_documents() {
        let app = test_app().await;
        for title in ["Pasta", "Soup", "Salad", "Cake"] {
            create(&app, json!({ "title": title })).await;
        }

        let (status, body) = send_json(&app, "GET", "/recipes", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn get_returns_created_document() {
        let app = test_app().await;
        let created = create(&app, json!({ "title": "Pasta", "level": "Easy Peasy" })).await;
        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());

        let (status, fetched) = send_json(&app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_a_fault() {
        let app = test_app().await;

        let (status, body) = send_json(&app, "GET", "/recipes/12345", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Error while getting a recipe" }));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let app = test_app().await;
        let created = create(
            &app,
            json!({ "title": "Pasta", "duration": 20, "ingredients": ["flour", "eggs"] }),
        )
        .await;
        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());

        let (status, updated) =
            send_json(&app, "PUT", &uri, Some(json!({ "isArchived": true }))).await;

        assert_eq!(status, StatusCode::OK);
        let mut expected = created.clone();
        expected["isArchived"] = json!(true);
        assert_eq!(updated, expected);

        let (_, fetched) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn fractional_duration_survives_create_and_update() {
        let app = test_app().await;
        let created = create(&app, json!({ "title": "Tea", "duration": 2.5 })).await;
        assert_eq!(created["duration"], 2.5);

        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());
        let (status, updated) =
            send_json(&app, "PUT", &uri, Some(json!({ "duration": 7.25 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["duration"], 7.25);
        assert_eq!(updated["title"], "Tea");
    }

    #[tokio::test]
    async fn update_with_null_clears_image() {
        let app = test_app().await;
        let created = create(&app, json!({ "title": "Tea", "image": "x.png" })).await;
        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());

        let (status, updated) =
            send_json(&app, "PUT", &uri, Some(json!({ "image": null }))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(updated.get("image").is_none());
        assert_eq!(updated["title"], "Tea");

        let (_, fetched) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_never_changes_id() {
        let app = test_app().await;
        let created = create(&app, json!({ "title": "Pasta" })).await;
        let id = created["id"].as_str().unwrap();
        let uri = format!("/recipes/{id}");

        let (status, updated) = send_json(
            &app,
            "PUT",
            &uri,
            Some(json!({ "id": "someone-else", "title": "Penne" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id);
        assert_eq!(updated["title"], "Penne");
    }

    #[tokio::test]
    async fn update_of_missing_document_is_a_fault() {
        let app = test_app().await;
        let uri = format!("/recipes/{}", uuid::Uuid::now_v7());

        let (status, body) =
            send_json(&app, "PUT", &uri, Some(json!({ "title": "Ghost" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Error while updating the recipe" }));
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_get_afterwards_faults() {
        let app = test_app().await;
        let created = create(&app, json!({ "title": "Pasta" })).await;
        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Error while getting a recipe" }));
    }

    #[tokio::test]
    async fn delete_with_malformed_id_uses_error_field() {
        let app = test_app().await;

        let (status, body) = send_json(&app, "DELETE", "/recipes/not-an-id", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to delete recipe" }));
    }

    #[tokio::test]
    async fn closed_storage_yields_operation_specific_faults() {
        let pool = db::memory_pool().await;
        let app = app(AppState { pool: pool.clone() }, "public");
        // 풀을 닫아 저장소 연결이 끊긴 상황을 만듭니다.
        pool.close().await;

        let (status, body) = send_json(&app, "GET", "/recipes", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to get all recipes" }));

        let (status, body) =
            send_json(&app, "POST", "/recipes", Some(json!({ "title": "Pasta" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to create a recipe" }));
    }
}
