//! # 레시피 데이터베이스 쿼리 모듈
//!
//! `recipes` 테이블에 대한 CRUD(Create, Read, Update, Delete) 쿼리 함수들입니다.
//!
//! 모든 함수는 `async`이며 `SqlitePool`을 빌려(&) 사용합니다.
//! ID를 받는 함수는 먼저 UUID 형식을 검사하고, 형식이 틀리면
//! `StoreError::InvalidId`를 반환합니다.

use crate::error::StoreError;
use crate::models::*;
use chrono::Utc;
use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const SELECT_RECIPE: &str = r#"
    SELECT id, title, instructions, level, ingredients, image, duration,
           is_archived, created
    FROM recipes
"#;

/// 경로에서 받은 ID를 저장 형식(소문자 하이픈 UUID)으로 정규화합니다.
fn parse_id(id: &str) -> Result<String, StoreError> {
    // Uuid::parse_str(): 대문자나 하이픈 없는 형식도 받아들이고,
    // 형식이 틀리면 uuid::Error를 반환합니다 (`?`로 StoreError::InvalidId 변환).
    Ok(Uuid::parse_str(id)?.hyphenated().to_string())
}

/// 컬렉션의 모든 레시피를 저장 순서대로 조회합니다.
pub async fn list_recipes(pool: &SqlitePool) -> Result<Vec<Recipe>, StoreError> {
    let recipes = sqlx::query_as::<_, Recipe>(SELECT_RECIPE)
        .fetch_all(pool)
        .await?;

    Ok(recipes)
}

/// ID로 단일 레시피를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Recipe))`: 레시피를 찾은 경우
/// - `Ok(None)`: 해당 ID의 레시피가 없는 경우
/// - `Err(StoreError)`: ID 형식 오류 또는 DB 에러
pub async fn get_recipe(pool: &SqlitePool, id: &str) -> Result<Option<Recipe>, StoreError> {
    let id = parse_id(id)?;

    let recipe = sqlx::query_as::<_, Recipe>(&format!("{SELECT_RECIPE} WHERE id = ?"))
        .bind(&id)
        .fetch_optional(pool)
        .await?;

    Ok(recipe)
}

/// 새 레시피를 생성합니다.
///
/// ID는 여기서 UUIDv7로 발급됩니다. 요청에 없는 필드는 비워 두되,
/// `ingredients`는 빈 배열, `isArchived`는 false, `created`는 현재 시각이 기본값입니다.
pub async fn create_recipe(pool: &SqlitePool, input: &RecipeInput) -> Result<Recipe, StoreError> {
    let id = Uuid::now_v7().to_string();
    let ingredients = input.ingredients.clone().unwrap_or_default();

    sqlx::query(
        r#"
        INSERT INTO recipes
            (id, title, instructions, level, ingredients, image, duration, is_archived, created)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    // .flatten(): 누락(None)과 null(Some(None))은 생성 시 모두 SQL NULL입니다.
    .bind(input.title.clone().flatten())
    .bind(input.instructions.clone().flatten())
    .bind(input.level.clone().flatten())
    .bind(Json(ingredients))
    .bind(input.image.clone().flatten())
    // 숫자를 JSON 텍스트로 저장합니다 (예: "20", "2.5").
    .bind(input.duration.clone().flatten().map(Json))
    .bind(input.is_archived.unwrap_or(false))
    .bind(input.created.unwrap_or_else(Utc::now))
    .execute(pool)
    .await?;

    let created = get_recipe(pool, &id).await?;
    created.ok_or(StoreError::Missing(id))
}

/// 레시피를 부분 수정합니다 (merge-patch).
///
/// 요청 본문에 있는 필드만 SET 목록에 넣어 동적으로 UPDATE 쿼리를 구성합니다.
/// 명시적인 `null`은 해당 컬럼을 NULL로 지웁니다. `id`는 바뀌지 않습니다.
///
/// # 반환값
/// - `Ok(Some(Recipe))`: 수정 후의 레시피
/// - `Ok(None)`: 해당 ID의 레시피가 없음
pub async fn update_recipe(
    pool: &SqlitePool,
    id: &str,
    input: &RecipeInput,
) -> Result<Option<Recipe>, StoreError> {
    let id = parse_id(id)?;

    // QueryBuilder: SQL 조각과 바인딩 값을 순서대로 쌓아 올리는 빌더.
    // push_bind()는 값 대신 `?` 자리표시자를 넣으므로 SQL 인젝션을 막아 줍니다.
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE recipes SET ");
    let mut supplied = false;
    {
        // separated(", "): 두 번째 항목부터 자동으로 ", "를 붙여 줍니다.
        let mut fields = builder.separated(", ");

        if let Some(title) = &input.title {
            fields.push("title = ").push_bind_unseparated(title.clone());
            supplied = true;
        }
        if let Some(instructions) = &input.instructions {
            fields
                .push("instructions = ")
                .push_bind_unseparated(instructions.clone());
            supplied = true;
        }
        if let Some(level) = &input.level {
            fields.push("level = ").push_bind_unseparated(level.clone());
            supplied = true;
        }
        if let Some(ingredients) = &input.ingredients {
            fields
                .push("ingredients = ")
                .push_bind_unseparated(Json(ingredients.clone()));
            supplied = true;
        }
        if let Some(image) = &input.image {
            fields.push("image = ").push_bind_unseparated(image.clone());
            supplied = true;
        }
        if let Some(duration) = &input.duration {
            fields
                .push("duration = ")
                .push_bind_unseparated(duration.clone().map(Json));
            supplied = true;
        }
        if let Some(is_archived) = input.is_archived {
            fields.push("is_archived = ").push_bind_unseparated(is_archived);
            supplied = true;
        }
        if let Some(created) = input.created {
            fields.push("created = ").push_bind_unseparated(created);
            supplied = true;
        }
    }

    // 바꿀 필드가 없으면 UPDATE 없이 현재 문서를 그대로 돌려줍니다.
    if !supplied {
        return get_recipe(pool, &id).await;
    }

    builder.push(" WHERE id = ").push_bind(id.clone());
    let result = builder.build().execute(pool).await?;

    // .rows_affected(): 0이면 WHERE 조건에 맞는 행, 즉 해당 ID의 문서가 없다는 뜻입니다.
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_recipe(pool, &id).await
}

/// 레시피를 삭제합니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 ID의 레시피가 없었음
pub async fn delete_recipe(pool: &SqlitePool, id: &str) -> Result<bool, StoreError> {
    let id = parse_id(id)?;

    // 이미 없는 문서를 지워도 에러가 아닙니다 (0행 영향).
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(&id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
