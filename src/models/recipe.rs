use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use sqlx::types::Json;

/// 저장된 레시피 문서
///
/// `id` 외의 텍스트/숫자 필드는 모두 선택 사항이며, 값이 없으면
/// 응답 JSON에서 생략됩니다 (문서 저장소처럼 동작).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// 난이도 라벨. 허용 값 목록은 강제하지 않습니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// SQLite에는 배열 타입이 없어 JSON 텍스트로 저장합니다.
    pub ingredients: Json<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 조리 시간 (분)
    ///
    /// `serde_json::Number`를 JSON 텍스트로 저장하므로 정수(20)는 정수로,
    /// 소수(2.5)는 소수로 그대로 돌아옵니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Json<Number>>,
    pub is_archived: bool,
    pub created: DateTime<Utc>,
}

/// 생성(POST)과 수정(PUT) 요청 본문
///
/// 모든 필드가 선택 사항이며, 알 수 없는 필드(`id` 포함)는 무시됩니다.
///
/// 값을 비울 수 있는 필드는 `Option<Option<T>>`입니다:
/// - `None`: 필드 누락 (수정 시 기존 값 유지)
/// - `Some(None)`: 명시적인 `null` (값을 지움)
/// - `Some(Some(v))`: 새 값
///
/// `ingredients`, `isArchived`, `created`는 항상 값이 있는 필드라
/// `null`을 누락과 같게 취급합니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub instructions: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub level: Option<Option<String>>,
    pub ingredients: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: Option<Option<Number>>,
    pub is_archived: Option<bool>,
    pub created: Option<DateTime<Utc>>,
}

/// 필드가 본문에 있을 때만 호출되므로, 결과를 항상 `Some`으로 감쌉니다.
/// 필드가 없으면 `#[serde(default)]`가 바깥 `None`을 채웁니다.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
