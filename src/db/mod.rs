//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 레시피 컬렉션과 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! - `recipes`: 레시피 CRUD 쿼리

pub mod recipes;

pub use recipes::*;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;

/// SQLite 연결 풀을 생성합니다.
///
/// 서버 시작 시 한 번만 호출되며, 반환된 풀은 `AppState`에 담겨
/// 모든 요청이 공유합니다. 데이터베이스 파일이 없으면 새로 만듭니다.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// `./migrations` 폴더의 스키마를 적용합니다.
///
/// sqlx::migrate!는 컴파일 타임에 SQL 파일을 바이너리에 포함시키며,
/// 아직 실행되지 않은 마이그레이션만 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// `sqlite:data/recipes.db?mode=rwc` → `data/recipes.db`
pub fn database_name(database_url: &str) -> String {
    SqliteConnectOptions::from_str(database_url)
        .map(|options| options.get_filename().display().to_string())
        .unwrap_or_else(|_| database_url.to_string())
}

/// 테스트용 인메모리 데이터베이스
///
/// 인메모리 SQLite는 연결마다 별도의 DB가 되므로, 연결 하나만 유지하고
/// 유휴 타임아웃으로 닫히지 않게 합니다.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
