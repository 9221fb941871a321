//! # 레시피 API 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 및 마이그레이션
//! 4. 라우터 구성 (API + 정적 파일 + 요청 로깅)
//! 5. HTTP 서버 시작

mod config;
mod db;
mod error;
mod models;
mod routes;

use anyhow::Result;
use config::Config;
use routes::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG 환경변수가 없으면 recipes, tower_http, axum을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipes=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting recipes server on {}", config.addr());

    // 연결 풀은 여기서 한 번만 만들고, 모든 요청이 AppState를 통해 공유합니다.
    let pool = db::connect(&config.database_url).await?;
    db::migrate(&pool).await?;
    tracing::info!(
        "Connected to database: {}",
        db::database_name(&config.database_url)
    );

    let state = AppState { pool };
    let app = routes::app(state, &config.public_dir);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("Server listening on {}", config.addr());

    // Ctrl+C로 종료할 때까지 요청을 처리합니다.
    axum::serve(listener, app).await?;

    Ok(())
}
