//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목 (모두 기본값이 있어 환경변수 없이도 실행됩니다):
//! - `DATABASE_URL`: SQLite 데이터베이스 URL
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `PUBLIC_DIR`: 정적 파일 디렉토리

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 `main`에서만 사용됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (기본값: "sqlite:recipes.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 정적 파일을 서빙할 디렉토리 (기본값: "public")
    pub public_dir: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 주어진 조회 함수로 설정값을 읽습니다.
    ///
    /// `lookup`은 키 이름을 받아 값이 있으면 `Some`을 돌려주는 클로저입니다.
    /// 테스트에서는 프로세스 환경변수 대신 고정된 값을 넘겨 사용합니다.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:recipes.db".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            // 파싱 실패 시에도 기본 포트 3000으로 동작합니다.
            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            public_dir: lookup("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()),
        }
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
