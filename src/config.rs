pub mod api;
pub mod network;
pub mod log;

use crate::item::MAX_RESULTS;
use crate::provider::api::google::{BOOK_SEARCH_ENDPOINT, DEFAULT_CONNECT_TIMEOUT_SECONDS, DEFAULT_READ_TIMEOUT_SECONDS};
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;
use std::env;

/// 연결 여부를 확인할 기본 주소
pub const DEFAULT_PROBE_ADDR: &'static str = "www.googleapis.com:443";
pub const DEFAULT_PROBE_TIMEOUT_MILLIS: u64 = 3000;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    api: api::Config,
    network: network::Config,
    logger: Option<log::Config>,
}

impl AppConfig {
    pub fn api(&self) -> &api::Config {
        &self.api
    }

    pub fn network(&self) -> &network::Config {
        &self.network
    }

    pub fn logger(&self) -> Option<&log::Config> {
        self.logger.as_ref()
    }

    /// 검색 요청이 항상 실패하게 되는 값이 있으면 시작 단계에서 에러를 반환한다.
    fn validate(self) -> Result<Self, config::ConfigError> {
        let max_results = self.api.max_results();
        if max_results == 0 || max_results > MAX_RESULTS {
            return Err(config::ConfigError::Message(format!(
                "api.max_results는 1 이상 {} 이하만 가능 합니다. (입력값: {})", MAX_RESULTS, max_results
            )));
        }
        Ok(self)
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// 기본값, `config/{RUN_MODE}.json`, `BOOK_SEARCH__` 접두사의 환경 변수 순서로 설정을 덮어 쓴다.
/// 설정 파일은 없어도 된다.
pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = with_defaults()?
        .add_source(config::File::with_name(&format!("config/{}.json", env)).required(false))
        .add_source(config::Environment::with_prefix("BOOK_SEARCH").prefix_separator("__").separator("__").try_parsing(true));

    build_app_config(config)
}

fn build_app_config(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, config::ConfigError> {
    builder.build()?
        .try_deserialize::<AppConfig>()?
        .validate()
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("api.base_url", BOOK_SEARCH_ENDPOINT)?
        .set_default("api.max_results", MAX_RESULTS as u64)?
        .set_default("api.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECONDS)?
        .set_default("api.read_timeout_secs", DEFAULT_READ_TIMEOUT_SECONDS)?
        .set_default("network.probe_addr", DEFAULT_PROBE_ADDR)?
        .set_default("network.probe_timeout_millis", DEFAULT_PROBE_TIMEOUT_MILLIS)
}
