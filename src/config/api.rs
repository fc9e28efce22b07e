use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// 도서 검색 API의 기본 URL로 검색어와 최대 결과 수는 쿼리 파라미터로 붙는다.
    base_url: String,

    /// 한번의 검색으로 받을 최대 도서 수
    max_results: usize,

    connect_timeout_secs: u64,
    read_timeout_secs: u64,
}

impl Config {
    pub fn new(base_url: &str, max_results: usize, connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.to_owned(),
            max_results,
            connect_timeout_secs,
            read_timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout_secs
    }

    pub fn read_timeout_secs(&self) -> u64 {
        self.read_timeout_secs
    }
}
