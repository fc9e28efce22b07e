use crate::config::api::Config;
use crate::item::{Book, SearchResult};
use crate::provider;
use crate::provider::api::{ClientError, Request};
use reqwest::{blocking, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Google Books 도서 검색 API 엔드포인트 URL
pub const BOOK_SEARCH_ENDPOINT: &'static str = "https://www.googleapis.com/books/v1/volumes";
/// 연결 타임아웃 기본값(초)
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 15;
/// 응답 읽기 타임아웃 기본값(초)
pub const DEFAULT_READ_TIMEOUT_SECONDS: u64 = 10;

/// Google Books 검색 응답
///
/// 이 프로그램에서 사용하는 필드만 정의 한다.
#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    /// 도서 목록, 검색 결과가 없을 경우 API는 이 필드를 생략한다.
    #[serde(rename = "items")]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
pub struct Volume {
    #[serde(rename = "volumeInfo")]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
pub struct VolumeInfo {
    /// 도서 제목
    #[serde(rename = "title")]
    pub title: String,
    /// 저자 목록
    #[serde(rename = "authors")]
    pub authors: Option<Vec<String>>,
}

impl VolumesResponse {
    pub fn into_search_result(self) -> SearchResult {
        let books = self.items.into_iter()
            .map(|item| {
                let info = item.volume_info;
                Book::with_authors(info.authors.as_deref(), info.title)
            })
            .collect();

        SearchResult::new(books)
    }
}

/// Google Books API 클라이언트
pub struct Client {
    base_url: String,
    http: blocking::Client,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        // 블로킹 클라이언트는 읽기 타임아웃을 따로 지정할 수 없어 연결 + 읽기 시간을 전체 타임아웃으로 사용한다.
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs());
        let total_timeout = connect_timeout + Duration::from_secs(config.read_timeout_secs());

        let http = blocking::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(total_timeout)
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            base_url: config.base_url().to_owned(),
            http,
        })
    }
}

impl provider::api::Client for Client {
    fn fetch(&self, request: &Request) -> Result<String, ClientError> {
        let url = build_search_url(&self.base_url, request)?;
        debug!("도서 검색 요청 => {}", url);

        let response = self.http.get(url)
            .send()
            .map_err(|e| ClientError::RequestFailed(format!("QUERY: {}, ERROR: {:?}", request.query(), e)))?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(response.status().as_u16()));
        }

        response.text()
            .map_err(|e| ClientError::ResponseTextExtractionFailed(format!("QUERY: {}, ERROR: {:?}", request.query(), e)))
    }

    fn parse(&self, text: &str) -> Result<SearchResult, ClientError> {
        parse_books(text)
    }
}

/// 검색어와 최대 결과 수를 쿼리 파라미터로 붙인 요청 URL을 생성한다.
/// 검색어의 공백은 `+`로 인코딩 된다.
pub fn build_search_url(base_url: &str, request: &Request) -> Result<Url, ClientError> {
    Url::parse(base_url)
        .map_err(|e| ClientError::InvalidBaseUrl(format!("{} ({})", base_url, e)))
        .map(|mut url| {
            url.query_pairs_mut()
                .append_pair("q", request.query())
                .append_pair("maxResults", &request.size().to_string());
            url
        })
}

/// 응답 본문을 도서 목록으로 변환한다.
///
/// # Errors
/// - 본문이 비어 있을 경우 [`ClientError::EmptyResponse`]
/// - `items`, `volumeInfo`, `title` 중 하나라도 없거나 JSON 형식이 잘못 되었을 경우 [`ClientError::ResponseParseFailed`]
///
/// 하나의 항목이라도 실패하면 이미 변환된 항목까지 모두 버린다.
pub fn parse_books(text: &str) -> Result<SearchResult, ClientError> {
    if text.trim().is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    serde_json::from_str::<VolumesResponse>(text)
        .map(|response| response.into_search_result())
        .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
}
