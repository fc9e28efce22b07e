use crate::item::{SearchResult, MAX_RESULTS};
use std::fmt;
use std::fmt::Formatter;

pub mod google;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    InvalidBaseUrl(String),
    RequestFailed(String),
    UnexpectedStatus(u16),
    ResponseTextExtractionFailed(String),
    EmptyResponse,
    ResponseParseFailed(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidBaseUrl(s) => write!(f, "Invalid base url: {}", s),
            ClientError::RequestFailed(s) => write!(f, "Request failed: {}", s),
            ClientError::UnexpectedStatus(status) => write!(f, "Error response code: {}", status),
            ClientError::ResponseTextExtractionFailed(s) => write!(f, "Failed to read response: {}", s),
            ClientError::EmptyResponse => write!(f, "Empty response"),
            ClientError::ResponseParseFailed(s) => write!(f, "Problem parsing the book JSON results: {}", s),
        }
    }
}

impl std::error::Error for ClientError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    InvalidParameter(String),         // 유효하지 않은 매개변수
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidParameter(s) => write!(f, "Invalid parameter: {}", s),
        }
    }
}

impl std::error::Error for RequestError {}

/// 도서 검색 요청
#[derive(Debug, Clone)]
pub struct Request {
    query: String,
    size: usize,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

#[derive(Default)]
pub struct RequestBuilder {
    query: Option<String>,
    size: Option<usize>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        RequestBuilder::default()
    }

    pub fn query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn build(self) -> Result<Request, RequestError> {
        let query = self.query
            .map(|q| q.trim().to_owned())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| RequestError::InvalidParameter("query is required".to_string()))?;

        let size = self.size.unwrap_or(MAX_RESULTS);
        if size == 0 || size > MAX_RESULTS {
            return Err(RequestError::InvalidParameter(format!("size must be between 1 and {}", MAX_RESULTS)));
        }

        Ok(Request {
            query,
            size,
        })
    }
}

/// 도서 검색 API 클라이언트 트레이트
///
/// # Description
/// 요청을 보내고 응답 본문을 그대로 반환하는 [`Client::fetch`]와 본문을 도서 목록으로 변환하는
/// [`Client::parse`]로 나뉜다. 두 작업은 백그라운드 스레드에서 실행 됨으로 `Send + Sync`여야 한다.
pub trait Client: Send + Sync {
    fn fetch(&self, request: &Request) -> Result<String, ClientError>;

    fn parse(&self, text: &str) -> Result<SearchResult, ClientError>;

    fn get_books(&self, request: &Request) -> Result<SearchResult, ClientError> {
        let text = self.fetch(request)?;
        self.parse(&text)
    }
}
