use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

/// 저자 정보가 없는 도서에 표시할 값
pub const NO_AUTHORS: &'static str = "No authors";

/// 한번의 검색으로 받을 수 있는 최대 도서 수
pub const MAX_RESULTS: usize = 30;

/// 검색 결과로 받은 도서 한 권의 정보
///
/// # Description
/// 저자와 제목 두 값만 가지며 값 자체로 비교 된다.
/// 저자가 여러명일 경우 ", "로 이어 붙인 하나의 문자열로 저장 된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    author: String,
    title: String,
}

impl Book {
    pub fn new<A: Into<String>, T: Into<String>>(author: A, title: T) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
        }
    }

    /// 저자 목록으로 도서를 생성한다.
    /// 저자 목록이 없거나 비어 있을 경우 저자는 [`NO_AUTHORS`]로 설정 된다.
    pub fn with_authors<T: Into<String>>(authors: Option<&[String]>, title: T) -> Self {
        let author = match authors {
            Some(authors) if !authors.is_empty() => authors.join(", "),
            _ => NO_AUTHORS.to_owned(),
        };
        Self::new(author, title)
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.author, self.title)
    }
}

/// 한번의 검색으로 완성된 도서 목록
///
/// # Description
/// 검색 할 때 마다 이전 결과를 통째로 대체하며 병합하지 않는다.
/// [`MAX_RESULTS`]를 넘는 도서는 생성 시점에 버려진다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    books: Vec<Book>,
}

impl SearchResult {
    pub fn new(mut books: Vec<Book>) -> Self {
        books.truncate(MAX_RESULTS);
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
