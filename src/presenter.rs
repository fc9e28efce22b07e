pub mod terminal;

use crate::item::{Book, SearchResult, MAX_RESULTS};
use crate::provider::api::{Client, ClientError, Request};
use crate::provider::network::Connectivity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const NO_BOOKS_MESSAGE: &'static str = "No books found.";
pub const NO_INTERNET_MESSAGE: &'static str = "No internet connection.";

const FETCH_THREAD_NAME: &'static str = "book-search-fetch";

/// 빈 화면이 표시되는 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// 검색 결과가 없거나 요청/응답 처리 중 에러가 발생함
    NoResults,

    /// 네트워크 연결이 없어 검색을 시작하지 않음
    NoInternet,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::NoResults => NO_BOOKS_MESSAGE,
            EmptyReason::NoInternet => NO_INTERNET_MESSAGE,
        }
    }
}

/// 화면 상태
///
/// # Description
/// `Idle`에서 시작해 검색 할 때마다 `Loading`을 거쳐 `Loaded` 또는 `Empty`로 전이 된다.
/// 네트워크 연결이 없으면 `Loading`을 거치지 않고 바로 `Empty`가 된다.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded(SearchResult),
    Empty {
        reason: EmptyReason,

        /// 마지막으로 발생한 에러 메시지로 진단용으로만 사용한다.
        last_error: Option<String>,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn books(&self) -> &[Book] {
        match self {
            ViewState::Loaded(result) => result.books(),
            _ => &[],
        }
    }
}

/// 화면 상태를 그리는 트레이트
pub trait View {
    fn render(&mut self, state: &ViewState);
}

/// 화면 회전 등으로 프레젠터를 다시 만들 때 보관했다가 복원할 도서 목록
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    books: Vec<Book>,
}

impl SavedState {
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// JSON 파일에서 보관된 목록을 읽는다.
    /// 파일이 없거나 읽을 수 없거나 형식이 잘못 되었으면 `None`을 반환한다.
    pub fn load(path: &Path) -> Option<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("저장된 목록을 읽을 수 없습니다. {} => {}", path.display(), e);
                return None;
            }
        };

        serde_json::from_str(&text)
            .map_err(|e| warn!("저장된 목록의 형식이 잘못 되었습니다. {} => {}", path.display(), e))
            .ok()
    }

    /// 목록을 JSON 파일로 저장한다. 실패하면 경고만 남긴다.
    pub fn store(&self, path: &Path) {
        let result = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())
            .and_then(|text| fs::write(path, text).map_err(|e| e.to_string()));

        if let Err(e) = result {
            warn!("목록을 저장할 수 없습니다. {} => {}", path.display(), e);
        }
    }
}

type Outcome = Result<SearchResult, ClientError>;

struct Pending {
    query: String,
    receiver: Receiver<Outcome>,
}

/// 검색 요청을 백그라운드 스레드에서 실행하고 결과를 화면 상태로 반영한다.
///
/// # Description
/// 프레젠터는 상호작용 스레드가 소유하며 모든 상태 변경은 그 스레드에서 일어난다.
/// 백그라운드 스레드는 결과를 채널로 보내기만 하고, [`Presenter::poll`] 또는 [`Presenter::wait`]가
/// 호출 될 때 상태에 반영 된다.
///
/// 검색 마다 새 채널을 만들기 때문에 이전 검색이 끝나기 전에 새 검색을 시작하면
/// 이전 검색의 결과는 받을 곳이 없어 버려진다. 마지막으로 시작한 검색의 결과만 화면에 표시된다.
pub struct Presenter<V: View> {
    client: Arc<dyn Client>,
    connectivity: Arc<dyn Connectivity>,
    view: V,
    state: ViewState,
    size: usize,
    pending: Option<Pending>,
}

impl<V: View> Presenter<V> {
    pub fn new(client: Arc<dyn Client>, connectivity: Arc<dyn Connectivity>, view: V) -> Self {
        Self {
            client,
            connectivity,
            view,
            state: ViewState::Idle,
            size: MAX_RESULTS,
            pending: None,
        }
    }

    pub fn with_max_results(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// 검색을 시작한다.
    ///
    /// 백그라운드 검색이 시작 되었으면 `true`, 네트워크 연결이 없거나 검색어가 잘못되어
    /// 바로 `Empty` 상태가 되었으면 `false`를 반환한다.
    pub fn search(&mut self, query: &str) -> bool {
        // 진행 중인 검색이 있다면 결과를 더 이상 받지 않는다.
        if let Some(superseded) = self.pending.take() {
            debug!("이전 검색 결과를 버립니다. (QUERY: {})", superseded.query);
        }

        if !self.connectivity.is_connected() {
            info!("네트워크 연결이 없어 검색을 시작하지 않습니다. (QUERY: {})", query);
            self.set_state(ViewState::Empty { reason: EmptyReason::NoInternet, last_error: None });
            return false;
        }

        let request = match Request::builder().query(query).size(self.size).build() {
            Ok(request) => request,
            Err(e) => {
                warn!("검색 요청을 만들 수 없습니다. => {}", e);
                self.set_state(ViewState::Empty { reason: EmptyReason::NoResults, last_error: Some(e.to_string()) });
                return false;
            }
        };

        let (sender, receiver) = mpsc::channel();
        let client = Arc::clone(&self.client);
        let spawned = thread::Builder::new()
            .name(FETCH_THREAD_NAME.to_owned())
            .spawn(move || {
                let outcome = client.get_books(&request);
                if let Err(e) = &outcome {
                    error!("도서 검색 실패 (QUERY: {}) => {}", request.query(), e);
                }
                if sender.send(outcome).is_err() {
                    debug!("검색 결과를 받을 곳이 없어 버립니다. (QUERY: {})", request.query());
                }
            });

        if let Err(e) = spawned {
            error!("검색 스레드를 시작할 수 없습니다. => {}", e);
            self.set_state(ViewState::Empty { reason: EmptyReason::NoResults, last_error: Some(e.to_string()) });
            return false;
        }

        self.pending = Some(Pending { query: query.to_owned(), receiver });
        self.set_state(ViewState::Loading);
        true
    }

    /// 완료된 검색 결과가 있으면 상태에 반영한다. 블로킹 되지 않으며 상태가 바뀌었으면 `true`를 반환한다.
    pub fn poll(&mut self) -> bool {
        let outcome = match &self.pending {
            None => return false,
            Some(pending) => match pending.receiver.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => Err(worker_stopped()),
            },
        };
        self.complete(outcome);
        true
    }

    /// 진행 중인 검색이 끝날 때까지 기다린 후 결과를 반영한다.
    pub fn wait(&mut self) {
        if let Some(pending) = &self.pending {
            let outcome = pending.receiver.recv().unwrap_or_else(|_| Err(worker_stopped()));
            self.complete(outcome);
        }
    }

    /// 최대 `timeout` 동안 진행 중인 검색을 기다린다. 결과가 반영 되었으면 `true`를 반환한다.
    pub fn wait_timeout(&mut self, timeout: Duration) -> bool {
        let outcome = match &self.pending {
            None => return false,
            Some(pending) => match pending.receiver.recv_timeout(timeout) {
                Ok(outcome) => outcome,
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => Err(worker_stopped()),
            },
        };
        self.complete(outcome);
        true
    }

    /// 현재 표시 중인 도서 목록을 반환한다.
    pub fn save_state(&self) -> SavedState {
        SavedState { books: self.state.books().to_vec() }
    }

    /// 보관했던 도서 목록을 다시 표시한다. 진행 중인 검색이 있다면 그 결과는 버린다.
    pub fn restore_state(&mut self, saved: SavedState) {
        self.pending = None;
        if saved.books.is_empty() {
            self.set_state(ViewState::Idle);
        } else {
            self.set_state(ViewState::Loaded(SearchResult::new(saved.books)));
        }
    }

    fn complete(&mut self, outcome: Outcome) {
        let query = self.pending.take()
            .map(|pending| pending.query)
            .unwrap_or_default();

        let state = match outcome {
            Ok(result) if !result.is_empty() => {
                info!("{}권의 도서를 찾았습니다. (QUERY: {})", result.len(), query);
                ViewState::Loaded(result)
            }
            Ok(_) => {
                info!("검색 결과가 없습니다. (QUERY: {})", query);
                ViewState::Empty { reason: EmptyReason::NoResults, last_error: None }
            }
            Err(e) => ViewState::Empty { reason: EmptyReason::NoResults, last_error: Some(e.to_string()) },
        };
        self.set_state(state);
    }

    fn set_state(&mut self, state: ViewState) {
        self.state = state;
        self.view.render(&self.state);
    }
}

fn worker_stopped() -> ClientError {
    ClientError::RequestFailed("검색 작업이 결과 없이 종료 되었습니다.".to_owned())
}
