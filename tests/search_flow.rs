//! 실제 HTTP 요청으로 검색 흐름 전체를 확인한다.
//!
//! 임의의 포트에 axum 목 서버를 띄우고 Google Books 클라이언트가 그 서버로 요청을 보내게 한다.

use axum::extract::{RawQuery, State};
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use book_search_rust::config::api;
use book_search_rust::item::Book;
use book_search_rust::presenter::{EmptyReason, Presenter, View, ViewState};
use book_search_rust::provider::api::google;
use book_search_rust::provider::api::{Client, ClientError, Request};
use book_search_rust::provider::network::Connectivity;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

const VOLUMES_PATH: &str = "/books/v1/volumes";

const HARRY_POTTER: &str = r#"{
  "kind": "books#volumes",
  "totalItems": 2,
  "items": [
    {
      "kind": "books#volume",
      "id": "wrOQLV6xB-wC",
      "volumeInfo": {
        "title": "Harry Potter and the Sorcerer's Stone",
        "authors": ["J. K. Rowling"],
        "publisher": "Pottermore Publishing"
      }
    },
    {
      "kind": "books#volume",
      "id": "abYKXvCwEToC",
      "volumeInfo": {
        "title": "The Magical Worlds of Harry Potter"
      }
    }
  ]
}"#;

#[derive(Clone)]
struct Mock {
    status: StatusCode,
    body: &'static str,
    queries: Arc<Mutex<Vec<String>>>,
}

async fn volumes(State(mock): State<Mock>, RawQuery(query): RawQuery) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    mock.queries.lock().unwrap().push(query.unwrap_or_default());
    (mock.status, [(header::CONTENT_TYPE, "application/json")], mock.body)
}

/// 목 서버를 띄우고 주소와 받은 쿼리 문자열 목록을 반환한다.
fn start_mock_server(status: StatusCode, body: &'static str) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(VOLUMES_PATH, get(volumes))
        .with_state(Mock { status, body, queries: queries.clone() });

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    (addr, queries)
}

fn google_client(addr: SocketAddr) -> google::Client {
    let config = api::Config::new(&format!("http://{addr}{VOLUMES_PATH}"), 30, 15, 10);
    google::Client::new(&config).unwrap()
}

#[derive(Default)]
struct RecordingView {
    states: Vec<ViewState>,
}

impl View for RecordingView {
    fn render(&mut self, state: &ViewState) {
        self.states.push(state.clone());
    }
}

fn presenter(addr: SocketAddr, online: bool) -> Presenter<RecordingView> {
    let connectivity: Arc<dyn Connectivity> = Arc::new(move || online);
    Presenter::new(Arc::new(google_client(addr)), connectivity, RecordingView::default())
}

#[test]
fn harry_potter_search_end_to_end() {
    let (addr, queries) = start_mock_server(StatusCode::OK, HARRY_POTTER);
    let mut presenter = presenter(addr, true);

    assert!(presenter.search("harry potter"));
    presenter.wait();

    assert_eq!(
        presenter.state().books(),
        &[
            Book::new("J. K. Rowling", "Harry Potter and the Sorcerer's Stone"),
            Book::new("No authors", "The Magical Worlds of Harry Potter"),
        ]
    );
    assert_eq!(*queries.lock().unwrap(), vec!["q=harry+potter&maxResults=30".to_string()]);

    let states = &presenter.view().states;
    assert!(states[0].is_loading());
    assert!(matches!(states[1], ViewState::Loaded(_)));
}

#[test]
fn no_connectivity_makes_no_http_call() {
    let (addr, queries) = start_mock_server(StatusCode::OK, HARRY_POTTER);
    let mut presenter = presenter(addr, false);

    assert!(!presenter.search("harry potter"));

    assert_eq!(
        presenter.state(),
        &ViewState::Empty { reason: EmptyReason::NoInternet, last_error: None }
    );
    assert_eq!(presenter.state().books().len(), 0);
    assert!(queries.lock().unwrap().is_empty());
}

#[test]
fn non_ok_status_is_a_failure() {
    let (addr, _) = start_mock_server(StatusCode::INTERNAL_SERVER_ERROR, "{}");
    let request = Request::builder().query("rust").build().unwrap();

    let err = google_client(addr).fetch(&request).unwrap_err();
    assert_eq!(err, ClientError::UnexpectedStatus(500));

    let mut presenter = presenter(addr, true);
    presenter.search("rust");
    presenter.wait();
    match presenter.state() {
        ViewState::Empty { reason: EmptyReason::NoResults, last_error: Some(msg) } => assert!(msg.contains("500")),
        other => panic!("unexpected state: {:?}", other),
    }
}

#[test]
fn created_status_is_not_accepted() {
    let (addr, _) = start_mock_server(StatusCode::CREATED, HARRY_POTTER);
    let request = Request::builder().query("rust").build().unwrap();

    assert_eq!(google_client(addr).fetch(&request).unwrap_err(), ClientError::UnexpectedStatus(201));
}

#[test]
fn ok_status_returns_raw_body() {
    let (addr, _) = start_mock_server(StatusCode::OK, HARRY_POTTER);
    let request = Request::builder().query("rust").size(5).build().unwrap();

    let body = google_client(addr).fetch(&request).unwrap();
    assert_eq!(body, HARRY_POTTER);
}

#[test]
fn empty_body_shows_no_books() {
    let (addr, _) = start_mock_server(StatusCode::OK, "");
    let mut presenter = presenter(addr, true);

    presenter.search("rust");
    presenter.wait();

    assert_eq!(
        presenter.state(),
        &ViewState::Empty {
            reason: EmptyReason::NoResults,
            last_error: Some(ClientError::EmptyResponse.to_string()),
        }
    );
}

#[test]
fn refused_connection_is_a_request_failure() {
    // 포트를 받은 뒤 바로 닫아 연결이 거부되게 한다.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let request = Request::builder().query("rust").build().unwrap();

    let err = google_client(addr).fetch(&request).unwrap_err();
    assert!(matches!(err, ClientError::RequestFailed(_)));
}
