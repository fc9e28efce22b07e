use crate::presenter::{View, ViewState};
use std::io;
use std::io::Write;
use tracing::warn;

/// 터미널에 화면 상태를 출력하는 [`View`]
///
/// 도서 목록과 빈 화면 메시지는 `out`에, 로딩 표시와 에러 메시지는 `status`에 출력한다.
pub struct TerminalView<O: Write, S: Write> {
    out: O,
    status: S,
}

impl TerminalView<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, S: Write> TerminalView<O, S> {
    pub fn new(out: O, status: S) -> Self {
        Self { out, status }
    }

    pub fn out(&self) -> &O {
        &self.out
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    fn write_state(&mut self, state: &ViewState) -> io::Result<()> {
        match state {
            ViewState::Idle => Ok(()),
            ViewState::Loading => writeln!(self.status, "Searching..."),
            ViewState::Loaded(result) => {
                for book in result.books() {
                    writeln!(self.out, "{}\n", book)?;
                }
                self.out.flush()
            }
            ViewState::Empty { reason, last_error } => {
                if let Some(e) = last_error {
                    writeln!(self.status, "{}", e)?;
                }
                writeln!(self.out, "{}", reason.message())?;
                self.out.flush()
            }
        }
    }
}

impl<O: Write, S: Write> View for TerminalView<O, S> {
    fn render(&mut self, state: &ViewState) {
        if let Err(e) = self.write_state(state) {
            warn!("화면 출력 실패 => {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Book, SearchResult};
    use crate::presenter::EmptyReason;

    fn view() -> TerminalView<Vec<u8>, Vec<u8>> {
        TerminalView::new(Vec::new(), Vec::new())
    }

    #[test]
    fn loaded_books_are_printed_as_author_then_title() {
        let mut view = view();
        let result = SearchResult::new(vec![Book::new("A, B", "First"), Book::new("No authors", "Second")]);

        view.render(&ViewState::Loaded(result));

        assert_eq!(String::from_utf8_lossy(view.out()), "A, B\nFirst\n\nNo authors\nSecond\n\n");
        assert!(view.status().is_empty());
    }

    #[test]
    fn empty_state_prints_message_and_error() {
        let mut view = view();

        view.render(&ViewState::Empty { reason: EmptyReason::NoResults, last_error: Some("Error response code: 500".to_owned()) });

        assert_eq!(String::from_utf8_lossy(view.out()), "No books found.\n");
        assert_eq!(String::from_utf8_lossy(view.status()), "Error response code: 500\n");
    }

    #[test]
    fn loading_goes_to_status() {
        let mut view = view();

        view.render(&ViewState::Loading);
        view.render(&ViewState::Empty { reason: EmptyReason::NoInternet, last_error: None });

        assert_eq!(String::from_utf8_lossy(view.status()), "Searching...\n");
        assert_eq!(String::from_utf8_lossy(view.out()), "No internet connection.\n");
    }
}
