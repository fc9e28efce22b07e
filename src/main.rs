use book_search_rust::config;
use book_search_rust::presenter::terminal::TerminalView;
use book_search_rust::presenter::{Presenter, SavedState, View};
use clap::Parser;
use std::io;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(name = "book-search", version, about = "Google Books에서 도서를 검색한다.")]
struct Cli {
    /// 검색어, 생략하면 표준 입력에서 한 줄씩 검색어를 읽는다.
    query: Vec<String>,

    /// 표시 중인 도서 목록을 보관하고 다음 실행 때 복원할 JSON 파일
    #[arg(long)]
    state: Option<PathBuf>,

    /// 네트워크 연결이 없는 것으로 처리한다.
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    config::load_dotenv();
    let app_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Cannot loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match config::log::set_global_logging_config(app_config.logger()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut presenter = match book_search_rust::create_presenter(&app_config, cli.offline, TerminalView::stdio()) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create presenter => {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(saved) = cli.state.as_deref().and_then(SavedState::load) {
        presenter.restore_state(saved);
    }

    if cli.query.is_empty() {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => run_search(&mut presenter, &line),
                Err(e) => {
                    error!("표준 입력을 읽을 수 없습니다. => {}", e);
                    break;
                }
            }
        }
    } else {
        run_search(&mut presenter, &cli.query.join(" "));
    }

    if let Some(path) = cli.state.as_deref() {
        presenter.save_state().store(path);
    }
    ExitCode::SUCCESS
}

fn run_search<V: View>(presenter: &mut Presenter<V>, query: &str) {
    if !presenter.search(query) {
        return;
    }
    while presenter.is_loading() && !presenter.wait_timeout(PROGRESS_INTERVAL) {
        eprint!(".");
    }
}
