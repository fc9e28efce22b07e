use serde::Deserialize;
use std::fmt;
use std::fmt::Formatter;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::{FormatTime, LocalTime};
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Debug, Deserialize)]
pub struct Config {
    dir: String,
    name: String,

    /// 최대 로그 파일 개수로 로그 파일이 설정한 개수보다 커질 경우 기존의 로그파일들은 삭제 된다.
    /// 설정 되지 않을 시 로그 파일은 삭제 되지 않는다.
    keep: Option<usize>,

    /// 파일과 stderr에 출력할 로그의 레벨로 지정된 로그 레벨 이상만 로깅된다.
    /// 설정하지 않을시 기본값은 DEBUG로 설정 된다.
    ///
    /// 이 값은 [`tracing::Level`]로 변환 됨으로 자세한 사항은 해당 파일을 확인
    level: Option<String>,

    /// 로깅 파일이 분리 되는 기간으로 .log 파일 하나 당 설정된 기간 동안 로그가 기록 된다.
    /// 설정 되지 않을시 기본값은 DAILY로 설정된다.
    ///
    /// 이 값은 [`rolling::Rotation`]으로 변환 됨으로 자세한 사항은 해당 파일을 확인
    rotation: Option<String>
}

/// 로깅 설정 중 발생한 에러 열거
#[derive(Debug)]
pub enum Error {
    InvalidLevel(String),
    InvalidRotation(String),
    AppenderInitFailed(String),
    SubscriberInitFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLevel(s) => write!(f, "로그 레벨(level)은 TRACE, DEBUG, INFO, WARN, ERROR만 가능 합니다. (입력값: {})", s),
            Error::InvalidRotation(s) => write!(f, "로깅 파일 로테이션(rotation)은 DAILY, HOURLY, MINUTELY, NEVER만 가능 합니다. (입력값: {})", s),
            Error::AppenderInitFailed(s) => write!(f, "Failed to create log file appender: {}", s),
            Error::SubscriberInitFailed(s) => write!(f, "Failed to install global subscriber: {}", s),
        }
    }
}

impl std::error::Error for Error {}

/// 로깅 설정이 있을 경우 파일과 stderr에 함께 기록하고, 없을 경우 stderr에만 WARN 이상을 기록한다.
///
/// 반환된 [`WorkerGuard`]가 drop 되면 파일에 쓰이지 않은 로그는 버려짐으로 프로그램이 종료 될 때까지 보관해야 한다.
pub fn set_global_logging_config(c: Option<&Config>) -> Result<Option<WorkerGuard>, Error> {
    match c {
        Some(c) => with_file_appender(c).map(Some),
        None => {
            tracing_subscriber::fmt()
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_timer(local_timer())
                .with_writer(std::io::stderr)
                .with_max_level(tracing::Level::WARN)
                .try_init()
                .map_err(|e| Error::SubscriberInitFailed(e.to_string()))?;
            Ok(None)
        }
    }
}

fn with_file_appender(c: &Config) -> Result<WorkerGuard, Error> {
    let rotation = match &c.rotation {
        Some(rotation) => parse_rotation(rotation.as_str())?,
        None => rolling::Rotation::DAILY,
    };
    let level = match &c.level {
        Some(level) => parse_level(level.as_str())?,
        None => tracing::Level::DEBUG,
    };

    let mut file_appender = rolling::RollingFileAppender::builder()
        .filename_prefix(c.name.clone())
        .filename_suffix("log")
        .rotation(rotation);

    if let Some(keep) = c.keep {
        file_appender = file_appender.max_log_files(keep);
    }

    let file_appender = file_appender.build(c.dir.clone())
        .map_err(|e| Error::AppenderInitFailed(e.to_string()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let writer = std::io::stderr.and(non_blocking);

    tracing_subscriber::fmt()
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_timer(local_timer())
        .with_writer(writer)
        .with_max_level(level)
        .try_init()
        .map_err(|e| Error::SubscriberInitFailed(e.to_string()))?;

    Ok(guard)
}

fn local_timer() -> impl FormatTime {
    LocalTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"))
}

fn parse_rotation(s: &str) -> Result<rolling::Rotation, Error> {
    match s {
        "DAILY" => Ok(rolling::Rotation::DAILY),
        "HOURLY" => Ok(rolling::Rotation::HOURLY),
        "MINUTELY" => Ok(rolling::Rotation::MINUTELY),
        "NEVER" => Ok(rolling::Rotation::NEVER),
        _ => Err(Error::InvalidRotation(s.to_owned())),
    }
}

fn parse_level(l: &str) -> Result<tracing::Level, Error> {
    match l {
        "TRACE" => Ok(tracing::Level::TRACE),
        "DEBUG" => Ok(tracing::Level::DEBUG),
        "INFO" => Ok(tracing::Level::INFO),
        "WARN" => Ok(tracing::Level::WARN),
        "ERROR" => Ok(tracing::Level::ERROR),
        _ => Err(Error::InvalidLevel(l.to_owned())),
    }
}
