use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// 연결 여부를 확인할 때 접속을 시도할 `host:port`
    probe_addr: String,
    probe_timeout_millis: u64,
}

impl Config {
    pub fn new(probe_addr: &str, probe_timeout_millis: u64) -> Self {
        Self {
            probe_addr: probe_addr.to_owned(),
            probe_timeout_millis,
        }
    }

    pub fn probe_addr(&self) -> &str {
        &self.probe_addr
    }

    pub fn probe_timeout_millis(&self) -> u64 {
        self.probe_timeout_millis
    }
}
