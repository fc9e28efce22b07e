use crate::config::network::Config;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// 네트워크 연결 여부를 확인하는 트레이트
///
/// # Description
/// 검색을 시작하기 전에 호출 되며 연결이 없다고 판단되면 요청을 보내지 않는다.
pub trait Connectivity: Send + Sync {
    fn is_connected(&self) -> bool;
}

impl<F> Connectivity for F where F: Fn() -> bool + Send + Sync {
    fn is_connected(&self) -> bool {
        self()
    }
}

/// 지정된 주소로 TCP 연결을 시도해 네트워크 연결 여부를 판단한다.
///
/// # Note
/// 타임아웃은 TCP 연결에만 적용 된다. 호스트 이름의 DNS 조회는 시스템 리졸버에 맡겨 제한 시간이 없으므로
/// 네트워크는 살아 있지만 DNS가 응답하지 않는 환경에서는 설정한 시간보다 오래 블로킹 될 수 있다.
/// 이 경우 `probe_addr`를 `ip:port` 형태로 지정하면 DNS 조회를 거치지 않는다.
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(config: &Config) -> Self {
        Self {
            addr: config.probe_addr().to_owned(),
            timeout: Duration::from_millis(config.probe_timeout_millis()),
        }
    }
}

impl Connectivity for TcpProbe {
    fn is_connected(&self) -> bool {
        let addrs = match self.addr.to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!("주소를 확인할 수 없습니다. {} => {}", self.addr, e);
                return false;
            }
        };

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return true,
                Err(e) => debug!("연결 실패 {} => {}", addr, e),
            }
        }
        false
    }
}

/// 항상 연결이 없다고 응답한다.
pub struct Offline;

impl Connectivity for Offline {
    fn is_connected(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn probe(addr: String) -> TcpProbe {
        TcpProbe::new(&Config::new(&addr, 500))
    }

    #[test]
    fn listening_address_is_connected() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(probe(addr.to_string()).is_connected());
    }

    #[test]
    fn unresolvable_address_is_not_connected() {
        assert!(!probe("not an address".to_owned()).is_connected());
    }

    #[test]
    fn closures_work_as_probes() {
        let online = || true;
        assert!(online.is_connected());
        assert!(!Offline.is_connected());
    }
}
