use crate::config::AppConfig;
use crate::presenter::{Presenter, View};
use crate::provider::api::ClientError;
use crate::provider::network::{Connectivity, Offline, TcpProbe};
use std::sync::Arc;

pub mod config;
pub mod item;
pub mod presenter;
pub mod provider;

/// 설정에 맞춰 Google Books 클라이언트와 연결 확인기를 만들고 프레젠터를 생성한다.
/// `offline`이 `true`이면 연결 확인 없이 항상 연결이 없는 것으로 처리한다.
pub fn create_presenter<V: View>(
    config: &AppConfig,
    offline: bool,
    view: V,
) -> Result<Presenter<V>, ClientError> {
    let client = provider::api::google::Client::new(config.api())?;
    let connectivity: Arc<dyn Connectivity> = if offline {
        Arc::new(Offline)
    } else {
        Arc::new(TcpProbe::new(config.network()))
    };

    Ok(Presenter::new(Arc::new(client), connectivity, view)
        .with_max_results(config.api().max_results()))
}
