//! 모니터 실행 단위.
//!
//! 한 번의 실행: 설정 로드 → 인증(1회) → 키워드 병렬 수집 → 메트릭 발행.
//! 실행 간 상태는 남기지 않는다.

use splunkmon_core::config::MonitorConfig;
use splunkmon_core::error::CoreError;
use splunkmon_core::ports::authenticator::Authenticator;
use splunkmon_core::ports::metric_writer::MetricWriter;
use splunkmon_core::ports::search_client::SearchClient;
use splunkmon_network::auth::SplunkAuthenticator;
use splunkmon_network::http_client::{build_client, SplunkSearchClient};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

use crate::config_loader::{load_config, resolve_config_path};
use crate::coordinator::{CollectionCoordinator, CollectionReport};
use crate::publisher::MetricPublisher;

/// 설정 파일 경로 인자 이름
pub const CONFIG_ARG: &str = "config-file";

/// 실행 결과
#[derive(Debug)]
pub struct TaskOutput {
    pub message: String,
    /// 발행된 메트릭 수
    pub published: usize,
    pub report: CollectionReport,
}

/// 모니터 태스크: 인자 맵으로 한 번 실행
pub struct MonitorTask {
    writer: Arc<dyn MetricWriter>,
}

impl MonitorTask {
    pub fn new(writer: Arc<dyn MetricWriter>) -> Self {
        Self { writer }
    }

    /// `config-file` 인자로 실행
    pub async fn execute(&self, args: &HashMap<String, String>) -> Result<TaskOutput, CoreError> {
        let raw = args
            .get(CONFIG_ARG)
            .ok_or_else(|| CoreError::Config(format!("{CONFIG_ARG} 인자 없음")))?;
        let path = resolve_config_path(raw)?;
        let config = load_config(&path)?;

        let http = build_client(config.request_timeout())?;
        let base_url = config.base_url();
        let authenticator = SplunkAuthenticator::new(&base_url, http.clone());
        let search_client: Arc<dyn SearchClient> =
            Arc::new(SplunkSearchClient::new(&base_url, http));
        let publisher = MetricPublisher::new(self.writer.clone());

        run_pipeline(&config, &authenticator, search_client, &publisher).await
    }
}

/// 인증 → 수집 → 발행
///
/// 인증 실패 시 검색 요청 없이 즉시 실패하며 메트릭은 하나도 발행되지 않는다.
pub async fn run_pipeline(
    config: &MonitorConfig,
    authenticator: &dyn Authenticator,
    search_client: Arc<dyn SearchClient>,
    publisher: &MetricPublisher,
) -> Result<TaskOutput, CoreError> {
    let token = authenticator
        .authenticate(&config.username, &config.password)
        .await
        .map_err(|e| {
            error!("Splunk 인증 실패, 실행 중단: {e}");
            e
        })?;

    let report = CollectionCoordinator::new(search_client)
        .collect(config, &token)
        .await;
    let published = publisher.publish(&config.metric_prefix, &report.result);

    let message = "Splunk monitoring task completed successfully.".to_string();
    info!("{message} (메트릭 {published}개 발행)");
    Ok(TaskOutput {
        message,
        published,
        report,
    })
}
