//! 수집 코디네이터.
//!
//! 키워드마다 작업 하나(쿼리 생성 → 검색 → 파싱)를 워커 풀에 제출하고,
//! 완료 순서대로 정확히 키워드 수만큼 결과를 받아 하나의 [`CollectionResult`]로 합친다.
//! 키워드 하나의 실패/타임아웃은 해당 메트릭만 빠질 뿐 실행 전체를 실패시키지 않는다.

use splunkmon_core::config::MonitorConfig;
use splunkmon_core::error::CoreError;
use splunkmon_core::models::keyword::SearchKeyword;
use splunkmon_core::models::metric::CollectionResult;
use splunkmon_core::models::session::SessionToken;
use splunkmon_core::parser::ResultParser;
use splunkmon_core::ports::search_client::SearchClient;
use splunkmon_core::query::{QueryBuilder, TimeWindow};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::worker_pool::{TaskOutcome, WorkerPool};

/// 에러 메시지에 담을 응답 본문 최대 길이
const MAX_ERROR_BODY_CHARS: usize = 256;

/// 키워드 하나의 수집 결과
type KeywordResult = Result<BTreeMap<String, String>, CoreError>;

/// 수집 실행 요약
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// 병합된 메트릭
    pub result: CollectionResult,
    /// 제출된 작업 수 (= 키워드 수)
    pub submitted: usize,
    /// 완료된 작업 수 (빈 결과 포함)
    pub succeeded: usize,
    /// 에러/panic으로 실패한 작업 수
    pub failed: usize,
    /// 타임아웃된 작업 수
    pub timed_out: usize,
    /// 다른 키워드에 의해 덮어써진 경로 수
    pub overwritten: usize,
}

impl CollectionReport {
    /// 소비된 작업 결과 수
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed + self.timed_out
    }
}

/// 수집 코디네이터
pub struct CollectionCoordinator {
    search_client: Arc<dyn SearchClient>,
    /// 설정값 대신 사용할 작업 타임아웃
    task_timeout: Option<Duration>,
}

impl CollectionCoordinator {
    pub fn new(search_client: Arc<dyn SearchClient>) -> Self {
        Self {
            search_client,
            task_timeout: None,
        }
    }

    /// 작업 타임아웃 오버라이드 (`taskTimeoutSecs` 대신)
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = Some(timeout);
        self
    }

    /// 직전 1분 구간으로 수집
    pub async fn collect(&self, config: &MonitorConfig, token: &SessionToken) -> CollectionReport {
        self.collect_window(config, token, TimeWindow::current()).await
    }

    /// 지정 구간으로 수집
    pub async fn collect_window(
        &self,
        config: &MonitorConfig,
        token: &SessionToken,
        window: TimeWindow,
    ) -> CollectionReport {
        let task_timeout = self.task_timeout.unwrap_or_else(|| config.task_timeout());
        let mut pool: WorkerPool<KeywordResult> =
            WorkerPool::new(config.worker_count(), task_timeout);
        let token = Arc::new(token.clone());

        info!(
            "키워드 {}개 수집 시작: workers={}, timeout={:?}, 구간={}",
            config.search_keywords.len(),
            pool.size(),
            task_timeout,
            window.describe()
        );

        for keyword in &config.search_keywords {
            let client = self.search_client.clone();
            let token = token.clone();
            let keyword = keyword.clone();
            let span = info_span!("keyword", keyword = %keyword);
            pool.submit(
                keyword.to_string(),
                async move { collect_keyword(client.as_ref(), &token, &keyword, window).await }
                    .instrument(span),
            );
        }

        let report = drain(&mut pool).await;
        pool.shutdown();

        info!(
            "수집 완료: 메트릭 {}개, 성공 {}, 실패 {}, 타임아웃 {}",
            report.result.len(),
            report.succeeded,
            report.failed,
            report.timed_out
        );
        report
    }
}

/// 제출된 작업 수만큼 완료 결과를 받아 병합
async fn drain(pool: &mut WorkerPool<KeywordResult>) -> CollectionReport {
    let mut report = CollectionReport {
        submitted: pool.submitted(),
        ..Default::default()
    };

    for _ in 0..report.submitted {
        let Some(labeled) = pool.next_completed().await else {
            error!(
                "작업 결과 누락: {}/{}개만 수신",
                report.completed(),
                report.submitted
            );
            break;
        };

        match labeled.outcome {
            TaskOutcome::Completed(Ok(metrics)) => {
                debug!("{}: 메트릭 {}개", labeled.label, metrics.len());
                let overwritten = report.result.merge(metrics);
                if overwritten > 0 {
                    warn!("{}: 기존 메트릭 경로 {overwritten}개 덮어씀", labeled.label);
                }
                report.overwritten += overwritten;
                report.succeeded += 1;
            }
            TaskOutcome::Completed(Err(e)) => {
                error!("키워드 검색 실패 {}: {e}", labeled.label);
                report.failed += 1;
            }
            TaskOutcome::TimedOut(timeout) => {
                let e = CoreError::ExecutionTimeout {
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                };
                error!("키워드 검색 중단 {}: {e}", labeled.label);
                report.timed_out += 1;
            }
            TaskOutcome::Panicked(msg) => {
                let e = CoreError::Internal(format!("작업 panic: {msg}"));
                error!("키워드 검색 실패 {}: {e}", labeled.label);
                report.failed += 1;
            }
            TaskOutcome::Cancelled => {
                warn!("키워드 작업 취소됨 {}", labeled.label);
                report.failed += 1;
            }
        }
    }

    report
}

/// 키워드 하나: 쿼리 생성 → 검색 → 상태 확인 → 파싱
async fn collect_keyword(
    client: &dyn SearchClient,
    token: &SessionToken,
    keyword: &SearchKeyword,
    window: TimeWindow,
) -> KeywordResult {
    let query = QueryBuilder::build_for_window(keyword, window);
    debug!("쿼리: {}", query.query_string());

    let response = client.search(token, &query).await?;
    if !response.is_success() {
        return Err(CoreError::Search {
            status: response.status,
            message: response.body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    Ok(ResultParser::parse(&response, keyword))
}
