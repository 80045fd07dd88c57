//! 메트릭 발행.
//!
//! 병합된 수집 결과를 접두사와 함께 [`MetricWriter`] 포트로 내보낸다.
//! 정책은 키워드 카운트 고정값(AVERAGE / AVERAGE / INDIVIDUAL)만 사용한다.

use splunkmon_core::models::metric::{CollectionResult, KEYWORD_COUNT_POLICY};
use splunkmon_core::ports::metric_writer::MetricWriter;
use std::sync::Arc;
use tracing::{debug, warn};

/// 메트릭 발행기
pub struct MetricPublisher {
    writer: Arc<dyn MetricWriter>,
}

impl MetricPublisher {
    pub fn new(writer: Arc<dyn MetricWriter>) -> Self {
        Self { writer }
    }

    /// `prefix + path` 경로로 전체 결과 발행, 실제 기록된 메트릭 수 반환
    ///
    /// 값이 빈 항목은 조용히 건너뛴다. 개별 기록 실패는 로그만 남기고 계속한다.
    pub fn publish(&self, prefix: &str, result: &CollectionResult) -> usize {
        let mut written = 0;
        for sample in result.samples(prefix) {
            if sample.value.trim().is_empty() {
                continue;
            }
            match self
                .writer
                .write_metric(&sample.path, &sample.value, KEYWORD_COUNT_POLICY)
            {
                Ok(()) => {
                    debug!("메트릭 발행: {}={}", sample.path, sample.value);
                    written += 1;
                }
                Err(e) => warn!("메트릭 기록 실패 {}: {e}", sample.path),
            }
        }
        written
    }
}
