//! 메트릭 출력 포트.
//!
//! 모니터링 호스트의 메트릭 수신부. 구현: `splunkmon-app` crate

use crate::error::CoreError;
use crate::models::metric::MetricPolicy;

/// 메트릭 한 건 출력
pub trait MetricWriter: Send + Sync {
    fn write_metric(&self, path: &str, value: &str, policy: MetricPolicy)
        -> Result<(), CoreError>;
}
