//! 줄 단위 메트릭 출력.
//!
//! 머신 에이전트 독립 확장 형식으로 한 줄에 메트릭 하나를 쓴다:
//! `name=<path>,aggregator=AVERAGE,time-rollup=AVERAGE,cluster-rollup=INDIVIDUAL,value=<v>`

use parking_lot::Mutex;
use splunkmon_core::error::CoreError;
use splunkmon_core::models::metric::MetricPolicy;
use splunkmon_core::ports::metric_writer::MetricWriter;
use std::io::{self, Stdout, Write};

/// `Write` 대상에 메트릭 줄을 쓰는 `MetricWriter` 구현
///
/// 여러 워커에서 공유되므로 내부 writer는 `Mutex`로 보호한다.
pub struct LineMetricWriter<W: Write + Send> {
    out: Mutex<W>,
}

/// 표준 출력 writer (로그는 stderr로 분리)
pub type StdoutMetricWriter = LineMetricWriter<Stdout>;

impl StdoutMetricWriter {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LineMetricWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// 내부 writer 반환 (테스트에서 출력 확인용)
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

/// 메트릭 한 줄 포맷
pub fn format_line(path: &str, value: &str, policy: MetricPolicy) -> String {
    format!(
        "name={path},aggregator={},time-rollup={},cluster-rollup={},value={value}",
        policy.aggregation, policy.time_rollup, policy.cluster_rollup
    )
}

impl<W: Write + Send> MetricWriter for LineMetricWriter<W> {
    fn write_metric(
        &self,
        path: &str,
        value: &str,
        policy: MetricPolicy,
    ) -> Result<(), CoreError> {
        let line = format_line(path, value, policy);
        let mut out = self.out.lock();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
