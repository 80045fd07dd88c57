//! 메트릭 모델.
//!
//! 키워드별 검색 결과를 메트릭 경로 → 값 맵으로 표현하고,
//! 모니터링 호스트로 보낼 때의 집계 정책 상수를 정의한다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 메트릭 경로 구분자
pub const METRIC_SEPARATOR: &str = "|";

/// sourcetype별 메트릭 경로의 마지막 세그먼트
pub const COUNT_SUFFIX: &str = "count";

/// 메트릭 샘플 하나 (경로, 문자열 값)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSample {
    /// 메트릭 경로
    pub path: String,
    /// 숫자 문자열 값
    pub value: String,
}

impl MetricSample {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// 수집 결과: 메트릭 경로 → 값
///
/// 키 부재는 "데이터 없음"을 뜻하며 0과 다르다.
/// 경로 순으로 정렬되어 발행 순서가 결정적이다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    metrics: BTreeMap<String, String>,
}

impl CollectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키워드 하나의 결과 병합: 같은 경로는 나중 값이 덮어쓴다
    ///
    /// 덮어쓴 경로 수를 반환한다.
    pub fn merge(&mut self, partial: BTreeMap<String, String>) -> usize {
        let mut overwritten = 0;
        for (path, value) in partial {
            if self.metrics.insert(path, value).is_some() {
                overwritten += 1;
            }
        }
        overwritten
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.metrics.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 접두사를 붙인 샘플 목록
    pub fn samples(&self, prefix: &str) -> Vec<MetricSample> {
        self.iter()
            .map(|(path, value)| MetricSample::new(format!("{prefix}{path}"), value))
            .collect()
    }
}

impl From<BTreeMap<String, String>> for CollectionResult {
    fn from(metrics: BTreeMap<String, String>) -> Self {
        Self { metrics }
    }
}

/// 값 집계 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    Average,
    Sum,
    Observation,
}

/// 시간 롤업 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeRollupType {
    Average,
    Sum,
    Current,
}

/// 클러스터 롤업 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterRollupType {
    Individual,
    Collective,
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggregationType::Average => "AVERAGE",
            AggregationType::Sum => "SUM",
            AggregationType::Observation => "OBSERVATION",
        })
    }
}

impl fmt::Display for TimeRollupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeRollupType::Average => "AVERAGE",
            TimeRollupType::Sum => "SUM",
            TimeRollupType::Current => "CURRENT",
        })
    }
}

impl fmt::Display for ClusterRollupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClusterRollupType::Individual => "INDIVIDUAL",
            ClusterRollupType::Collective => "COLLECTIVE",
        })
    }
}

/// 메트릭 발행 정책 (집계/시간 롤업/클러스터 롤업)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricPolicy {
    pub aggregation: AggregationType,
    pub time_rollup: TimeRollupType,
    pub cluster_rollup: ClusterRollupType,
}

/// 키워드 카운트 메트릭의 고정 정책: 설정 불가
pub const KEYWORD_COUNT_POLICY: MetricPolicy = MetricPolicy {
    aggregation: AggregationType::Average,
    time_rollup: TimeRollupType::Average,
    cluster_rollup: ClusterRollupType::Individual,
};
