//! 모니터 설정 구조체.
//!
//! Splunk 접속 정보, 메트릭 접두사, 워커 수, 검색 키워드 목록을 정의한다.
//! YAML 로드는 앱 crate가 `config` crate로 수행하고, 이 모듈은
//! 역직렬화 이후의 정규화와 검증을 담당한다.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;

use crate::error::CoreError;
use crate::models::keyword::SearchKeyword;
use crate::models::metric::METRIC_SEPARATOR;

/// 기본 워커 수 (`numberOfThreads` = 0일 때)
pub const DEFAULT_NUMBER_OF_THREADS: usize = 5;

/// 기본 메트릭 접두사
pub const DEFAULT_METRIC_PREFIX: &str = "Custom Metrics|Splunk|";

/// 최상위 모니터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Splunk 관리 포트 호스트
    #[serde(default = "default_host")]
    pub host: String,
    /// Splunk 관리 포트 (기본 8089)
    #[serde(default = "default_port")]
    pub port: u16,
    /// 로그인 사용자
    #[serde(default)]
    pub username: String,
    /// 로그인 비밀번호
    #[serde(default)]
    pub password: String,
    /// HTTPS 사용 여부
    #[serde(default, rename = "usessl", alias = "useSsl")]
    pub use_ssl: bool,
    /// 메트릭 경로 접두사 (항상 `|`로 끝나도록 정규화)
    #[serde(
        default = "default_metric_prefix",
        rename = "metricPrefix",
        alias = "metricprefix"
    )]
    pub metric_prefix: String,
    /// 워커 수 (0이면 기본값 5)
    #[serde(default, rename = "numberOfThreads", alias = "numberofthreads")]
    pub number_of_threads: usize,
    /// 키워드 작업 하나의 타임아웃 (초)
    #[serde(
        default = "default_task_timeout_secs",
        rename = "taskTimeoutSecs",
        alias = "tasktimeoutsecs"
    )]
    pub task_timeout_secs: u64,
    /// HTTP 요청 타임아웃 (초)
    #[serde(
        default = "default_request_timeout_secs",
        rename = "requestTimeoutSecs",
        alias = "requesttimeoutsecs"
    )]
    pub request_timeout_secs: u64,
    /// 검색 키워드 목록 (정규화 후 중복 없음, 순서 유지)
    #[serde(default, rename = "searchKeywords", alias = "searchkeywords")]
    pub search_keywords: Vec<SearchKeyword>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            use_ssl: false,
            metric_prefix: default_metric_prefix(),
            number_of_threads: 0,
            task_timeout_secs: default_task_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            search_keywords: Vec::new(),
        }
    }
}

impl MonitorConfig {
    /// Splunk 관리 API 기본 URL
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host.trim(), self.port)
    }

    /// 실제 워커 수
    pub fn worker_count(&self) -> usize {
        if self.number_of_threads == 0 {
            DEFAULT_NUMBER_OF_THREADS
        } else {
            self.number_of_threads
        }
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 정규화: 접두사 구분자 보정, 키워드 공백 제거 및 중복 제거
    ///
    /// 동일한 명세가 여러 번 나오면 첫 번째만 남긴다.
    pub fn normalize(mut self) -> Self {
        let prefix = self.metric_prefix.trim();
        self.metric_prefix = if prefix.is_empty() {
            default_metric_prefix()
        } else if prefix.ends_with(METRIC_SEPARATOR) {
            prefix.to_string()
        } else {
            format!("{prefix}{METRIC_SEPARATOR}")
        };
        self.host = self.host.trim().to_string();

        let mut seen = HashSet::new();
        let mut keywords = Vec::with_capacity(self.search_keywords.len());
        for keyword in self.search_keywords.iter().map(SearchKeyword::normalized) {
            if seen.insert(keyword.clone()) {
                keywords.push(keyword);
            } else {
                warn!("중복 검색 키워드 무시: {keyword}");
            }
        }
        self.search_keywords = keywords;
        self
    }

    /// 필수 필드 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.host.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "host".to_string(),
                message: "비어 있음".to_string(),
            });
        }
        if self.port == 0 {
            return Err(CoreError::Validation {
                field: "port".to_string(),
                message: "0은 사용할 수 없음".to_string(),
            });
        }
        if self.username.is_empty() {
            return Err(CoreError::Validation {
                field: "username".to_string(),
                message: "비어 있음".to_string(),
            });
        }
        if self.task_timeout_secs == 0 {
            return Err(CoreError::Validation {
                field: "taskTimeoutSecs".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        if self.search_keywords.is_empty() {
            warn!("검색 키워드가 비어 있음: 수집할 메트릭 없음");
        }
        Ok(())
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8089
}

fn default_metric_prefix() -> String {
    DEFAULT_METRIC_PREFIX.to_string()
}

fn default_task_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    30
}
