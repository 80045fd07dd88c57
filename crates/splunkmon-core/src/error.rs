//! Splunk 모니터 핵심 에러 타입.
//!
//! 어댑터 crate와 앱 crate는 모두 `CoreError`를 그대로 반환한다.
//! 실행 단위(run) 전체를 중단시키는 에러와 키워드 하나에만 국한되는 에러를
//! [`CoreError::is_fatal`]로 구분한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정 파일 누락, 읽기 실패, 값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (자격증명 오류, 200 이외 응답, sessionKey 누락)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 네트워크 에러 (연결 실패, 전송 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 검색 요청 실패 (200 이외 응답)
    #[error("검색 실패 ({status}): {message}")]
    Search {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 또는 사유
        message: String,
    },

    /// 작업 타임아웃
    #[error("실행 타임아웃: {timeout_ms}ms 초과")]
    ExecutionTimeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 실행 단위 전체를 중단해야 하는 에러인지 판별
    ///
    /// 설정/인증 에러는 키워드 검색 전에 발생하며 복구하지 않는다.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoreError::Config(_) | CoreError::Validation { .. } | CoreError::Auth(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(CoreError::Config("missing".to_string()).is_fatal());
        assert!(CoreError::Auth("bad".to_string()).is_fatal());
        assert!(CoreError::Validation {
            field: "host".to_string(),
            message: "empty".to_string(),
        }
        .is_fatal());

        assert!(!CoreError::Network("refused".to_string()).is_fatal());
        assert!(!CoreError::ExecutionTimeout { timeout_ms: 30_000 }.is_fatal());
        assert!(!CoreError::Search {
            status: 500,
            message: "boom".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn search_error_display() {
        let err = CoreError::Search {
            status: 400,
            message: "Unknown search command".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("Unknown search command"));
    }
}
