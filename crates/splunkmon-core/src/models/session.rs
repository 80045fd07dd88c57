//! 세션 모델.
//!
//! 실행 단위(run) 한 번 동안만 유효한 Splunk 세션 토큰과
//! 검색 응답 원본을 표현한다.

use std::fmt;

/// Splunk 세션 토큰: 로그인 응답의 `sessionKey`
///
/// 실행 단위가 소유하며 저장하지 않는다. `Debug` 출력은 마스킹된다.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// `Authorization` 헤더 값
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// 검색 응답 원본 (상태 코드 + 본문)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP 상태 코드
    pub status: u16,
    /// 응답 본문 (NDJSON 또는 단일 JSON)
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx 응답 여부
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
