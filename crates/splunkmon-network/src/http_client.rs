//! Splunk export 검색 클라이언트.
//!
//! `SearchClient` 포트 구현. 세션 토큰을 `Authorization` 헤더로 주입한다.
//! 재시도하지 않는다: 실패한 키워드는 이번 실행에서 메트릭이 없을 뿐이다.

use async_trait::async_trait;
use splunkmon_core::error::CoreError;
use splunkmon_core::models::session::{RawResponse, SessionToken};
use splunkmon_core::ports::search_client::SearchClient;
use splunkmon_core::query::SearchQuery;
use std::time::Duration;
use tracing::debug;

/// export 검색 엔드포인트
pub const QUERY_ENDPOINT_URI: &str = "/servicesNS/admin/search/search/jobs/export";

/// 공유 HTTP 클라이언트 생성 (인증/검색 공용)
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, CoreError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))
}

/// export 검색 클라이언트: `SearchClient` 포트 구현
pub struct SplunkSearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl SplunkSearchClient {
    /// 공유 HTTP 클라이언트로 생성
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SearchClient for SplunkSearchClient {
    async fn search(
        &self,
        token: &SessionToken,
        query: &SearchQuery,
    ) -> Result<RawResponse, CoreError> {
        let url = format!("{}{QUERY_ENDPOINT_URI}", self.base_url);
        debug!("검색 요청: {}", query.query_string());

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, token.as_str())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(query.form_body())
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("검색 요청 실패: {e}")))?;

        let status = resp.status().as_u16();
        // 본문을 끝까지 읽어 연결을 풀에 반환
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("검색 응답 읽기 실패: {e}")))?;

        debug!("검색 응답: status={status}, {} bytes", body.len());
        Ok(RawResponse::new(status, body))
    }
}
