//! Splunk 세션 인증.
//!
//! `/servicesNS/admin/search/auth/login/`에 자격증명을 POST하고
//! 응답의 `sessionKey`를 세션 토큰으로 돌려준다.

use async_trait::async_trait;
use serde::Deserialize;
use splunkmon_core::error::CoreError;
use splunkmon_core::models::session::SessionToken;
use splunkmon_core::ports::authenticator::Authenticator;
use tracing::{debug, error};

/// 로그인 엔드포인트
pub const AUTH_URI: &str = "/servicesNS/admin/search/auth/login/";

/// 로그인 응답: 성공 시 `sessionKey`, 실패 시 `messages[].type/text`
#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(rename = "sessionKey")]
    session_key: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
    #[serde(default)]
    messages: Vec<LoginMessage>,
}

#[derive(Debug, Deserialize)]
struct LoginMessage {
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
}

impl LoginResponse {
    /// 에러 유형/메시지 (최상위 필드 우선, 없으면 첫 메시지)
    fn error_detail(&self) -> (String, String) {
        let first = self.messages.first();
        let kind = self
            .kind
            .clone()
            .or_else(|| first.and_then(|m| m.kind.clone()))
            .unwrap_or_default();
        let text = self
            .text
            .clone()
            .or_else(|| first.and_then(|m| m.text.clone()))
            .unwrap_or_default();
        (kind, text)
    }
}

/// Splunk 로그인: `Authenticator` 포트 구현
pub struct SplunkAuthenticator {
    client: reqwest::Client,
    base_url: String,
}

impl SplunkAuthenticator {
    /// 공유 HTTP 클라이언트로 생성
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Authenticator for SplunkAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, CoreError> {
        let url = format!("{}{AUTH_URI}", self.base_url);
        debug!("Splunk 로그인 요청: {url} (user={username})");

        let resp = self
            .client
            .post(&url)
            .form(&[
                ("username", username),
                ("password", password),
                ("output_mode", "json"),
            ])
            .send()
            .await
            .map_err(|e| CoreError::Auth(format!("로그인 요청 실패: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| CoreError::Auth(format!("로그인 응답 읽기 실패: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<LoginResponse>(&text).unwrap_or_default();
            let (kind, message) = detail.error_detail();
            error!("Splunk 인증 실패 ({status}): {kind} {message}");
            return Err(CoreError::Auth(format!(
                "로그인 실패 ({status}): {kind} {message}"
            )));
        }

        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| CoreError::Auth(format!("로그인 응답 파싱 실패: {e}")))?;

        match login.session_key.filter(|k| !k.is_empty()) {
            Some(key) => {
                debug!("Splunk 로그인 성공");
                Ok(SessionToken::new(key))
            }
            None => Err(CoreError::Auth("로그인 응답에 sessionKey 없음".to_string())),
        }
    }
}
