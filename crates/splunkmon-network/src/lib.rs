//! # splunkmon-network
//!
//! Splunk 관리 REST API 어댑터.
//! 세션 로그인(`auth`)과 export 엔드포인트 검색(`http_client`)을 담당하며,
//! 두 어댑터는 타임아웃이 설정된 `reqwest::Client` 하나를 공유한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use splunkmon_network::auth::SplunkAuthenticator;
//! use splunkmon_network::http_client::{build_client, SplunkSearchClient};
//!
//! let client = build_client(config.request_timeout())?;
//! let authenticator = SplunkAuthenticator::new(&config.base_url(), client.clone());
//! let search_client = SplunkSearchClient::new(&config.base_url(), client);
//! ```

pub mod auth;
pub mod http_client;
