//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! `splunkmon-network`가 인증/검색 포트를, `splunkmon-app`이 메트릭 출력 포트를 구현하며
//! 앱 crate에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 모든 async trait은 `async_trait` 매크로로 object safety를 보장한다.

pub mod authenticator;
pub mod metric_writer;
pub mod search_client;
