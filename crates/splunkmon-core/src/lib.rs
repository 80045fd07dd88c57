//! # splunkmon-core
//!
//! Splunk 키워드 카운트 모니터의 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 쿼리 생성과 결과 파싱은 I/O 없는 순수 로직으로 이 crate에 둔다.
//!
//! ## 구조
//!
//! - [`models`]: 키워드 명세, 세션 토큰, 메트릭 결과
//! - [`ports`]: 인증/검색/메트릭 출력 포트 (async_trait)
//! - [`query`]: 시간 창 + `stats count` 쿼리 생성
//! - [`parser`]: export 응답 → 메트릭 맵
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 모니터 설정 구조체

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod ports;
pub mod query;
