//! Splunk 모니터 도메인 모델.
//!
//! 키워드 명세, 세션 토큰, 검색 응답, 메트릭 결과를 정의한다.

pub mod keyword;
pub mod metric;
pub mod session;
