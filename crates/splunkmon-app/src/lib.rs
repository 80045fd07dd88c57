//! # splunkmon-app
//!
//! 어댑터 와이어링과 실행 오케스트레이션.
//!
//! - [`task`]: 한 번의 실행 (설정 → 인증 → 수집 → 발행)
//! - [`coordinator`]: 키워드별 병렬 수집과 병합
//! - [`worker_pool`]: 크기 제한 + 작업 타임아웃 워커 풀
//! - [`publisher`]: 고정 정책 메트릭 발행
//! - [`writer`]: 줄 단위 메트릭 출력
//! - [`config_loader`]: YAML 설정 로드

pub mod config_loader;
pub mod coordinator;
pub mod publisher;
pub mod task;
pub mod worker_pool;
pub mod writer;
