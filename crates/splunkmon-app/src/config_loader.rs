//! YAML 설정 파일 로드.
//!
//! 경로 해석 → `config` crate로 YAML + 환경변수(`SPLUNKMON_*`) 병합 →
//! `MonitorConfig` 역직렬화 → 정규화 → 검증 순서로 진행한다.

use config::{Config, Environment, File, FileFormat};
use splunkmon_core::config::MonitorConfig;
use splunkmon_core::error::CoreError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 환경변수 오버라이드 접두사 (예: `SPLUNKMON_PASSWORD`)
pub const ENV_PREFIX: &str = "SPLUNKMON";

/// 설정 파일 경로 해석
///
/// 절대 경로는 그대로, 상대 경로는 실행 파일 디렉토리 기준으로 찾고
/// 없으면 현재 작업 디렉토리 기준으로 찾는다.
pub fn resolve_config_path(raw: &str) -> Result<PathBuf, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Config("config-file 인자가 비어 있음".to_string()));
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        return existing(path.to_path_buf());
    }

    let exe_relative = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(path)));
    if let Some(candidate) = exe_relative.filter(|p| p.is_file()) {
        return Ok(candidate);
    }

    existing(path.to_path_buf())
}

fn existing(path: PathBuf) -> Result<PathBuf, CoreError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CoreError::Config(format!(
            "설정 파일 없음: {}",
            path.display()
        )))
    }
}

/// 설정 파일 로드 + 정규화 + 검증
pub fn load_config(path: &Path) -> Result<MonitorConfig, CoreError> {
    let settings = Config::builder()
        .add_source(File::from(path).format(FileFormat::Yaml))
        // 값은 문자열 그대로 둔다. 숫자/불리언 필드는 역직렬화 시 변환된다.
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()
        .map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {e}", path.display()))
        })?;

    let config: MonitorConfig = settings.try_deserialize().map_err(|e| {
        CoreError::Config(format!("설정 파일 파싱 실패: {}: {e}", path.display()))
    })?;

    let config = config.normalize();
    config.validate()?;

    debug!("설정 파일 로드 완료: {}", path.display());
    info!(
        "Splunk {} (user={}), 키워드 {}개, workers={}",
        config.base_url(),
        config.username,
        config.search_keywords.len(),
        config.worker_count()
    );
    Ok(config)
}
