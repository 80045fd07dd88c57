//! # splunk-monitor
//!
//! Splunk 키워드 카운트 모니터 바이너리 진입점.
//! 한 번 실행되어 메트릭을 stdout에 출력하고 종료한다 (주기 실행은 호스트가 담당).

use anyhow::{Context, Result};
use clap::Parser;
use splunkmon_app::task::{MonitorTask, CONFIG_ARG};
use splunkmon_app::writer::StdoutMetricWriter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Splunk 키워드 카운트 모니터
#[derive(Parser, Debug)]
#[command(name = "splunk-monitor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (절대 경로 또는 실행 파일 기준 상대 경로)
    #[arg(long, short = 'c', default_value = "config.yml")]
    config_file: String,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout은 메트릭 전용이므로 로그는 stderr로
    let log_filter = format!(
        "splunk_monitor={lvl},splunkmon_app={lvl},splunkmon_core={lvl},splunkmon_network={lvl}",
        lvl = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Splunk 모니터 시작 (v{})", env!("CARGO_PKG_VERSION"));

    let task_args = HashMap::from([(CONFIG_ARG.to_string(), args.config_file)]);
    let task = MonitorTask::new(Arc::new(StdoutMetricWriter::stdout()));
    let output = task
        .execute(&task_args)
        .await
        .context("Splunk monitoring task completed with failures.")?;

    info!(
        "{} 성공 {}/{}, 타임아웃 {}",
        output.message,
        output.report.succeeded,
        output.report.submitted,
        output.report.timed_out
    );
    Ok(())
}
