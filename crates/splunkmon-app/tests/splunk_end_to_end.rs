//! mock Splunk 서버 대상 end-to-end 테스트.
//!
//! 임시 YAML 설정 → `MonitorTask::execute` → 실제 reqwest 어댑터 → mockito.

use mockito::Matcher;
use parking_lot::Mutex;
use splunkmon_app::task::{MonitorTask, CONFIG_ARG};
use splunkmon_core::error::CoreError;
use splunkmon_core::models::metric::{MetricPolicy, KEYWORD_COUNT_POLICY};
use splunkmon_core::ports::metric_writer::MetricWriter;
use splunkmon_network::auth::AUTH_URI;
use splunkmon_network::http_client::QUERY_ENDPOINT_URI;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingWriter {
    lines: Mutex<Vec<(String, String, MetricPolicy)>>,
}

impl MetricWriter for RecordingWriter {
    fn write_metric(&self, path: &str, value: &str, policy: MetricPolicy) -> Result<(), CoreError> {
        self.lines
            .lock()
            .push((path.to_string(), value.to_string(), policy));
        Ok(())
    }
}

/// mock 서버를 가리키는 설정 파일 작성, 인자 맵 반환
fn write_config(dir: &TempDir, server: &mockito::ServerGuard) -> HashMap<String, String> {
    let host_port = server.host_with_port();
    let (host, port) = host_port.rsplit_once(':').unwrap();
    let yaml = format!(
        r#"
host: "{host}"
port: {port}
usessl: false
username: admin
password: changeme
metricPrefix: "Custom Metrics|Splunk|"
numberOfThreads: 2
searchKeywords:
  - keyword: error
    index: myapp
  - keyword: timeout
    sourcetype: access_combined
    displayName: Timeouts
"#
    );
    let path = dir.path().join("config.yml");
    fs::write(&path, yaml).unwrap();
    HashMap::from([(CONFIG_ARG.to_string(), path.display().to_string())])
}

#[tokio::test]
async fn full_run_publishes_parsed_metrics() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", AUTH_URI)
        .match_body("username=admin&password=changeme&output_mode=json")
        .with_status(200)
        .with_body(r#"{"sessionKey":"abc123"}"#)
        .expect(1)
        .create_async()
        .await;
    let error_search = server
        .mock("POST", QUERY_ENDPOINT_URI)
        .match_header("authorization", "abc123")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("search=search\\+error\\+index%3Dmyapp".to_string()),
            Matcher::Regex("by\\+sourcetype".to_string()),
            Matcher::Regex("earliest_time=".to_string()),
            Matcher::Regex("latest_time=".to_string()),
        ]))
        .with_status(200)
        .with_body(concat!(
            r#"{"preview":false,"result":{"sourcetype":"app_log","count":"42"}}"#,
            "\n",
            r#"{"preview":false,"lastrow":true,"result":{"sourcetype":"syslog","count":"7"}}"#
        ))
        .expect(1)
        .create_async()
        .await;
    let timeout_search = server
        .mock("POST", QUERY_ENDPOINT_URI)
        .match_header("authorization", "abc123")
        .match_body(Matcher::Regex(
            "search=search\\+timeout\\+sourcetype%3Daccess_combined".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"preview":false,"result":{"count":"5"}}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let args = write_config(&dir, &server);
    let writer = Arc::new(RecordingWriter::default());

    let output = MonitorTask::new(writer.clone())
        .execute(&args)
        .await
        .unwrap();

    assert_eq!(output.report.submitted, 2);
    assert_eq!(output.report.succeeded, 2);
    assert_eq!(output.published, 3);

    let lines = writer.lines.lock();
    let find = |path: &str| {
        lines
            .iter()
            .find(|(p, _, _)| p == path)
            .map(|(_, v, _)| v.clone())
    };
    assert_eq!(
        find("Custom Metrics|Splunk|error|app_log|count").as_deref(),
        Some("42")
    );
    assert_eq!(
        find("Custom Metrics|Splunk|error|syslog|count").as_deref(),
        Some("7")
    );
    assert_eq!(find("Custom Metrics|Splunk|Timeouts").as_deref(), Some("5"));
    assert!(lines.iter().all(|(_, _, p)| *p == KEYWORD_COUNT_POLICY));

    login.assert_async().await;
    error_search.assert_async().await;
    timeout_search.assert_async().await;
}

#[tokio::test]
async fn failed_search_keeps_other_keywords() {
    let mut server = mockito::Server::new_async().await;
    let _login = server
        .mock("POST", AUTH_URI)
        .with_status(200)
        .with_body(r#"{"sessionKey":"abc123"}"#)
        .create_async()
        .await;
    let _error_search = server
        .mock("POST", QUERY_ENDPOINT_URI)
        .match_body(Matcher::Regex("search\\+error".to_string()))
        .with_status(400)
        .with_body(r#"{"messages":[{"type":"FATAL","text":"Unknown index"}]}"#)
        .create_async()
        .await;
    let _timeout_search = server
        .mock("POST", QUERY_ENDPOINT_URI)
        .match_body(Matcher::Regex("search\\+timeout".to_string()))
        .with_status(200)
        .with_body(r#"{"result":{"count":"5"}}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let args = write_config(&dir, &server);
    let writer = Arc::new(RecordingWriter::default());

    let output = MonitorTask::new(writer.clone())
        .execute(&args)
        .await
        .unwrap();

    assert_eq!(output.report.failed, 1);
    assert_eq!(output.report.succeeded, 1);
    assert_eq!(output.published, 1);
    assert_eq!(writer.lines.lock()[0].0, "Custom Metrics|Splunk|Timeouts");
}

#[tokio::test]
async fn rejected_login_stops_before_any_search() {
    let mut server = mockito::Server::new_async().await;
    let _login = server
        .mock("POST", AUTH_URI)
        .with_status(401)
        .with_body(r#"{"messages":[{"type":"WARN","text":"Login failed"}]}"#)
        .create_async()
        .await;
    let search = server
        .mock("POST", QUERY_ENDPOINT_URI)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let args = write_config(&dir, &server);
    let writer = Arc::new(RecordingWriter::default());

    let err = MonitorTask::new(writer.clone())
        .execute(&args)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Auth(_)));
    assert!(err.to_string().contains("Login failed"));
    assert!(writer.lines.lock().is_empty());
    search.assert_async().await;
}

#[tokio::test]
async fn missing_config_argument_is_config_error() {
    let writer = Arc::new(RecordingWriter::default());
    let err = MonitorTask::new(writer)
        .execute(&HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}
