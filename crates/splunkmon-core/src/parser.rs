//! 검색 결과 파서.
//!
//! export 엔드포인트 응답(단일 JSON 또는 줄 단위 JSON)을 메트릭 경로 → 값 맵으로 변환한다.
//! 어떤 입력에도 에러를 내지 않는다. 잘못된 줄은 건너뛰고, 결과가 비면
//! "no events found"를 기록한 뒤 빈 맵을 반환한다.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::models::keyword::SearchKeyword;
use crate::models::metric::{COUNT_SUFFIX, METRIC_SEPARATOR};
use crate::models::session::RawResponse;

const COUNT_FIELD: &str = "count";
const SOURCETYPE_FIELD: &str = "sourcetype";

/// 응답 → 키워드 하나의 메트릭 맵
pub struct ResultParser;

impl ResultParser {
    /// 응답 파싱
    ///
    /// - `sourcetype` + `count` 줄 → `<이름>|<sourcetype>|count`
    /// - `count`만 있는 줄 → `<이름>` (단일 집계)
    ///
    /// `<이름>`은 표시 이름, 없으면 키워드. 같은 경로가 다시 나오면 뒤의 줄이 이긴다
    /// (export는 미리보기 행을 먼저 내보내므로 최종 행이 남는다).
    pub fn parse(response: &RawResponse, keyword: &SearchKeyword) -> BTreeMap<String, String> {
        let name = keyword.metric_name();
        let mut metrics = BTreeMap::new();

        for line in response.body.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let node: Value = match serde_json::from_str(line) {
                Ok(node) => node,
                Err(e) => {
                    debug!("JSON 아닌 응답 줄 무시 ({keyword}): {e}");
                    continue;
                }
            };

            let Some(raw_count) = find_value(&node, COUNT_FIELD) else {
                continue;
            };
            let Some(count) = as_count(raw_count) else {
                debug!("숫자가 아닌 count 무시 ({keyword}): {raw_count}");
                continue;
            };

            match find_value(&node, SOURCETYPE_FIELD).and_then(as_text) {
                Some(sourcetype) => {
                    let path = [name, sourcetype.as_str(), COUNT_SUFFIX].join(METRIC_SEPARATOR);
                    metrics.insert(path, count);
                }
                None => {
                    metrics.insert(name.to_string(), count);
                }
            }
        }

        if metrics.is_empty() {
            info!("no events found: {keyword}");
        }
        metrics
    }
}

/// 필드를 재귀적으로 탐색: 현재 객체의 필드를 먼저 보고, 없으면 하위 값을 순서대로 탐색
fn find_value<'a>(node: &'a Value, field: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map
            .get(field)
            .or_else(|| map.values().find_map(|child| find_value(child, field))),
        Value::Array(items) => items.iter().find_map(|child| find_value(child, field)),
        _ => None,
    }
}

/// 카운트는 음이 아닌 정수만 허용 (숫자 또는 숫자 문자열)
fn as_count(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_u64().map(|v| v.to_string()),
        Value::String(s) => s.trim().parse::<u64>().ok().map(|v| v.to_string()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
