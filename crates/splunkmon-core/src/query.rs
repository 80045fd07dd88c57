//! 검색 쿼리 생성.
//!
//! 키워드 명세와 시간 창으로 export 엔드포인트에 보낼 `stats count` 쿼리를 만든다.
//! 순수 함수이며 I/O가 없다.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::keyword::SearchKeyword;

/// 시간 창 길이 (초)
const WINDOW_SECS: i64 = 60;

/// 검색 시간 창 `[from, to)` (epoch 초)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

impl TimeWindow {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// 직전에 끝난 1분 구간
    ///
    /// 인덱싱 지연으로 현재 분의 카운트가 덜 잡히므로 진행 중인 분은 제외한다.
    pub fn last_complete_minute(now_epoch_secs: i64) -> Self {
        let to = now_epoch_secs - now_epoch_secs % WINDOW_SECS;
        Self {
            from: to - WINDOW_SECS,
            to,
        }
    }

    /// 현재 시각 기준 직전 1분 구간
    pub fn current() -> Self {
        Self::last_complete_minute(Utc::now().timestamp())
    }

    /// 로그용 사람이 읽을 수 있는 구간 표기
    pub fn describe(&self) -> String {
        let fmt = |secs: i64| {
            DateTime::<Utc>::from_timestamp(secs, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| secs.to_string())
        };
        format!("{} ~ {}", fmt(self.from), fmt(self.to))
    }
}

/// 생성된 검색 쿼리
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// SPL 검색 문 (`search ... | stats count`)
    search: String,
    window: TimeWindow,
}

impl SearchQuery {
    /// SPL 검색 문
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// 인코딩하지 않은 쿼리 문자열
    ///
    /// `search=search <조건> | stats count&output_mode=json&earliest_time=..&latest_time=..`
    pub fn query_string(&self) -> String {
        format!(
            "search={}&output_mode=json&earliest_time={}&latest_time={}",
            self.search, self.window.from, self.window.to
        )
    }

    /// 전송용 `application/x-www-form-urlencoded` 본문
    pub fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search", &self.search)
            .append_pair("output_mode", "json")
            .append_pair("earliest_time", &self.window.from.to_string())
            .append_pair("latest_time", &self.window.to.to_string())
            .finish()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_string())
    }
}

/// 키워드 명세 → 검색 쿼리
pub struct QueryBuilder;

impl QueryBuilder {
    /// 쿼리 생성
    ///
    /// 비어 있지 않은 필드만 `host=`, `source=`, `sourcetype=`, `index=` 절로 추가한다.
    /// 모든 필드가 비면 시간 창 전체의 단순 카운트가 된다.
    pub fn build(keyword: &SearchKeyword, from_epoch_secs: i64, to_epoch_secs: i64) -> SearchQuery {
        Self::build_for_window(keyword, TimeWindow::new(from_epoch_secs, to_epoch_secs))
    }

    pub fn build_for_window(keyword: &SearchKeyword, window: TimeWindow) -> SearchQuery {
        let mut search = String::from("search ");

        let text = keyword.keyword.trim();
        if !text.is_empty() {
            search.push_str(text);
            search.push(' ');
        }

        for (name, value) in [
            ("host", &keyword.host),
            ("source", &keyword.source),
            ("sourcetype", &keyword.sourcetype),
            ("index", &keyword.index),
        ] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                search.push_str(name);
                search.push('=');
                search.push_str(v);
                search.push(' ');
            }
        }

        search.push_str("| stats count");
        if keyword.groups_by_sourcetype() {
            search.push_str(" by sourcetype");
        }

        SearchQuery { search, window }
    }
}
