//! 검색 키워드 명세.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 검색 키워드 하나: 독립적인 검색 요청 1건에 대응
///
/// 필터 필드(`host`, `source`, `sourcetype`, `index`)는 비어 있으면 쿼리에서 생략된다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchKeyword {
    /// 검색어 (비어 있으면 필터만으로 검색)
    #[serde(default)]
    pub keyword: String,
    /// `host=` 필터
    #[serde(default)]
    pub host: Option<String>,
    /// `source=` 필터
    #[serde(default)]
    pub source: Option<String>,
    /// `sourcetype=` 필터
    #[serde(default)]
    pub sourcetype: Option<String>,
    /// `index=` 필터
    #[serde(default)]
    pub index: Option<String>,
    /// 메트릭 경로에 사용할 표시 이름
    #[serde(default, rename = "displayName", alias = "displayname")]
    pub display_name: Option<String>,
    /// `stats count by sourcetype` 사용 여부 (미지정 시 sourcetype 필터 유무로 결정)
    #[serde(
        default,
        rename = "groupBySourcetype",
        alias = "groupbysourcetype",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_by_sourcetype: Option<bool>,
}

impl SearchKeyword {
    /// 키워드만 지정된 명세 생성
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_sourcetype(mut self, sourcetype: impl Into<String>) -> Self {
        self.sourcetype = Some(sourcetype.into());
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_group_by_sourcetype(mut self, enabled: bool) -> Self {
        self.group_by_sourcetype = Some(enabled);
        self
    }

    /// 공백 제거 + 빈 선택 필드를 `None`으로 정리
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            keyword: self.keyword.trim().to_string(),
            host: clean(&self.host),
            source: clean(&self.source),
            sourcetype: clean(&self.sourcetype),
            index: clean(&self.index),
            display_name: clean(&self.display_name),
            group_by_sourcetype: self.group_by_sourcetype,
        }
    }

    /// 메트릭 경로의 이름 부분: 표시 이름, 없으면 키워드
    pub fn metric_name(&self) -> &str {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.keyword.trim(),
        }
    }

    /// sourcetype별 집계 여부
    pub fn groups_by_sourcetype(&self) -> bool {
        self.group_by_sourcetype.unwrap_or_else(|| {
            self.sourcetype
                .as_deref()
                .map_or(true, |st| st.trim().is_empty())
        })
    }
}

impl fmt::Display for SearchKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.keyword)?;
        for (name, value) in [
            ("host", &self.host),
            ("source", &self.source),
            ("sourcetype", &self.sourcetype),
            ("index", &self.index),
        ] {
            if let Some(v) = value {
                write!(f, " {name}={v}")?;
            }
        }
        Ok(())
    }
}
