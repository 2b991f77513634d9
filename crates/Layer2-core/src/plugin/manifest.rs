//! Plugin Manifest - 플러그인 정적 기술서

use pluggable_foundation::{Error, Result};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// 플러그인 매니페스트
///
/// 런타임은 매니페스트를 소유하지 않습니다. 등록 시 읽어서
/// 활성화 레코드를 만드는 입력으로만 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    /// 고유 플러그인 이름
    pub name: String,

    /// Importer에 그대로 전달되는 위치 (불투명 문자열)
    pub url: String,

    /// 관심 있는 활성화 포인트들 (비어 있으면 등록 실패)
    #[serde(default)]
    pub activation_points: Vec<String>,

    /// 활성 상태 여부
    #[serde(default = "default_true")]
    pub active: bool,

    /// 버전 (정보용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// 설명 (정보용)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PluginManifest {
    /// 새 매니페스트 생성
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            activation_points: vec![],
            active: true,
            version: None,
            description: None,
        }
    }

    /// 빌더 패턴: 활성화 포인트 추가
    pub fn with_activation_point(mut self, point: impl Into<String>) -> Self {
        self.activation_points.push(point.into());
        self
    }

    /// 빌더 패턴: 활성화 포인트 목록 설정
    pub fn with_activation_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activation_points = points.into_iter().map(Into::into).collect();
        self
    }

    /// 빌더 패턴: 활성 상태 설정
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// 빌더 패턴: 버전 설정
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// 빌더 패턴: 설명 설정
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// 등록 전 검증
    pub fn validate(&self) -> Result<()> {
        if self.activation_points.is_empty() {
            return Err(Error::invalid_manifest(&self.name));
        }
        Ok(())
    }

    /// JSON 배열에서 매니페스트 목록 파싱
    pub fn parse_list(json: &str) -> Result<Vec<PluginManifest>> {
        Ok(serde_json::from_str(json)?)
    }
}


