//! Runtime Settings - 플러그인 런타임 설정
//!
//! 글로벌(~/.config/pluggable/) + 프로젝트(.pluggable/) 설정을 병합 로드

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// 설정 파일명
pub const SETTINGS_FILE: &str = "settings.json";

/// 기본 이벤트 히스토리 크기
pub const DEFAULT_EVENT_HISTORY_SIZE: usize = 100;

/// 기본 시작 활성화 포인트
pub const DEFAULT_STARTUP_ACTIVATION_POINT: &str = "init";

// ============================================================================
// PresetMode - 활성화 함수에 주입할 인자 모드
// ============================================================================

/// 활성화 함수 호출 시 어떤 인자를 넘길지 결정하는 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetMode {
    /// 이미 추가된 확장 포인트들의 스냅샷 맵
    ResolvedPoints,

    /// register / execute / execute_serial 을 제공하는 라이브 API
    #[default]
    LiveRegistry,

    /// 인자 없음 (순수 라이프사이클 훅)
    Nothing,
}

impl std::fmt::Display for PresetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResolvedPoints => write!(f, "resolved_points"),
            Self::LiveRegistry => write!(f, "live_registry"),
            Self::Nothing => write!(f, "nothing"),
        }
    }
}

impl std::str::FromStr for PresetMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "resolved_points" | "resolved" | "true" => Ok(Self::ResolvedPoints),
            "live_registry" | "live" | "false" => Ok(Self::LiveRegistry),
            "nothing" | "none" | "null" => Ok(Self::Nothing),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown preset mode: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// RuntimeSettings
// ============================================================================

/// 플러그인 런타임 설정
///
/// 모든 필드는 선택적이며, 지정되지 않으면 기본값을 사용합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSettings {
    /// 활성화 인자 모드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_extension_points: Option<PresetMode>,

    /// 호스트 시작 시 트리거할 활성화 포인트들
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_activation_points: Option<Vec<String>>,

    /// 런타임 이벤트 히스토리 크기
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_history_size: Option<usize>,

    /// 플러그인 매니페스트 목록 파일 (JSON 배열)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_file: Option<PathBuf>,
}

impl RuntimeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드 (프로젝트 우선)
    pub fn load() -> Result<Self> {
        let mut settings = Self::new();
        for store in JsonStore::layered()? {
            if let Some(layer) = store.load_optional::<RuntimeSettings>(SETTINGS_FILE)? {
                debug!(
                    "Loaded {:?} settings from {}",
                    store.scope(),
                    store.file_path(SETTINGS_FILE).display()
                );
                settings.merge(layer);
            }
        }
        Ok(settings)
    }

    /// 특정 저장소에서 로드 (없으면 기본값)
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        Ok(store
            .load_optional::<RuntimeSettings>(SETTINGS_FILE)?
            .unwrap_or_default())
    }

    /// 특정 저장소에 저장
    pub fn save_to(&self, store: &JsonStore) -> Result<()> {
        store.save(SETTINGS_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: RuntimeSettings) {
        if other.preset_extension_points.is_some() {
            self.preset_extension_points = other.preset_extension_points;
        }
        if other.startup_activation_points.is_some() {
            self.startup_activation_points = other.startup_activation_points;
        }
        if other.event_history_size.is_some() {
            self.event_history_size = other.event_history_size;
        }
        if other.manifest_file.is_some() {
            self.manifest_file = other.manifest_file;
        }
    }

    // ========================================================================
    // 유효 값 (기본값 적용)
    // ========================================================================

    pub fn preset_mode(&self) -> PresetMode {
        self.preset_extension_points.unwrap_or_default()
    }

    pub fn startup_points(&self) -> Vec<String> {
        self.startup_activation_points
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_STARTUP_ACTIVATION_POINT.to_string()])
    }

    pub fn history_size(&self) -> usize {
        self.event_history_size.unwrap_or(DEFAULT_EVENT_HISTORY_SIZE)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_preset_mode(mut self, mode: PresetMode) -> Self {
        self.preset_extension_points = Some(mode);
        self
    }

    pub fn with_startup_points(mut self, points: Vec<String>) -> Self {
        self.startup_activation_points = Some(points);
        self
    }

    pub fn with_manifest_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_file = Some(path.into());
        self
    }
}


