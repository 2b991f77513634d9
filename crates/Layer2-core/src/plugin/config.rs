//! Runtime Config - `setup()`으로 설치되는 런타임 설정

use super::importer::Importer;
use pluggable_foundation::{PresetMode, RuntimeSettings};
use std::sync::Arc;

/// 런타임 설정
///
/// `setup()`을 다시 호출하면 이전 설정을 통째로 교체합니다 (병합 없음).
#[derive(Clone)]
pub struct RuntimeConfig {
    importer: Arc<dyn Importer>,
    preset: PresetMode,
}

impl RuntimeConfig {
    /// 기본 모드(LiveRegistry)로 생성
    pub fn new(importer: Arc<dyn Importer>) -> Self {
        Self {
            importer,
            preset: PresetMode::default(),
        }
    }

    /// 설정 파일 값으로 생성
    pub fn from_settings(importer: Arc<dyn Importer>, settings: &RuntimeSettings) -> Self {
        Self::new(importer).with_preset(settings.preset_mode())
    }

    /// 빌더 패턴: 인자 모드 설정
    pub fn with_preset(mut self, preset: PresetMode) -> Self {
        self.preset = preset;
        self
    }

    pub fn importer(&self) -> &Arc<dyn Importer> {
        &self.importer
    }

    pub fn preset(&self) -> PresetMode {
        self.preset
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("preset", &self.preset)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::importer::StaticImporter;

    #[test]
    fn test_default_preset_is_live_registry() {
        let config = RuntimeConfig::new(Arc::new(StaticImporter::new()));
        assert_eq!(config.preset(), PresetMode::LiveRegistry);
    }

    #[test]
    fn test_from_settings() {
        let settings = RuntimeSettings::new().with_preset_mode(PresetMode::Nothing);
        let config = RuntimeConfig::from_settings(Arc::new(StaticImporter::new()), &settings);
        assert_eq!(config.preset(), PresetMode::Nothing);
    }
}
