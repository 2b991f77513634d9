//! Activation Manager - 활성화 포인트 트리거 및 플러그인 호출

use super::config::RuntimeConfig;
use super::events::{EventBus, EventKind, RuntimeEvent};
use super::manifest::PluginManifest;
use super::registry::{ActivationRecord, ActivationRegistry};
use super::traits::ActivationArgs;
use crate::extension::{ExtensionApi, ExtensionPointRegistry};
use parking_lot::RwLock;
use pluggable_foundation::{Error, PresetMode, Result};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

const EVENT_SOURCE: &str = "activation_manager";

/// 활성화 매니저 - 런타임 전체 관리
///
/// 호스트가 한 번 생성해서 참조로 넘겨 사용합니다.
pub struct ActivationManager {
    /// 활성화 레코드 저장소
    activations: Arc<ActivationRegistry>,

    /// 확장 포인트 레지스트리
    extensions: Arc<ExtensionPointRegistry>,

    /// `setup()`으로 설치된 설정
    config: RwLock<Option<RuntimeConfig>>,

    /// 이벤트 버스
    event_bus: Arc<EventBus>,
}

impl ActivationManager {
    /// 새 매니저 생성
    pub fn new() -> Self {
        Self::with_registries(
            Arc::new(ActivationRegistry::new()),
            Arc::new(ExtensionPointRegistry::new()),
        )
    }

    /// 기존 레지스트리들과 함께 생성
    pub fn with_registries(
        activations: Arc<ActivationRegistry>,
        extensions: Arc<ExtensionPointRegistry>,
    ) -> Self {
        Self {
            activations,
            extensions,
            config: RwLock::new(None),
            event_bus: Arc::new(EventBus::new()),
        }
    }

    /// 빌더 패턴: 이벤트 버스 지정
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = event_bus;
        self
    }

    // ========================================================================
    // 설정
    // ========================================================================

    /// 런타임 설정 설치 (이전 설정은 통째로 교체)
    pub fn setup(&self, config: RuntimeConfig) {
        let preset = config.preset();
        *self.config.write() = Some(config);

        info!("Activation runtime configured (preset: {})", preset);
        self.publish(
            EventKind::RuntimeConfigured,
            json!({ "preset": preset.to_string() }),
        );
    }

    pub fn is_configured(&self) -> bool {
        self.config.read().is_some()
    }

    /// 현재 설정된 인자 모드
    pub fn preset_mode(&self) -> Option<PresetMode> {
        self.config.read().as_ref().map(RuntimeConfig::preset)
    }

    // ========================================================================
    // 매니페스트 등록 / 제거
    // ========================================================================

    /// 플러그인 매니페스트 등록
    pub fn register(&self, manifest: &PluginManifest) -> Result<usize> {
        let added = self.activations.register(manifest)?;
        self.publish(
            EventKind::PluginRegistered,
            json!({ "plugin": manifest.name, "added": added }),
        );
        Ok(added)
    }

    /// 활성 상태인 매니페스트만 등록하고 등록된 플러그인 수를 반환
    pub fn register_active<'a, I>(&self, manifests: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a PluginManifest>,
    {
        let mut count = 0;
        for manifest in manifests {
            if !manifest.active {
                debug!("Skipping inactive plugin: {}", manifest.name);
                continue;
            }
            self.register(manifest)?;
            count += 1;
        }
        Ok(count)
    }

    /// 플러그인의 모든 레코드 제거. `None`이면 아무것도 하지 않음
    pub fn remove(&self, plugin: Option<&str>) -> usize {
        let removed = self.activations.remove(plugin);
        if let (Some(plugin), true) = (plugin, removed > 0) {
            self.publish(
                EventKind::PluginRemoved,
                json!({ "plugin": plugin, "removed": removed }),
            );
        }
        removed
    }

    /// 모든 레코드 제거
    pub fn clear(&self) -> usize {
        let removed = self.activations.clear();
        info!("Cleared activation registry ({} record(s))", removed);
        self.publish(EventKind::RegistryCleared, json!({ "removed": removed }));
        removed
    }

    /// 등록 순서대로 레코드 스냅샷
    pub fn records(&self) -> Vec<ActivationRecord> {
        self.activations.get()
    }

    // ========================================================================
    // 트리거
    // ========================================================================

    /// 활성화 포인트 트리거
    ///
    /// 해당 포인트에 등록된 플러그인을 등록 순서대로 하나씩 로드하고 호출합니다.
    /// 첫 실패에서 중단하며 이후 플러그인은 호출되지 않습니다.
    /// 호출된 플러그인 수를 반환합니다.
    pub async fn trigger(&self, activation_point: &str) -> Result<usize> {
        let config = self.config.read().clone().ok_or_else(|| {
            Error::NotConfigured("setup() must install an importer before trigger".to_string())
        })?;

        let records = self.activations.records_for(activation_point);
        info!(
            "Triggering activation point {} ({} plugin(s))",
            activation_point,
            records.len()
        );
        self.publish(
            EventKind::ActivationStarted,
            json!({ "activation_point": activation_point, "plugins": records.len() }),
        );

        for record in &records {
            if let Err(e) = self.activate(&config, record).await {
                error!(
                    "Plugin {} failed on activation point {}: {}",
                    record.plugin, activation_point, e
                );
                self.publish(
                    EventKind::ActivationFailed,
                    json!({
                        "activation_point": activation_point,
                        "plugin": record.plugin,
                        "error": e.to_string(),
                    }),
                );
                return Err(e);
            }

            self.publish(
                EventKind::PluginActivated,
                json!({ "activation_point": activation_point, "plugin": record.plugin }),
            );
        }

        self.publish(
            EventKind::ActivationCompleted,
            json!({ "activation_point": activation_point, "plugins": records.len() }),
        );
        Ok(records.len())
    }

    /// 레코드 하나 활성화: import → 진입점 확인 → 호출
    async fn activate(&self, config: &RuntimeConfig, record: &ActivationRecord) -> Result<()> {
        debug!("Importing plugin {} from {}", record.plugin, record.url);

        let module = config
            .importer()
            .import(&record.url)
            .await
            .map_err(|e| match e {
                Error::Importer { .. } => e,
                other => Error::importer(&record.url, other.to_string()),
            })?;

        let entry = module
            .entry_point(&record.activation_point)
            .ok_or_else(|| {
                Error::missing_activation_handler(&record.plugin, &record.activation_point)
            })?;

        entry(self.activation_args(config.preset())).await?;

        debug!(
            "Plugin {} handled activation point {}",
            record.plugin, record.activation_point
        );
        Ok(())
    }

    /// 인자 모드에 맞는 활성화 인자 생성
    fn activation_args(&self, preset: PresetMode) -> ActivationArgs {
        match preset {
            PresetMode::ResolvedPoints => {
                ActivationArgs::ExtensionPoints(self.extensions.snapshot())
            }
            PresetMode::LiveRegistry => {
                ActivationArgs::Registry(ExtensionApi::new(Arc::clone(&self.extensions)))
            }
            PresetMode::Nothing => ActivationArgs::None,
        }
    }

    // ========================================================================
    // 접근자
    // ========================================================================

    /// 활성화 레지스트리 접근
    pub fn activations(&self) -> &Arc<ActivationRegistry> {
        &self.activations
    }

    /// 확장 포인트 레지스트리 접근
    pub fn extensions(&self) -> &Arc<ExtensionPointRegistry> {
        &self.extensions
    }

    /// 이벤트 버스 접근
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    fn publish(&self, kind: EventKind, data: serde_json::Value) {
        self.event_bus
            .publish(RuntimeEvent::new(kind, data, EVENT_SOURCE));
    }
}

impl Default for ActivationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::importer::StaticImporter;
    use crate::plugin::traits::{PluginExports, PluginModule};

    fn recording_module(
        log: Arc<parking_lot::Mutex<Vec<String>>>,
        tag: &str,
        point: &str,
    ) -> Arc<dyn PluginModule> {
        let entry = format!("{}-{}", tag, point);
        Arc::new(PluginExports::new().with_entry(point, move |_| {
            let log = Arc::clone(&log);
            let entry = entry.clone();
            async move {
                log.lock().push(entry);
                Ok(())
            }
        }))
    }

    #[tokio::test]
    async fn test_trigger_before_setup_fails() {
        let manager = ActivationManager::new();
        let err = manager.trigger("init").await.unwrap_err();
        assert!(matches!(err, Error::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_trigger_without_records_is_ok() {
        let manager = ActivationManager::new();
        manager.setup(RuntimeConfig::new(Arc::new(StaticImporter::new())));
        assert_eq!(manager.trigger("init").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_active_skips_inactive() {
        let manager = ActivationManager::new();
        let manifests = vec![
            PluginManifest::new("on", "p-on").with_activation_point("init"),
            PluginManifest::new("off", "p-off")
                .with_activation_point("init")
                .with_active(false),
        ];

        assert_eq!(manager.register_active(&manifests).unwrap(), 1);
        assert_eq!(manager.activations().plugins(), vec!["on"]);
    }

    #[tokio::test]
    async fn test_trigger_publishes_events() {
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let importer = StaticImporter::new()
            .with_module("p1", recording_module(Arc::clone(&log), "plugin1", "init"));

        let manager = ActivationManager::new();
        manager.setup(RuntimeConfig::new(Arc::new(importer)));
        manager
            .register(&PluginManifest::new("plugin1", "p1").with_activation_point("init"))
            .unwrap();

        assert_eq!(manager.trigger("init").await.unwrap(), 1);
        assert_eq!(*log.lock(), vec!["plugin1-init"]);

        let bus = manager.event_bus();
        assert_eq!(bus.history_by_kind(EventKind::PluginActivated).len(), 1);
        assert_eq!(bus.history_by_kind(EventKind::ActivationCompleted).len(), 1);
    }

    #[tokio::test]
    async fn test_importer_failure_rejects_trigger() {
        let manager = ActivationManager::new();
        manager.setup(RuntimeConfig::new(Arc::new(StaticImporter::new())));
        manager
            .register(&PluginManifest::new("ghost", "nowhere").with_activation_point("init"))
            .unwrap();

        let err = manager.trigger("init").await.unwrap_err();
        assert!(matches!(err, Error::Importer { .. }));
        assert_eq!(
            manager
                .event_bus()
                .history_by_kind(EventKind::ActivationFailed)
                .len(),
            1
        );
    }

    #[test]
    fn test_setup_replaces_config() {
        let manager = ActivationManager::new();
        assert!(!manager.is_configured());

        manager.setup(RuntimeConfig::new(Arc::new(StaticImporter::new())));
        assert_eq!(manager.preset_mode(), Some(PresetMode::LiveRegistry));

        manager.setup(
            RuntimeConfig::new(Arc::new(StaticImporter::new())).with_preset(PresetMode::Nothing),
        );
        assert_eq!(manager.preset_mode(), Some(PresetMode::Nothing));
    }

    #[test]
    fn test_remove_and_clear_delegate() {
        let manager = ActivationManager::new();
        manager
            .register(&PluginManifest::new("a", "pa").with_activation_points(["x", "y"]))
            .unwrap();
        manager
            .register(&PluginManifest::new("b", "pb").with_activation_point("x"))
            .unwrap();

        assert_eq!(manager.remove(None), 0);
        assert_eq!(manager.remove(Some("a")), 2);
        assert_eq!(manager.records().len(), 1);
        assert_eq!(manager.clear(), 1);
        assert!(manager.records().is_empty());
    }
}
