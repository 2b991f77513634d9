//! Activation Registry - 플러그인 × 활성화 포인트 레코드 저장소

use super::manifest::PluginManifest;
use parking_lot::RwLock;
use pluggable_foundation::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 활성화 레코드 - 플러그인 하나가 활성화 포인트 하나에 관심을 등록한 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    /// 플러그인 이름
    pub plugin: String,

    /// Importer에 전달할 url
    pub url: String,

    /// 활성화 포인트 이름
    pub activation_point: String,

    /// 실행 여부 (현재는 기록용, 트리거를 막지 않음)
    pub activated: bool,
}

impl ActivationRecord {
    fn new(manifest: &PluginManifest, activation_point: &str) -> Self {
        Self {
            plugin: manifest.name.clone(),
            url: manifest.url.clone(),
            activation_point: activation_point.to_string(),
            activated: false,
        }
    }

    fn matches(&self, plugin: &str, activation_point: &str) -> bool {
        self.plugin == plugin && self.activation_point == activation_point
    }
}

/// 활성화 레지스트리
///
/// 등록 순서가 그대로 트리거 순서가 됩니다. 제거는 남은 레코드의 순서를 바꾸지 않습니다.
/// `get()`은 복제본을 반환하므로 호출자가 내부 상태를 바꿀 수 없습니다.
#[derive(Debug, Default)]
pub struct ActivationRegistry {
    records: RwLock<Vec<ActivationRecord>>,
}

impl ActivationRegistry {
    /// 새 레지스트리 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 매니페스트 등록
    ///
    /// 아직 없는 `(plugin, activation_point)` 쌍에 대해서만 레코드를 추가하고,
    /// 추가된 레코드 수를 반환합니다. 검증에 실패하면 레지스트리는 변경되지 않습니다.
    pub fn register(&self, manifest: &PluginManifest) -> Result<usize> {
        manifest.validate()?;

        let mut records = self.records.write();
        let mut added = 0;

        for point in &manifest.activation_points {
            if records.iter().any(|r| r.matches(&manifest.name, point)) {
                debug!(
                    "Plugin {} already registered for activation point {}",
                    manifest.name, point
                );
                continue;
            }
            records.push(ActivationRecord::new(manifest, point));
            added += 1;
        }

        info!(
            "Registered plugin {} ({} new activation point(s))",
            manifest.name, added
        );
        Ok(added)
    }

    /// 플러그인의 모든 레코드 제거. `None`이면 아무것도 하지 않음
    pub fn remove(&self, plugin: Option<&str>) -> usize {
        let Some(plugin) = plugin else {
            return 0;
        };

        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.plugin != plugin);
        let removed = before - records.len();

        if removed > 0 {
            info!("Removed plugin {} ({} record(s))", plugin, removed);
        }
        removed
    }

    /// 모든 레코드 제거
    pub fn clear(&self) -> usize {
        let mut records = self.records.write();
        let removed = records.len();
        records.clear();
        removed
    }

    /// 등록 순서대로 모든 레코드의 스냅샷
    pub fn get(&self) -> Vec<ActivationRecord> {
        self.records.read().clone()
    }

    /// 특정 활성화 포인트의 레코드 (등록 순서)
    pub fn records_for(&self, activation_point: &str) -> Vec<ActivationRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.activation_point == activation_point)
            .cloned()
            .collect()
    }

    /// 처음 등록된 순서대로 플러그인 이름 목록 (중복 없음)
    pub fn plugins(&self) -> Vec<String> {
        let records = self.records.read();
        let mut plugins: Vec<String> = Vec::new();
        for record in records.iter() {
            if !plugins.contains(&record.plugin) {
                plugins.push(record.plugin.clone());
            }
        }
        plugins
    }

    pub fn contains(&self, plugin: &str, activation_point: &str) -> bool {
        self.records
            .read()
            .iter()
            .any(|r| r.matches(plugin, activation_point))
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pluggable_foundation::Error;

    fn manifest(name: &str, url: &str, points: &[&str]) -> PluginManifest {
        PluginManifest::new(name, url).with_activation_points(points.iter().copied())
    }

    fn pairs(registry: &ActivationRegistry) -> Vec<(String, String)> {
        registry
            .get()
            .into_iter()
            .map(|r| (r.plugin, r.activation_point))
            .collect()
    }

    #[test]
    fn test_register_one_record_per_point() {
        let registry = ActivationRegistry::new();
        let added = registry
            .register(&manifest("plugin1", "p1", &["ap1", "ap2"]))
            .unwrap();

        assert_eq!(added, 2);
        let records = registry.get();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.activated && r.url == "p1"));
    }

    #[test]
    fn test_reregister_appends_only_new_points() {
        let registry = ActivationRegistry::new();
        registry.register(&manifest("plugin1", "p1", &["ap1"])).unwrap();
        registry.register(&manifest("plugin2", "p2", &["ap1"])).unwrap();
        let added = registry
            .register(&manifest("plugin1", "p1", &["ap1", "ap3"]))
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(
            pairs(&registry),
            vec![
                ("plugin1".to_string(), "ap1".to_string()),
                ("plugin2".to_string(), "ap1".to_string()),
                ("plugin1".to_string(), "ap3".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_points_in_one_manifest_collapse() {
        let registry = ActivationRegistry::new();
        registry
            .register(&manifest("plugin1", "p1", &["ap1", "ap1"]))
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_without_points_fails_and_does_not_mutate() {
        let registry = ActivationRegistry::new();
        registry.register(&manifest("plugin1", "p1", &["ap1"])).unwrap();

        let err = registry
            .register(&manifest("plugin2", "p2", &[]))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidManifest { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_only_named_plugin_and_keeps_order() {
        let registry = ActivationRegistry::new();
        registry.register(&manifest("plugin1", "p1", &["ap1"])).unwrap();
        registry.register(&manifest("plugin2", "p2", &["ap1", "ap2"])).unwrap();
        registry.register(&manifest("plugin3", "p3", &["ap2"])).unwrap();

        assert_eq!(registry.remove(Some("plugin2")), 2);
        assert_eq!(registry.plugins(), vec!["plugin1", "plugin3"]);
    }

    #[test]
    fn test_remove_none_is_noop_but_clear_empties() {
        let registry = ActivationRegistry::new();
        registry.register(&manifest("plugin1", "p1", &["ap1"])).unwrap();

        assert_eq!(registry.remove(None), 0);
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.clear(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_does_not_leak_mutation() {
        let registry = ActivationRegistry::new();
        registry.register(&manifest("plugin1", "p1", &["ap1"])).unwrap();

        let mut snapshot = registry.get();
        snapshot[0].activated = true;
        snapshot.clear();

        assert_eq!(registry.len(), 1);
        assert!(!registry.get()[0].activated);
    }

    #[test]
    fn test_records_for_filters_by_point() {
        let registry = ActivationRegistry::new();
        registry.register(&manifest("plugin1", "p1", &["ap1"])).unwrap();
        registry.register(&manifest("plugin2", "p2", &["ap2"])).unwrap();
        registry.register(&manifest("plugin3", "p3", &["ap1", "ap2"])).unwrap();

        let plugins: Vec<String> = registry
            .records_for("ap1")
            .into_iter()
            .map(|r| r.plugin)
            .collect();
        assert_eq!(plugins, vec!["plugin1", "plugin3"]);
        assert!(registry.contains("plugin3", "ap2"));
        assert!(!registry.contains("plugin1", "ap2"));
    }
}
