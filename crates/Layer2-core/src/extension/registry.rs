//! Extension Point Registry - 이름 → 확장 포인트 맵

use super::point::{ExtensionHandler, ExtensionPoint, HandlerOutput};
use parking_lot::RwLock;
use pluggable_foundation::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// 확장 포인트 레지스트리
///
/// 프로세스 전체에서 공유되는 capability 이름 → [`ExtensionPoint`] 맵.
/// 이름은 불투명한 문자열로 취급하며 유일성 외에는 검증하지 않습니다.
#[derive(Debug, Default)]
pub struct ExtensionPointRegistry {
    points: RwLock<HashMap<String, Arc<ExtensionPoint>>>,
}

impl ExtensionPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // 생성 / 조회 / 제거
    // ========================================================================

    /// 확장 포인트 조회, 없으면 생성
    pub fn add(&self, name: &str) -> Arc<ExtensionPoint> {
        if let Some(point) = self.points.read().get(name) {
            return Arc::clone(point);
        }

        let mut points = self.points.write();
        let point = points.entry(name.to_string()).or_insert_with(|| {
            info!("Added extension point: {}", name);
            Arc::new(ExtensionPoint::new(name))
        });
        Arc::clone(point)
    }

    /// 확장 포인트 조회
    pub fn get(&self, name: &str) -> Option<Arc<ExtensionPoint>> {
        self.points.read().get(name).cloned()
    }

    /// 확장 포인트 제거
    pub fn remove(&self, name: &str) -> Option<Arc<ExtensionPoint>> {
        let removed = self.points.write().remove(name);
        if removed.is_some() {
            info!("Removed extension point: {}", name);
        }
        removed
    }

    /// 모든 확장 포인트 제거
    pub fn clear(&self) {
        self.points.write().clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.points.read().contains_key(name)
    }

    /// 정렬된 확장 포인트 이름 목록
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.points.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// 현재 추가된 확장 포인트들의 스냅샷
    pub fn snapshot(&self) -> HashMap<String, Arc<ExtensionPoint>> {
        self.points.read().clone()
    }

    pub fn len(&self) -> usize {
        self.points.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.read().is_empty()
    }

    // ========================================================================
    // 핸들러 등록 / 실행 (이름 기반)
    // ========================================================================

    /// 확장 포인트에 핸들러 등록 (확장 포인트가 없으면 생성)
    pub fn register(
        &self,
        point: &str,
        handler_name: impl Into<String>,
        handler: ExtensionHandler,
    ) -> Arc<ExtensionPoint> {
        let ep = self.add(point);
        ep.register(handler_name, handler);
        ep
    }

    /// 이름으로 확장 포인트를 찾아 모든 핸들러 실행
    pub async fn execute(&self, point: &str, args: Value) -> Result<Vec<HandlerOutput>> {
        let ep = self.require(point)?;
        ep.execute(args).await
    }

    /// 이름으로 확장 포인트를 찾아 핸들러를 순차 실행
    pub async fn execute_serial(&self, point: &str, input: Value) -> Result<Value> {
        let ep = self.require(point)?;
        ep.execute_serial(input).await
    }

    fn require(&self, point: &str) -> Result<Arc<ExtensionPoint>> {
        self.get(point).ok_or_else(|| {
            debug!("Extension point not found: {}", point);
            Error::ExtensionPointNotFound(point.to_string())
        })
    }
}


