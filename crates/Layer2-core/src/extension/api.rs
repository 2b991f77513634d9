//! Extension API - 활성화 중인 플러그인에 주입되는 라이브 레지스트리 핸들

use super::point::{handler_fn, ExtensionHandler, ExtensionPoint, HandlerOutput};
use super::registry::ExtensionPointRegistry;
use pluggable_foundation::Result;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// 라이브 확장 API
///
/// 플러그인은 활성화 도중 새 확장 포인트를 게시하고,
/// 이미 있는 확장 포인트를 바로 실행할 수 있습니다.
#[derive(Debug, Clone)]
pub struct ExtensionApi {
    registry: Arc<ExtensionPointRegistry>,
}

impl ExtensionApi {
    pub fn new(registry: Arc<ExtensionPointRegistry>) -> Self {
        Self { registry }
    }

    /// 확장 포인트 조회, 없으면 생성
    pub fn add(&self, point: &str) -> Arc<ExtensionPoint> {
        self.registry.add(point)
    }

    pub fn get(&self, point: &str) -> Option<Arc<ExtensionPoint>> {
        self.registry.get(point)
    }

    /// 확장 포인트에 핸들러 등록
    pub fn register(
        &self,
        point: &str,
        handler_name: impl Into<String>,
        handler: ExtensionHandler,
    ) -> Arc<ExtensionPoint> {
        self.registry.register(point, handler_name, handler)
    }

    /// async 클로저로 핸들러 등록
    pub fn register_fn<F, Fut>(
        &self,
        point: &str,
        handler_name: impl Into<String>,
        f: F,
    ) -> Arc<ExtensionPoint>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.register(point, handler_name, handler_fn(f))
    }

    pub async fn execute(&self, point: &str, args: Value) -> Result<Vec<HandlerOutput>> {
        self.registry.execute(point, args).await
    }

    pub async fn execute_serial(&self, point: &str, input: Value) -> Result<Value> {
        self.registry.execute_serial(point, input).await
    }
}


