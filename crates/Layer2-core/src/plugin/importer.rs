//! Importer - 플러그인 url을 로드된 모듈로 바꾸는 주입 capability
//!
//! 런타임은 로딩 방식을 고정하지 않습니다. 정적 링크([`StaticImporter`]),
//! 임의의 async 함수([`FnImporter`]) 또는 호스트가 구현한 [`Importer`]를 사용합니다.

use super::traits::PluginModule;
use async_trait::async_trait;
use parking_lot::RwLock;
use pluggable_foundation::{Error, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// 플러그인 모듈 로더
#[async_trait]
pub trait Importer: Send + Sync {
    /// 매니페스트의 `url`로 모듈을 로드
    async fn import(&self, url: &str) -> Result<Arc<dyn PluginModule>>;
}

// ============================================================================
// StaticImporter - 컴파일타임에 링크된 모듈
// ============================================================================

/// url → 미리 링크된 모듈 맵
#[derive(Default)]
pub struct StaticImporter {
    modules: RwLock<HashMap<String, Arc<dyn PluginModule>>>,
}

impl StaticImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 패턴: 모듈 추가
    pub fn with_module(self, url: impl Into<String>, module: Arc<dyn PluginModule>) -> Self {
        self.insert(url, module);
        self
    }

    /// 모듈 추가 (같은 url이면 교체)
    pub fn insert(&self, url: impl Into<String>, module: Arc<dyn PluginModule>) {
        self.modules.write().insert(url.into(), module);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.modules.read().contains_key(url)
    }

    /// 정렬된 url 목록
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.modules.read().keys().cloned().collect();
        urls.sort();
        urls
    }
}

#[async_trait]
impl Importer for StaticImporter {
    async fn import(&self, url: &str) -> Result<Arc<dyn PluginModule>> {
        debug!("Importing statically linked module: {}", url);
        self.modules
            .read()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::importer(url, "no module is linked for this url"))
    }
}

impl std::fmt::Debug for StaticImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticImporter")
            .field("urls", &self.urls())
            .finish()
    }
}

// ============================================================================
// FnImporter - async 함수 어댑터
// ============================================================================

/// async 함수를 [`Importer`]로 감싸는 어댑터
pub struct FnImporter<F> {
    f: F,
}

impl<F> FnImporter<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Importer for FnImporter<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn PluginModule>>> + Send + 'static,
{
    async fn import(&self, url: &str) -> Result<Arc<dyn PluginModule>> {
        (self.f)(url.to_string()).await
    }
}

/// async 함수를 `Arc<dyn Importer>`로 변환
pub fn importer_fn<F, Fut>(f: F) -> Arc<dyn Importer>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn PluginModule>>> + Send + 'static,
{
    Arc::new(FnImporter::new(f))
}


