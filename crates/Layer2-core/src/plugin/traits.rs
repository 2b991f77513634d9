//! Plugin traits - 플러그인 모듈 인터페이스

use crate::extension::{ExtensionApi, ExtensionPoint};
use futures::future::BoxFuture;
use pluggable_foundation::{PresetMode, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

// ============================================================================
// ActivationArgs - 활성화 함수에 주입되는 인자
// ============================================================================

/// 활성화 함수 인자
///
/// [`PresetMode`]마다 정확히 한 가지 형태로 대응합니다.
#[derive(Debug, Clone)]
pub enum ActivationArgs {
    /// 호출 시점에 이미 추가된 확장 포인트들의 스냅샷
    ExtensionPoints(HashMap<String, Arc<ExtensionPoint>>),

    /// 라이브 레지스트리 API
    Registry(ExtensionApi),

    /// 인자 없음
    None,
}

impl ActivationArgs {
    /// 이 인자를 만든 모드
    pub fn mode(&self) -> PresetMode {
        match self {
            Self::ExtensionPoints(_) => PresetMode::ResolvedPoints,
            Self::Registry(_) => PresetMode::LiveRegistry,
            Self::None => PresetMode::Nothing,
        }
    }

    pub fn extension_points(&self) -> Option<&HashMap<String, Arc<ExtensionPoint>>> {
        match self {
            Self::ExtensionPoints(points) => Some(points),
            _ => None,
        }
    }

    pub fn registry(&self) -> Option<&ExtensionApi> {
        match self {
            Self::Registry(api) => Some(api),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// ============================================================================
// EntryPoint / PluginModule
// ============================================================================

/// 활성화 함수가 반환하는 Future
pub type EntryFuture = BoxFuture<'static, Result<()>>;

/// 활성화 포인트 이름으로 찾아지는 진입점
pub type EntryPoint = Arc<dyn Fn(ActivationArgs) -> EntryFuture + Send + Sync>;

/// async 클로저를 [`EntryPoint`]로 변환
pub fn entry_fn<F, Fut>(f: F) -> EntryPoint
where
    F: Fn(ActivationArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

/// 로드된 플러그인 모듈
///
/// Importer가 반환하는 객체. 활성화 포인트 이름으로 진입점을 찾을 수 없으면
/// 런타임은 이를 별도의 에러로 보고합니다.
pub trait PluginModule: Send + Sync {
    /// 활성화 포인트 이름에 해당하는 진입점
    fn entry_point(&self, name: &str) -> Option<EntryPoint>;

    /// 모듈이 내보내는 진입점 이름들 (진단용)
    fn entry_names(&self) -> Vec<String> {
        vec![]
    }
}

// ============================================================================
// PluginExports - 기본 모듈 구현
// ============================================================================

/// 이름 → 진입점 맵으로 구성된 플러그인 모듈
#[derive(Default, Clone)]
pub struct PluginExports {
    entries: HashMap<String, EntryPoint>,
}

impl PluginExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 패턴: async 클로저 진입점 추가
    pub fn with_entry<F, Fut>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(ActivationArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.entries.insert(name.into(), entry_fn(f));
        self
    }

    /// 진입점 추가 (같은 이름이면 교체)
    pub fn insert(&mut self, name: impl Into<String>, entry: EntryPoint) {
        self.entries.insert(name.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PluginModule for PluginExports {
    fn entry_point(&self, name: &str) -> Option<EntryPoint> {
        self.entries.get(name).cloned()
    }

    fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for PluginExports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginExports")
            .field("entries", &self.entry_names())
            .finish()
    }
}


