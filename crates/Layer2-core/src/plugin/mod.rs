//! # Plugin Activation
//!
//! 활성화 포인트 기반 지연 로딩 플러그인 런타임
//!
//! ## 개요
//!
//! 플러그인은 매니페스트로 관심 있는 활성화 포인트를 선언합니다.
//! 호스트가 포인트를 트리거하면 해당 플러그인만 로드되고 호출됩니다:
//! - 매니페스트 등록 → 포인트마다 하나의 [`ActivationRecord`]
//! - `setup()`으로 [`Importer`]와 인자 모드 설치
//! - `trigger()`로 등록 순서대로 하나씩 로드 및 호출
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ActivationManager                        │
//! │  ┌──────────────────────┐   ┌────────────────────────────┐ │
//! │  │  ActivationRegistry  │   │  RuntimeConfig             │ │
//! │  │  (plugin, point) …   │   │  - Importer                │ │
//! │  └──────────────────────┘   │  - PresetMode              │ │
//! │             │               └────────────────────────────┘ │
//! │             ▼                                               │
//! │  import(url) → PluginModule → entry_point(point)(args)      │
//! │                                        │                    │
//! │                     ExtensionPointRegistry / EventBus       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 예시
//!
//! ```ignore
//! let manager = ActivationManager::new();
//! manager.setup(RuntimeConfig::new(Arc::new(importer)));
//! manager.register_active(&manifests)?;
//! manager.trigger("init").await?;
//! ```

mod config;
mod events;
mod importer;
mod manager;
mod manifest;
mod registry;
mod traits;

pub use config::RuntimeConfig;
pub use events::{EventBus, EventKind, RuntimeEvent};
pub use importer::{importer_fn, FnImporter, Importer, StaticImporter};
pub use manager::ActivationManager;
pub use manifest::PluginManifest;
pub use registry::{ActivationRecord, ActivationRegistry};
pub use traits::{entry_fn, ActivationArgs, EntryFuture, EntryPoint, PluginExports, PluginModule};
