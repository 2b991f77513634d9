//! pluggable-core: Activation & Extension Runtime
//!
//! Layer2 - 플러그인 활성화 및 확장 포인트 레이어
//!
//! # 주요 모듈
//!
//! - `plugin`: 활성화 레지스트리, Importer, 활성화 매니저
//! - `extension`: 이름 있는 확장 포인트와 핸들러 실행
//!
//! # 사용 예시
//!
//! ```ignore
//! use pluggable_core::{ActivationManager, PluginExports, RuntimeConfig, StaticImporter};
//!
//! let importer = StaticImporter::new().with_module(
//!     "builtin://greeter",
//!     Arc::new(PluginExports::new().with_entry("init", |args| async move {
//!         if let Some(api) = args.registry() {
//!             api.register_fn("greet", "greeter", |name| async move {
//!                 Ok(json!(format!("hello {}", name)))
//!             });
//!         }
//!         Ok(())
//!     })),
//! );
//!
//! let manager = ActivationManager::new();
//! manager.setup(RuntimeConfig::new(Arc::new(importer)));
//! manager.register(&PluginManifest::new("greeter", "builtin://greeter")
//!     .with_activation_point("init"))?;
//! manager.trigger("init").await?;
//!
//! let outputs = manager.extensions().execute("greet", json!("world")).await?;
//! ```

pub mod extension;
pub mod plugin;

// Re-exports: Extension
pub use extension::{
    handler_fn, ExtensionApi, ExtensionHandler, ExtensionPoint, ExtensionPointRegistry,
    HandlerFuture, HandlerOutput,
};

// Re-exports: Plugin
pub use plugin::{
    // Importer
    importer_fn,
    // Manager
    ActivationArgs,
    ActivationManager,
    // Registry
    ActivationRecord,
    ActivationRegistry,
    // Events
    EventBus,
    EventKind,
    FnImporter,
    Importer,
    // Module
    PluginExports,
    // Manifest
    PluginManifest,
    PluginModule,
    RuntimeConfig,
    RuntimeEvent,
    StaticImporter,
};

// Layer1 re-exports
pub use pluggable_foundation::{Error, PresetMode, Result, RuntimeSettings};

/// Layer2 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


