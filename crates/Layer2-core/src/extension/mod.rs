//! # Extension Points
//!
//! 플러그인이 채우고 애플리케이션이 호출하는 이름 붙은 capability 슬롯
//!
//! ## 실행 모드
//!
//! - `execute`: 모든 핸들러를 동시에 실행하고 결과를 모음 (join)
//! - `execute_serial`: 등록 순서대로 결과를 다음 핸들러로 넘김 (파이프라인)
//!
//! ## 예시
//!
//! ```ignore
//! let registry = Arc::new(ExtensionPointRegistry::new());
//! let ep = registry.add("calc-price");
//! ep.register_fn("tax", |v| async move { Ok(v) });
//!
//! let price = registry.execute_serial("calc-price", json!(100)).await?;
//! ```

mod api;
mod point;
mod registry;

pub use api::ExtensionApi;
pub use point::{handler_fn, ExtensionHandler, ExtensionPoint, HandlerFuture, HandlerOutput};
pub use registry::ExtensionPointRegistry;
