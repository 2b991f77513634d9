//! Extension Point - 이름 붙은 단일 확장 슬롯

use futures::future::{join_all, BoxFuture};
use parking_lot::RwLock;
use pluggable_foundation::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// 핸들러 타입
// ============================================================================

/// 핸들러가 반환하는 Future
pub type HandlerFuture = BoxFuture<'static, Result<Value>>;

/// 확장 포인트 핸들러 (비동기)
pub type ExtensionHandler = Arc<dyn Fn(Value) -> HandlerFuture + Send + Sync>;

/// async 클로저를 [`ExtensionHandler`]로 변환
pub fn handler_fn<F, Fut>(f: F) -> ExtensionHandler
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

/// `execute` 결과 - 핸들러 하나의 출력
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerOutput {
    /// 핸들러 이름
    pub handler: String,

    /// 반환 값
    pub value: Value,
}

// ============================================================================
// ExtensionPoint
// ============================================================================

/// 확장 포인트
///
/// 플러그인이 등록한 핸들러들을 등록 순서대로 보관합니다.
/// 같은 이름으로 다시 등록하면 기존 핸들러를 같은 자리에서 교체합니다.
pub struct ExtensionPoint {
    name: String,
    handlers: RwLock<Vec<(String, ExtensionHandler)>>,
}

impl ExtensionPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // 등록 / 해제
    // ========================================================================

    /// 핸들러 등록. 기존 핸들러를 교체했으면 `true`
    pub fn register(&self, handler_name: impl Into<String>, handler: ExtensionHandler) -> bool {
        let handler_name = handler_name.into();
        let mut handlers = self.handlers.write();

        if let Some(slot) = handlers.iter_mut().find(|(name, _)| *name == handler_name) {
            debug!("[{}] Replacing handler: {}", self.name, handler_name);
            slot.1 = handler;
            return true;
        }

        debug!("[{}] Registered handler: {}", self.name, handler_name);
        handlers.push((handler_name, handler));
        false
    }

    /// async 클로저로 핸들러 등록
    pub fn register_fn<F, Fut>(&self, handler_name: impl Into<String>, f: F) -> bool
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.register(handler_name, handler_fn(f))
    }

    /// 핸들러 해제
    pub fn unregister(&self, handler_name: &str) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(name, _)| name != handler_name);
        before != handlers.len()
    }

    /// 모든 핸들러 제거
    pub fn clear(&self) {
        self.handlers.write().clear();
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 등록 순서대로 핸들러 이름 목록
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .read()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn contains(&self, handler_name: &str) -> bool {
        self.handlers
            .read()
            .iter()
            .any(|(name, _)| name == handler_name)
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// 실행용 스냅샷. 락을 잡은 채로 await 하지 않기 위해 복제
    fn snapshot(&self) -> Vec<(String, ExtensionHandler)> {
        self.handlers.read().clone()
    }

    // ========================================================================
    // 실행
    // ========================================================================

    /// 모든 핸들러를 같은 인자로 동시에 실행하고 전부 끝날 때까지 대기
    ///
    /// 결과는 등록 순서를 따릅니다. 실패한 핸들러가 있으면 모든 핸들러가
    /// 끝난 뒤 등록 순서상 첫 번째 실패를 반환합니다.
    pub async fn execute(&self, args: Value) -> Result<Vec<HandlerOutput>> {
        let handlers = self.snapshot();
        debug!("[{}] Executing {} handler(s)", self.name, handlers.len());

        let futures = handlers.iter().map(|(_, handler)| handler(args.clone()));
        let results = join_all(futures).await;

        handlers
            .into_iter()
            .zip(results)
            .map(|((handler, _), result)| match result {
                Ok(value) => Ok(HandlerOutput { handler, value }),
                Err(e) => Err(Error::handler_failed(&self.name, handler, e)),
            })
            .collect()
    }

    /// 핸들러를 등록 순서대로 하나씩 실행 (파이프라인)
    ///
    /// 첫 핸들러는 `input`을, 이후 핸들러는 직전 핸들러의 결과를 받습니다.
    /// 핸들러가 없으면 `input`을 그대로 반환합니다.
    pub async fn execute_serial(&self, input: Value) -> Result<Value> {
        let handlers = self.snapshot();
        debug!("[{}] Executing {} handler(s) serially", self.name, handlers.len());

        let mut value = input;
        for (name, handler) in handlers {
            value = handler(value)
                .await
                .map_err(|e| Error::handler_failed(&self.name, name, e))?;
        }

        Ok(value)
    }
}

impl std::fmt::Debug for ExtensionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionPoint")
            .field("name", &self.name)
            .field("handlers", &self.handler_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_execute_collects_in_registration_order() {
        let ep = ExtensionPoint::new("display-img");
        ep.register_fn("slow", |args| async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(json!({ "slow": args }))
        });
        ep.register_fn("fast", |args| async move { Ok(json!({ "fast": args })) });

        let outputs = ep.execute(json!(1)).await.unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].handler, "slow");
        assert_eq!(outputs[0].value, json!({ "slow": 1 }));
        assert_eq!(outputs[1].handler, "fast");
    }

    #[tokio::test]
    async fn test_execute_runs_handlers_concurrently() {
        let ep = ExtensionPoint::new("sync-store");
        let barrier = Arc::new(tokio::sync::Barrier::new(2));

        for name in ["left", "right"] {
            let barrier = Arc::clone(&barrier);
            ep.register_fn(name, move |args| {
                let barrier = Arc::clone(&barrier);
                async move {
                    // 두 핸들러가 동시에 진행 중일 때만 통과
                    barrier.wait().await;
                    Ok(args)
                }
            });
        }

        let outputs = tokio::time::timeout(Duration::from_secs(5), ep.execute(json!("x")))
            .await
            .expect("handlers did not overlap")
            .unwrap();
        assert_eq!(outputs.len(), 2);
    }

    #[tokio::test]
    async fn test_handler_may_register_during_execute() {
        let ep = Arc::new(ExtensionPoint::new("extend-menu"));

        let target = Arc::clone(&ep);
        ep.register_fn("self", move |args| {
            target.register_fn("late", |v| async move { Ok(v) });
            async move { Ok(args) }
        });

        let first = ep.execute(json!(1)).await.unwrap();
        assert_eq!(first.len(), 1);

        let second = ep.execute(json!(2)).await.unwrap();
        let names: Vec<&str> = second.iter().map(|o| o.handler.as_str()).collect();
        assert_eq!(names, vec!["self", "late"]);
    }

    #[tokio::test]
    async fn test_execute_serial_threads_results() {
        let ep = ExtensionPoint::new("calc-price");
        ep.register_fn("tax", |v| async move {
            Ok(json!(v.as_f64().unwrap_or_default() * 2.0))
        });
        ep.register_fn("discount", |v| async move {
            Ok(json!(v.as_f64().unwrap_or_default() - 5.0))
        });

        // (10 * 2) - 5
        let price = ep.execute_serial(json!(10.0)).await.unwrap();
        assert_eq!(price, json!(15.0));
    }

    #[tokio::test]
    async fn test_execute_serial_without_handlers_returns_input() {
        let ep = ExtensionPoint::new("empty");
        let value = ep.execute_serial(json!("unchanged")).await.unwrap();
        assert_eq!(value, json!("unchanged"));
        assert!(ep.execute(json!(null)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_same_name_replaces_in_place() {
        let ep = ExtensionPoint::new("menu");
        assert!(!ep.register_fn("a", |_| async { Ok(json!("a1")) }));
        ep.register_fn("b", |_| async { Ok(json!("b")) });
        assert!(ep.register_fn("a", |_| async { Ok(json!("a2")) }));

        assert_eq!(ep.handler_names(), vec!["a", "b"]);
        let outputs = ep.execute(Value::Null).await.unwrap();
        assert_eq!(outputs[0].value, json!("a2"));
    }

    #[tokio::test]
    async fn test_execute_relays_handler_error() {
        let ep = ExtensionPoint::new("store");
        ep.register_fn("ok", |_| async { Ok(json!(true)) });
        ep.register_fn("broken", |_| async { Err(Error::from("disk full")) });

        let err = ep.execute(Value::Null).await.unwrap_err();
        match err {
            Error::HandlerFailed {
                extension_point,
                handler,
                ..
            } => {
                assert_eq!(extension_point, "store");
                assert_eq!(handler, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_serial_stops_at_first_error() {
        let ep = ExtensionPoint::new("pipeline");
        let calls = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let log = Arc::clone(&calls);
        ep.register_fn("fail", move |_| {
            log.lock().push("fail");
            async { Err(Error::from("nope")) }
        });
        let log = Arc::clone(&calls);
        ep.register_fn("after", move |v| {
            log.lock().push("after");
            async move { Ok(v) }
        });

        assert!(ep.execute_serial(json!(0)).await.is_err());
        assert_eq!(*calls.lock(), vec!["fail"]);
    }

    #[test]
    fn test_unregister_and_clear() {
        let ep = ExtensionPoint::new("x");
        ep.register_fn("one", |v| async move { Ok(v) });
        ep.register_fn("two", |v| async move { Ok(v) });

        assert!(ep.unregister("one"));
        assert!(!ep.unregister("one"));
        assert_eq!(ep.len(), 1);
        assert!(ep.contains("two"));

        ep.clear();
        assert!(ep.is_empty());
    }
}
