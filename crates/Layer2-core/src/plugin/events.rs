//! Runtime Events - 활성화 런타임 이벤트 시스템

use parking_lot::Mutex;
use pluggable_foundation::config::DEFAULT_EVENT_HISTORY_SIZE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::broadcast;
use tracing::trace;

/// 브로드캐스트 채널 최대 용량 (채널 버퍼는 생성 시 전부 할당됨)
pub const MAX_CHANNEL_CAPACITY: usize = 1 << 16;

// ============================================================================
// RuntimeEvent - 런타임 이벤트 타입
// ============================================================================

/// 런타임 이벤트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeEvent {
    /// 이벤트 종류
    pub kind: EventKind,

    /// 이벤트 데이터
    pub data: Value,

    /// 타임스탬프
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// 소스 (이벤트 발생 위치)
    pub source: String,
}

impl RuntimeEvent {
    /// 새 이벤트 생성
    pub fn new(kind: EventKind, data: Value, source: impl Into<String>) -> Self {
        Self {
            kind,
            data,
            timestamp: chrono::Utc::now(),
            source: source.into(),
        }
    }

    /// 데이터 없는 이벤트 생성
    pub fn simple(kind: EventKind) -> Self {
        Self::new(kind, Value::Null, "system")
    }
}

/// 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // 레지스트리 이벤트
    PluginRegistered,
    PluginRemoved,
    RegistryCleared,

    // 설정 이벤트
    RuntimeConfigured,

    // 활성화 이벤트
    ActivationStarted,
    PluginActivated,
    ActivationFailed,
    ActivationCompleted,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PluginRegistered => write!(f, "plugin_registered"),
            Self::PluginRemoved => write!(f, "plugin_removed"),
            Self::RegistryCleared => write!(f, "registry_cleared"),
            Self::RuntimeConfigured => write!(f, "runtime_configured"),
            Self::ActivationStarted => write!(f, "activation_started"),
            Self::PluginActivated => write!(f, "plugin_activated"),
            Self::ActivationFailed => write!(f, "activation_failed"),
            Self::ActivationCompleted => write!(f, "activation_completed"),
        }
    }
}

// ============================================================================
// EventBus - 이벤트 버스 (발행/구독)
// ============================================================================

/// 이벤트 버스 - 발행은 동기이며 실패하지 않음
pub struct EventBus {
    /// 브로드캐스트 채널 발신자
    sender: broadcast::Sender<RuntimeEvent>,

    /// 이벤트 히스토리 (최근 N개)
    history: Mutex<VecDeque<RuntimeEvent>>,

    /// 히스토리 최대 크기
    history_size: usize,
}

impl EventBus {
    /// 새 이벤트 버스 생성
    pub fn new() -> Self {
        Self::with_capacity(1024, DEFAULT_EVENT_HISTORY_SIZE)
    }

    /// 용량 지정하여 생성
    ///
    /// 채널 용량은 `1..=MAX_CHANNEL_CAPACITY`로 제한됩니다. 히스토리는 미리
    /// 할당하지 않고 이벤트가 쌓이는 만큼만 `history_size`까지 늘어납니다.
    pub fn with_capacity(channel_capacity: usize, history_size: usize) -> Self {
        let (sender, _) = broadcast::channel(channel_capacity.clamp(1, MAX_CHANNEL_CAPACITY));
        Self {
            sender,
            history: Mutex::new(VecDeque::new()),
            history_size,
        }
    }

    /// 이벤트 발행
    pub fn publish(&self, event: RuntimeEvent) {
        trace!("Publishing event: {}", event.kind);

        if self.history_size > 0 {
            let mut history = self.history.lock();
            if history.len() >= self.history_size {
                history.pop_front();
            }
            history.push_back(event.clone());
        }

        // 구독자가 없어도 OK
        let _ = self.sender.send(event);
    }

    /// 이벤트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.sender.subscribe()
    }

    /// 이벤트 히스토리 조회
    pub fn history(&self) -> Vec<RuntimeEvent> {
        self.history.lock().iter().cloned().collect()
    }

    /// 특정 종류의 이벤트 히스토리 조회
    pub fn history_by_kind(&self, kind: EventKind) -> Vec<RuntimeEvent> {
        self.history
            .lock()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// 히스토리 클리어
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("history_size", &self.history_size)
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}


