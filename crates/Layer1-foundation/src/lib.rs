//! # pluggable-foundation
//!
//! Foundation layer for Pluggable:
//! - Error: 런타임 공용 에러 타입
//! - Config: 런타임 설정 (RuntimeSettings, PresetMode)
//! - Storage: JsonStore (글로벌/프로젝트 설정 파일)

pub mod config;
pub mod error;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{PresetMode, RuntimeSettings, SETTINGS_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{JsonStore, StoreScope};
