//! Config - 런타임 설정 관리
//!
//! - `settings.rs` - RuntimeSettings / PresetMode

mod settings;

pub use settings::{
    PresetMode, RuntimeSettings, DEFAULT_EVENT_HISTORY_SIZE, DEFAULT_STARTUP_ACTIVATION_POINT,
    SETTINGS_FILE,
};
