//! 스코프별 JSON 설정 파일 저장소

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 설정 디렉토리 이름 (프로젝트에서는 앞에 `.`이 붙음)
pub(crate) const STORE_DIR_NAME: &str = "pluggable";

/// 저장소 스코프 - 나중 스코프가 앞 스코프를 덮어씀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// 사용자 전역 (`<config_dir>/pluggable/`)
    Global,
    /// 프로젝트 로컬 (`<root>/.pluggable/`)
    Project,
    /// 임의 디렉토리
    Custom,
}

/// JSON 설정 파일 저장소
///
/// 디렉토리 하나에 묶인 JSON 파일들을 읽고 씁니다.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    scope: StoreScope,
}

impl JsonStore {
    /// 임의 디렉토리 저장소
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scope: StoreScope::Custom,
        }
    }

    /// 사용자 전역 저장소
    pub fn global() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::Config("no user config directory on this platform".to_string())
        })?;
        Ok(Self {
            root: config_dir.join(STORE_DIR_NAME),
            scope: StoreScope::Global,
        })
    }

    /// `root` 아래의 프로젝트 저장소
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().join(format!(".{}", STORE_DIR_NAME)),
            scope: StoreScope::Project,
        }
    }

    /// 현재 작업 디렉토리의 프로젝트 저장소
    pub fn current_project() -> Result<Self> {
        Ok(Self::project(std::env::current_dir()?))
    }

    /// 병합 순서대로 나열된 저장소들 (전역 → 프로젝트)
    ///
    /// 전역 디렉토리를 찾을 수 없는 플랫폼에서는 프로젝트 저장소만 반환합니다.
    pub fn layered() -> Result<Vec<Self>> {
        let mut layers = Vec::with_capacity(2);
        match Self::global() {
            Ok(global) => layers.push(global),
            Err(e) => debug!("Skipping global settings: {}", e),
        }
        layers.push(Self::current_project()?);
        Ok(layers)
    }

    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).is_file()
    }

    /// JSON 파일 읽기
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        let raw = std::fs::read(&path)?;
        serde_json::from_slice(&raw)
            .map_err(|e| Error::Config(format!("{} is not valid: {}", path.display(), e)))
    }

    /// JSON 파일 읽기, 파일이 없으면 `None`
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        match self.load(filename) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// JSON 파일 쓰기
    ///
    /// 임시 파일에 쓴 뒤 rename 하므로 읽는 쪽이 반쯤 쓰인 파일을 보지 않습니다.
    pub fn save<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;

        let path = self.file_path(filename);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        std::fs::rename(&tmp, &path)?;

        debug!("Saved {:?} settings to {}", self.scope, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_creates_directory_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested"));

        let mut data = BTreeMap::new();
        data.insert("preset".to_string(), "live_registry".to_string());
        store.save("data.json", &data).unwrap();

        let loaded: BTreeMap<String, String> = store.load("data.json").unwrap();
        assert_eq!(loaded, data);
        assert!(!store.file_path("data.json.tmp").exists());
    }

    #[test]
    fn test_load_optional_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let loaded: Option<BTreeMap<String, String>> = store.load_optional("missing.json").unwrap();
        assert!(loaded.is_none());
        assert!(!store.exists("missing.json"));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let store = JsonStore::new(dir.path());

        let err = store
            .load_optional::<BTreeMap<String, String>>("broken.json")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_project_scope() {
        let store = JsonStore::project("/work");
        assert_eq!(store.base_dir(), Path::new("/work/.pluggable"));
        assert_eq!(store.scope(), StoreScope::Project);
    }

    #[test]
    fn test_layered_ends_with_project() {
        let layers = JsonStore::layered().unwrap();
        assert_eq!(layers.last().map(JsonStore::scope), Some(StoreScope::Project));
    }
}
