//! Built-in demo plugins
//!
//! `builtin://` url로 정적 링크된 모듈들. 매니페스트 파일 없이도
//! 활성화/확장 흐름 전체를 시연할 수 있습니다.

use pluggable_core::{
    ActivationArgs, Error, ExtensionPoint, PluginExports, PluginManifest, Result, StaticImporter,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

pub const PRICING_URL: &str = "builtin://pricing";
pub const MENU_URL: &str = "builtin://menu";
pub const INSPECTOR_URL: &str = "builtin://inspector";

/// 가격 계산 파이프라인 확장 포인트
pub const CALC_PRICE: &str = "calc-price";

/// 메뉴 항목 확장 포인트
pub const EXTEND_MENU: &str = "extend-menu";

/// 모든 demo 모듈이 링크된 Importer
pub fn importer() -> StaticImporter {
    StaticImporter::new()
        .with_module(PRICING_URL, Arc::new(pricing_plugin()))
        .with_module(MENU_URL, Arc::new(menu_plugin()))
        .with_module(INSPECTOR_URL, Arc::new(inspector_plugin()))
}

/// `--manifests`가 없을 때 사용하는 매니페스트
pub fn manifests() -> Vec<PluginManifest> {
    vec![
        PluginManifest::new("pricing", PRICING_URL)
            .with_activation_point("init")
            .with_description("Tax and discount steps for the calc-price pipeline"),
        PluginManifest::new("menu", MENU_URL)
            .with_activation_point("init")
            .with_description("Settings and about entries for extend-menu"),
        PluginManifest::new("inspector", INSPECTOR_URL)
            .with_activation_points(["init", "ready"])
            .with_description("Reports what each activation received"),
    ]
}

// ============================================================================
// Plugins
// ============================================================================

fn pricing_plugin() -> PluginExports {
    PluginExports::new().with_entry("init", |args| async move {
        let Some(point) = resolve_point(&args, CALC_PRICE, "pricing") else {
            return Ok(());
        };

        point.register_fn("tax", |price| async move {
            let price = as_price(&price)?;
            Ok(json!((price * 1.1 * 100.0).round() / 100.0))
        });
        point.register_fn("discount", |price| async move {
            let price = as_price(&price)?;
            Ok(json!((price - 5.0).max(0.0)))
        });
        Ok(())
    })
}

fn menu_plugin() -> PluginExports {
    PluginExports::new().with_entry("init", |args| async move {
        let Some(point) = resolve_point(&args, EXTEND_MENU, "menu") else {
            return Ok(());
        };

        for (handler, label) in [("settings", "Settings"), ("about", "About")] {
            point.register_fn(handler, move |parent| async move {
                Ok(json!({ "parent": parent, "label": label }))
            });
        }
        Ok(())
    })
}

fn inspector_plugin() -> PluginExports {
    let report = |point: &'static str| {
        move |args: ActivationArgs| async move {
            let points = match &args {
                ActivationArgs::ExtensionPoints(points) => points.len(),
                ActivationArgs::Registry(_) | ActivationArgs::None => 0,
            };
            info!(
                "inspector: {} activated with {} argument ({} resolved point(s))",
                point,
                args.mode(),
                points
            );
            Ok(())
        }
    };

    PluginExports::new()
        .with_entry("init", report("init"))
        .with_entry("ready", report("ready"))
}

/// 인자 모드에 맞게 확장 포인트를 얻음
///
/// 라이브 레지스트리면 생성까지 하고, 스냅샷이면 이미 있는 경우에만 반환합니다.
fn resolve_point(args: &ActivationArgs, name: &str, plugin: &str) -> Option<Arc<ExtensionPoint>> {
    let point = match args {
        ActivationArgs::Registry(api) => Some(api.add(name)),
        ActivationArgs::ExtensionPoints(points) => points.get(name).cloned(),
        ActivationArgs::None => None,
    };

    if point.is_none() {
        warn!(
            "{}: extension point {} is not reachable with {} argument",
            plugin,
            name,
            args.mode()
        );
    }
    point
}

fn as_price(value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::InvalidInput(format!("price must be a number, got {}", value)))
}


