use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use strum::{AsRefStr, EnumString};

use super::entities::SettingsMap;
use crate::domain::errors::{AppError, CatalogResult};
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// One input/style definition from the catalog. Only `key` and `default`
/// matter here; any styling metadata is dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDef {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Catalog entry for one indicator type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default)]
    pub inputs: Vec<SettingDef>,
    #[serde(default)]
    pub style: Vec<SettingDef>,
}

impl IndicatorConfig {
    /// Settings seeded from every definition that declares a default; keys
    /// without one are omitted.
    pub fn default_settings(&self) -> SettingsMap {
        self.inputs
            .iter()
            .chain(self.style.iter())
            .filter_map(|def| def.default.clone().map(|value| (def.key.clone(), value)))
            .collect()
    }
}

/// External indicator catalog, consumed as a read-only lookup table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    #[serde(flatten)]
    configs: HashMap<String, IndicatorConfig>,
}

impl IndicatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::CatalogError(e.to_string()))
    }

    pub fn insert(&mut self, kind: impl Into<String>, config: IndicatorConfig) {
        self.configs.insert(kind.into(), config);
    }

    pub fn get(&self, kind: &str) -> Option<&IndicatorConfig> {
        self.configs.get(kind)
    }

    /// Resolve the seed settings for an indicator type: catalog entry first,
    /// then the legacy fallback table, otherwise empty.
    pub fn default_settings(&self, kind: &str) -> SettingsMap {
        if let Some(config) = self.configs.get(kind) {
            return config.default_settings();
        }
        match LegacyIndicator::from_str(kind) {
            Ok(legacy) => {
                log_debug!(
                    LogComponent::Domain("Catalog"),
                    "no catalog entry for {kind}, using legacy defaults"
                );
                legacy.default_settings()
            }
            Err(_) => SettingsMap::new(),
        }
    }
}

/// Indicator types that predate the catalog. Their defaults live here as one
/// more lookup table, not as scattered type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum LegacyIndicator {
    #[strum(serialize = "sma")]
    SimpleMovingAverage,
    #[strum(serialize = "ema")]
    ExponentialMovingAverage,
    #[strum(serialize = "tpo")]
    TimePriceOpportunity,
}

impl LegacyIndicator {
    pub fn default_settings(&self) -> SettingsMap {
        let seeded = match self {
            Self::SimpleMovingAverage => [("period", json!(20)), ("color", json!("#2196F3"))],
            Self::ExponentialMovingAverage => [("period", json!(20)), ("color", json!("#FF9800"))],
            Self::TimePriceOpportunity => [("blockSize", json!("30m")), ("tickSize", json!("auto"))],
        };
        seeded.into_iter().map(|(key, value)| (key.to_string(), value)).collect()
    }
}

/// Catalog registered by the host application
static CATALOG: OnceCell<Arc<IndicatorCatalog>> = OnceCell::new();
static EMPTY_CATALOG: Lazy<Arc<IndicatorCatalog>> = Lazy::new(|| Arc::new(IndicatorCatalog::new()));

/// Register the catalog once at startup; later calls are ignored.
pub fn init_indicator_catalog(catalog: IndicatorCatalog) {
    let _ = CATALOG.set(Arc::new(catalog));
}

/// Registered catalog, or an empty one when the host never provided any
/// (the legacy fallback table still applies).
pub fn indicator_catalog() -> Arc<IndicatorCatalog> {
    CATALOG.get().cloned().unwrap_or_else(|| EMPTY_CATALOG.clone())
}
