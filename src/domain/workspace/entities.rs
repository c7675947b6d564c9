use super::value_objects::{
    ChartId, DEFAULT_EXCHANGE, DEFAULT_INTERVAL, DEFAULT_SYMBOL, IndicatorId,
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat setting-key -> value mapping attached to an indicator.
pub type SettingsMap = BTreeMap<String, Value>;

/// Domain entity - one configurable chart slot in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: ChartId,
    pub symbol: String,
    pub exchange: String,
    pub interval: String,
    pub indicators: Vec<Indicator>,
    pub comparison_symbols: Vec<ComparisonSymbol>,
    pub strategy_config: Option<StrategyConfig>,
}

impl Chart {
    /// Fully-defaulted chart for a freshly allocated id.
    pub fn new(id: ChartId) -> Self {
        Self {
            id,
            symbol: DEFAULT_SYMBOL.to_string(),
            exchange: DEFAULT_EXCHANGE.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            indicators: Vec::new(),
            comparison_symbols: Vec::new(),
            strategy_config: None,
        }
    }

    /// Merge a partial update into this chart. Reports whether any field
    /// actually changed, so callers can skip publishing identical state.
    pub fn apply(&mut self, patch: ChartPatch) -> bool {
        let mut changed = false;
        if let Some(symbol) = patch.symbol
            && self.symbol != symbol
        {
            self.symbol = symbol;
            changed = true;
        }
        if let Some(exchange) = patch.exchange
            && self.exchange != exchange
        {
            self.exchange = exchange;
            changed = true;
        }
        if let Some(interval) = patch.interval
            && self.interval != interval
        {
            self.interval = interval;
            changed = true;
        }
        if let Some(indicators) = patch.indicators
            && self.indicators != indicators
        {
            self.indicators = indicators;
            changed = true;
        }
        if let Some(comparison_symbols) = patch.comparison_symbols
            && self.comparison_symbols != comparison_symbols
        {
            self.comparison_symbols = comparison_symbols;
            changed = true;
        }
        if let Some(strategy_config) = patch.strategy_config
            && self.strategy_config != strategy_config
        {
            self.strategy_config = strategy_config;
            changed = true;
        }
        changed
    }

    pub fn indicator(&self, id: &IndicatorId) -> Option<&Indicator> {
        self.indicators.iter().find(|indicator| &indicator.id == id)
    }

    pub fn add_indicator(&mut self, indicator: Indicator) {
        self.indicators.push(indicator);
    }

    /// Merge a partial update into the matching indicator; `false` when the
    /// indicator is missing or nothing differed.
    pub fn update_indicator(&mut self, id: &IndicatorId, patch: IndicatorPatch) -> bool {
        match self.indicators.iter_mut().find(|indicator| &indicator.id == id) {
            Some(indicator) => indicator.apply(patch),
            None => false,
        }
    }

    pub fn remove_indicator(&mut self, id: &IndicatorId) -> bool {
        let before = self.indicators.len();
        self.indicators.retain(|indicator| &indicator.id != id);
        self.indicators.len() != before
    }

    /// Whether an overlay with this (symbol, exchange) pair is already
    /// attached. Color is presentation only and not part of the identity.
    pub fn has_comparison(&self, symbol: &str, exchange: &str) -> bool {
        self.comparison_symbols.iter().any(|c| c.matches(symbol, exchange))
    }
}

/// Partial chart update; `None` fields are left untouched.
///
/// `strategy_config` is doubly optional: `Some(None)` clears the config,
/// `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartPatch {
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub interval: Option<String>,
    pub indicators: Option<Vec<Indicator>>,
    pub comparison_symbols: Option<Vec<ComparisonSymbol>>,
    pub strategy_config: Option<Option<StrategyConfig>>,
}

/// Domain entity - a configured indicator attached to a chart.
///
/// `kind` keys into the external indicator catalog; duplicates of the same
/// kind on one chart are allowed, identity is the id alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: IndicatorId,
    #[serde(rename = "type")]
    pub kind: String,
    pub visible: bool,
    #[serde(flatten)]
    pub settings: SettingsMap,
}

impl Indicator {
    /// New indicator, visible by default, settings pre-seeded by the caller.
    pub fn new(id: IndicatorId, kind: impl Into<String>, settings: SettingsMap) -> Self {
        Self { id, kind: kind.into(), visible: true, settings }
    }

    /// Shallow-merge a patch. Reports whether anything actually changed.
    pub fn apply(&mut self, patch: IndicatorPatch) -> bool {
        let mut changed = false;
        if let Some(visible) = patch.visible
            && self.visible != visible
        {
            self.visible = visible;
            changed = true;
        }
        for (key, value) in patch.settings {
            if self.settings.get(&key) != Some(&value) {
                self.settings.insert(key, value);
                changed = true;
            }
        }
        changed
    }
}

/// Partial indicator update: a visibility flip, a settings merge, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorPatch {
    pub visible: Option<bool>,
    pub settings: SettingsMap,
}

impl IndicatorPatch {
    pub fn visibility(visible: bool) -> Self {
        Self { visible: Some(visible), ..Default::default() }
    }

    pub fn settings(settings: SettingsMap) -> Self {
        Self { settings, ..Default::default() }
    }
}

/// Secondary instrument overlaid on a chart for visual comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSymbol {
    pub symbol: String,
    pub exchange: String,
    pub color: String,
}

impl ComparisonSymbol {
    pub fn new(symbol: impl Into<String>, exchange: impl Into<String>, color: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), exchange: exchange.into(), color: color.into() }
    }

    /// Identity is the (symbol, exchange) pair.
    pub fn matches(&self, symbol: &str, exchange: &str) -> bool {
        self.symbol == symbol && self.exchange == exchange
    }
}

/// Opaque, chart-scoped configuration for the external strategy feature.
/// Carried verbatim, never interpreted here.
#[derive(Debug, Clone, PartialEq, From, Serialize, Deserialize)]
pub struct StrategyConfig(pub Value);
