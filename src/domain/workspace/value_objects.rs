use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Instrument shown by a freshly created chart.
pub const DEFAULT_SYMBOL: &str = "NIFTY 50";
/// Exchange assumed whenever none is given.
pub const DEFAULT_EXCHANGE: &str = "NSE";
/// Candle interval for new charts.
pub const DEFAULT_INTERVAL: &str = "1d";

/// Value Object - workspace-unique chart identifier.
///
/// Ids are allocated monotonically (`max + 1`) and never reused while the
/// chart exists.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
pub struct ChartId(u32);

impl ChartId {
    /// Id of the chart a fresh workspace starts with.
    pub const FIRST: ChartId = ChartId(1);

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Next id in the monotonic allocation scheme.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Value Object - indicator instance identifier.
///
/// Generated at attach time as `{kind}_{millis}_{salt}`; unique within the
/// owning chart with near-zero collision probability, not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Display, Serialize, Deserialize)]
pub struct IndicatorId(String);

impl IndicatorId {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IndicatorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Value Object - opaque layout descriptor. Stored verbatim, never
/// interpreted by this core.
#[derive(Debug, Clone, PartialEq, Eq, From, Display, Serialize, Deserialize)]
pub struct Layout(String);

impl Layout {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Layout {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self("single".to_string())
    }
}
