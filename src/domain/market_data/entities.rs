use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Domain entity - latest quote snapshot for one instrument.
///
/// Created on the first accepted update for a key, merged in place
/// afterwards, never evicted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Remaining quote fields (`chg`, `chgP`, ...), carried verbatim.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Millis stamp of the last accepted write.
    pub last_updated: u64,
}

impl TickerSnapshot {
    /// Merge an incoming quote over this snapshot (shallow, last write wins;
    /// fields absent from the patch are kept).
    pub fn merge(&mut self, patch: QuotePatch) {
        if let Some(ltp) = patch.ltp {
            self.ltp = Some(ltp);
        }
        if let Some(volume) = patch.volume {
            self.volume = Some(volume);
        }
        self.fields.extend(patch.fields);
    }
}

/// Partial quote payload as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl QuotePatch {
    /// Price-and-volume payload, the common tick shape.
    pub fn quote(ltp: f64, volume: f64) -> Self {
        Self { ltp: Some(ltp), volume: Some(volume), ..Default::default() }
    }

    /// Price-only payload.
    pub fn ltp(ltp: f64) -> Self {
        Self { ltp: Some(ltp), ..Default::default() }
    }
}

/// One entry of a batched tick delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerUpdate {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    pub data: QuotePatch,
}

impl TickerUpdate {
    pub fn new(symbol: impl Into<String>, exchange: Option<&str>, data: QuotePatch) -> Self {
        Self { symbol: symbol.into(), exchange: exchange.map(str::to_string), data }
    }
}
