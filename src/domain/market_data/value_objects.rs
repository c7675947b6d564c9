use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::workspace::DEFAULT_EXCHANGE;

/// Value Object - `symbol:exchange` cache key.
///
/// This is the single key-formation path shared by every read and write; a
/// missing or empty exchange falls back to "NSE".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct InstrumentKey(String);

impl InstrumentKey {
    pub fn new(symbol: &str, exchange: Option<&str>) -> Self {
        let exchange = match exchange {
            Some(exchange) if !exchange.is_empty() => exchange,
            _ => DEFAULT_EXCHANGE,
        };
        Self(format!("{symbol}:{exchange}"))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
