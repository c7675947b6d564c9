use leptos::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::logging::{LogComponent, get_time_provider};
use crate::domain::market_data::{InstrumentKey, QuotePatch, TickerSnapshot, TickerUpdate};
use crate::log_trace;

/// Instrument key -> latest snapshot, entries shared via `Arc`.
pub type TickerMap = HashMap<InstrumentKey, Arc<TickerSnapshot>>;

/// Reactive cache of the latest quote per instrument.
///
/// Writes are change-suppressed: a tick that alters nothing observable leaves
/// the signal untouched, so no subscriber is notified. Entries are never
/// evicted; the key count is bounded by the distinct instruments ever
/// observed.
#[derive(Clone, Copy)]
pub struct MarketDataStore {
    ticker_data: RwSignal<TickerMap>,
    subscriptions: RwSignal<HashSet<InstrumentKey>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        Self {
            ticker_data: create_rw_signal(HashMap::new()),
            subscriptions: create_rw_signal(HashSet::new()),
        }
    }

    pub fn ticker_data(&self) -> RwSignal<TickerMap> {
        self.ticker_data
    }

    /// Instrument keys the transport is currently subscribed to. Pure
    /// bookkeeping for the ingestion collaborator.
    pub fn subscriptions(&self) -> RwSignal<HashSet<InstrumentKey>> {
        self.subscriptions
    }

    /// Apply one tick. Complete no-op when both the incoming `ltp` and
    /// `volume` equal the stored snapshot's (a missing field compares equal
    /// to a missing field), so high-frequency duplicate ticks notify nobody.
    pub fn update_ticker(&self, symbol: &str, exchange: Option<&str>, data: QuotePatch) {
        let key = InstrumentKey::new(symbol, exchange);
        let unchanged = self.ticker_data.with_untracked(|tickers| {
            let (ltp, volume) =
                tickers.get(&key).map_or((None, None), |snap| (snap.ltp, snap.volume));
            ltp == data.ltp && volume == data.volume
        });
        if unchanged {
            log_trace!(LogComponent::Application("MarketDataStore"), "tick for {key} suppressed");
            return;
        }
        let stamped_at = get_time_provider().current_timestamp();
        self.ticker_data.update(|tickers| {
            let mut snap =
                tickers.get(&key).map_or_else(TickerSnapshot::default, |snap| (**snap).clone());
            snap.merge(data);
            snap.last_updated = stamped_at;
            tickers.insert(key, Arc::new(snap));
        });
    }

    /// Apply a batch of ticks as at most one state update, collapsing many
    /// near-simultaneous ticks into a single notification.
    ///
    /// Entries whose `ltp` matches the in-progress batch result are skipped
    /// (per-entry test is `ltp` only on this path); if every entry is skipped
    /// the whole call is a no-op.
    pub fn update_tickers(&self, updates: Vec<TickerUpdate>) {
        let mut next = self.ticker_data.get_untracked();
        let mut has_changes = false;
        for update in updates {
            let key = InstrumentKey::new(&update.symbol, update.exchange.as_deref());
            let prior_ltp = next.get(&key).and_then(|snap| snap.ltp);
            if prior_ltp == update.data.ltp {
                continue;
            }
            let mut snap =
                next.get(&key).map_or_else(TickerSnapshot::default, |snap| (**snap).clone());
            snap.merge(update.data);
            snap.last_updated = get_time_provider().current_timestamp();
            next.insert(key, Arc::new(snap));
            has_changes = true;
        }
        if has_changes {
            self.ticker_data.set(next);
        }
    }

    /// Point lookup; `None` when the instrument was never observed.
    pub fn get_ticker(&self, symbol: &str, exchange: Option<&str>) -> Option<Arc<TickerSnapshot>> {
        let key = InstrumentKey::new(symbol, exchange);
        self.ticker_data.with(|tickers| tickers.get(&key).cloned())
    }

    /// Record a transport subscription; no-op when already subscribed.
    pub fn subscribe(&self, symbol: &str, exchange: Option<&str>) {
        let key = InstrumentKey::new(symbol, exchange);
        let known = self.subscriptions.with_untracked(|subs| subs.contains(&key));
        if !known {
            self.subscriptions.update(|subs| {
                subs.insert(key);
            });
        }
    }

    /// Drop a transport subscription; no-op when absent.
    pub fn unsubscribe(&self, symbol: &str, exchange: Option<&str>) {
        let key = InstrumentKey::new(symbol, exchange);
        let known = self.subscriptions.with_untracked(|subs| subs.contains(&key));
        if known {
            self.subscriptions.update(|subs| {
                subs.remove(&key);
            });
        }
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}
