//! Client-side state layer for a multi-chart charting dashboard.
//!
//! Two cooperating stores plus one adapter:
//! - [`WorkspaceStore`] owns the open charts, the active selection and the
//!   layout, with structurally non-destructive mutations;
//! - [`MarketDataStore`] owns the instrument-key -> quote-snapshot cache with
//!   change-suppressed single and batched tick updates;
//! - [`ChartService`] composes both behind the stable operation set the view
//!   layer consumes, resolving indicator defaults and guarding the
//!   at-least-one-chart invariant.
//!
//! Rendering, network transport and UI chrome are external collaborators;
//! ticks arrive through [`MarketDataStore::update_ticker`] /
//! [`MarketDataStore::update_tickers`] and rendering handles live in the
//! non-reactive [`ChartRefRegistry`].

pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;

mod macros;

use crate::domain::logging::{LogComponent, init_logger, init_time_provider};
use crate::infrastructure::{ConsoleLogger, SystemTimeProvider};

pub use application::{ChartRefRegistry, ChartService, MarketDataStore, TickerMap, WorkspaceStore};
pub use global_state::{chart_refs, globals, use_chart};

/// Install the native logger and clock. Call once at startup; later calls
/// are ignored by the `OnceLock`s underneath. Without it, logging is a no-op
/// and timestamps come from a monotonic counter.
pub fn initialize() {
    init_logger(Box::new(ConsoleLogger::new_development()));
    init_time_provider(Box::new(SystemTimeProvider::new()));
    crate::log_info!(
        LogComponent::Infrastructure("Initialize"),
        "🚀 chart workspace state layer initialized"
    );
}
