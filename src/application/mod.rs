//! Application layer: the two reactive stores and the view-facing service.

pub mod chart_refs;
pub mod chart_service;
pub mod market_data_store;
pub mod workspace_store;

pub use chart_refs::ChartRefRegistry;
pub use chart_service::ChartService;
pub use market_data_store::{MarketDataStore, TickerMap};
pub use workspace_store::WorkspaceStore;
