use once_cell::sync::OnceCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::application::{ChartRefRegistry, ChartService, MarketDataStore, TickerMap, WorkspaceStore};
use crate::domain::workspace::{Chart, ChartId, Layout, indicator_catalog};

/// Process-wide store pair backing [`use_chart`].
pub struct Globals {
    pub workspace: WorkspaceStore,
    pub market_data: MarketDataStore,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        workspace: WorkspaceStore::new(),
        market_data: MarketDataStore::new(),
    })
}

crate::global_signals! {
    pub charts => workspace.charts: Vec<Arc<Chart>>,
    pub active_chart_id => workspace.active_chart_id: ChartId,
    pub layout => workspace.layout: Layout,
    pub ticker_data => market_data.ticker_data: TickerMap,
}

thread_local! {
    // Handle registry deliberately outside the signal graph and outside
    // `Globals`: resetting store state never clears it.
    static CHART_REFS: Rc<ChartRefRegistry> = Rc::new(ChartRefRegistry::new());

    static CHART_SERVICE: ChartService = ChartService::new(
        globals().workspace,
        globals().market_data,
        indicator_catalog(),
        chart_refs(),
    );
}

/// The process-wide chart-handle registry.
pub fn chart_refs() -> Rc<ChartRefRegistry> {
    CHART_REFS.with(Rc::clone)
}

/// Hook-equivalent entry point for view components: the service wired to the
/// global stores, the registered indicator catalog and the handle registry.
pub fn use_chart() -> ChartService {
    CHART_SERVICE.with(Clone::clone)
}
