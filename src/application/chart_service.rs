use leptos::*;
use rand::Rng;
use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

use crate::application::chart_refs::ChartRefRegistry;
use crate::application::market_data_store::MarketDataStore;
use crate::application::workspace_store::WorkspaceStore;
use crate::domain::logging::{LogComponent, get_logger, get_time_provider};
use crate::domain::market_data::TickerSnapshot;
use crate::domain::workspace::{
    Chart, ChartId, ChartPatch, ComparisonSymbol, DEFAULT_EXCHANGE, DEFAULT_INTERVAL,
    DEFAULT_SYMBOL, Indicator, IndicatorCatalog, IndicatorId, IndicatorPatch, Layout,
    SettingsMap, StrategyConfig,
};

/// Adapter between the view layer and the two stores - the hook-equivalent
/// facade. Derives the active-chart view, resolves indicator defaults
/// through the catalog and exposes the mutation set under stable names.
///
/// The stores never depend on this service; it depends on both.
#[derive(Clone)]
pub struct ChartService {
    workspace: WorkspaceStore,
    market_data: MarketDataStore,
    catalog: Arc<IndicatorCatalog>,
    chart_refs: Rc<ChartRefRegistry>,
    active_chart: Memo<Option<Arc<Chart>>>,
}

impl ChartService {
    pub fn new(
        workspace: WorkspaceStore,
        market_data: MarketDataStore,
        catalog: Arc<IndicatorCatalog>,
        chart_refs: Rc<ChartRefRegistry>,
    ) -> Self {
        // Memoized by store version: recomputes only when the chart list or
        // the active id changes.
        let active_chart = create_memo(move |_| {
            let active_id = workspace.active_chart_id().get();
            workspace.charts().with(|charts| {
                charts
                    .iter()
                    .find(|c| c.id == active_id)
                    .cloned()
                    .or_else(|| charts.first().cloned())
            })
        });
        Self { workspace, market_data, catalog, chart_refs, active_chart }
    }

    // ============ DERIVED STATE ============

    /// Chart selected by the active id, falling back to the first chart when
    /// the id is stale. `None` only for an empty workspace - dependent field
    /// reads still work through fixed defaults, a stale selection never
    /// becomes an error.
    pub fn active_chart(&self) -> Option<Arc<Chart>> {
        self.active_chart.get()
    }

    pub fn current_symbol(&self) -> String {
        self.active_field(|chart| chart.symbol.clone(), DEFAULT_SYMBOL)
    }

    pub fn current_exchange(&self) -> String {
        self.active_field(|chart| chart.exchange.clone(), DEFAULT_EXCHANGE)
    }

    pub fn current_interval(&self) -> String {
        self.active_field(|chart| chart.interval.clone(), DEFAULT_INTERVAL)
    }

    /// Latest snapshot for the active chart's instrument.
    pub fn active_ticker(&self) -> Option<Arc<TickerSnapshot>> {
        self.market_data.get_ticker(&self.current_symbol(), Some(&self.current_exchange()))
    }

    fn active_field(&self, read: impl Fn(&Chart) -> String, fallback: &str) -> String {
        self.active_chart
            .get()
            .map(|chart| read(&chart))
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    fn active_id(&self) -> ChartId {
        self.workspace.active_chart_id().get_untracked()
    }

    // ============ CHART HANDLERS ============

    /// Point the active chart at another instrument. Clears the strategy
    /// config: a strategy is bound to the instrument it was built for.
    pub fn update_symbol(&self, symbol: &str, exchange: Option<&str>) {
        let patch = ChartPatch {
            symbol: Some(symbol.to_string()),
            exchange: Some(exchange.unwrap_or(DEFAULT_EXCHANGE).to_string()),
            strategy_config: Some(None),
            ..Default::default()
        };
        self.workspace.update_chart(self.active_id(), patch);
    }

    pub fn update_interval(&self, interval: &str) {
        let patch = ChartPatch { interval: Some(interval.to_string()), ..Default::default() };
        self.workspace.update_chart(self.active_id(), patch);
    }

    // ============ INDICATOR HANDLERS ============

    /// Attach an indicator of `kind` to the active chart, settings seeded
    /// from the catalog entry or the legacy fallback table.
    ///
    /// Ids are `{kind}_{millis}_{salt}` with a random salt below 1000 - not
    /// collision-checked, an accepted UI-scoped risk.
    pub fn add_indicator(&self, kind: &str) -> IndicatorId {
        let settings = self.catalog.default_settings(kind);
        let id = IndicatorId::from(format!(
            "{kind}_{}_{}",
            get_time_provider().current_timestamp(),
            rand::rng().random_range(0..1000)
        ));
        let indicator = Indicator::new(id.clone(), kind, settings);
        self.workspace.add_indicator(self.active_id(), indicator);
        id
    }

    pub fn remove_indicator(&self, indicator_id: &IndicatorId) {
        self.workspace.remove_indicator(self.active_id(), indicator_id);
    }

    /// Flip an indicator's visibility; no-op when the chart or the indicator
    /// is missing.
    pub fn toggle_indicator_visibility(&self, indicator_id: &IndicatorId) {
        let chart_id = self.active_id();
        let visible = self.workspace.charts().with_untracked(|charts| {
            charts
                .iter()
                .find(|c| c.id == chart_id)
                .and_then(|chart| chart.indicator(indicator_id))
                .map(|indicator| indicator.visible)
        });
        let Some(visible) = visible else {
            return;
        };
        self.workspace.update_indicator(chart_id, indicator_id, IndicatorPatch::visibility(!visible));
    }

    /// Shallow-merge new settings into an indicator on the active chart.
    pub fn update_indicator_settings(&self, indicator_id: &IndicatorId, settings: SettingsMap) {
        self.workspace.update_indicator(self.active_id(), indicator_id, IndicatorPatch::settings(settings));
    }

    /// Replace the active chart's indicator list wholesale.
    pub fn set_indicators(&self, indicators: Vec<Indicator>) {
        let patch = ChartPatch { indicators: Some(indicators), ..Default::default() };
        self.workspace.update_chart(self.active_id(), patch);
    }

    // ============ COMPARISON SYMBOLS ============

    /// Overlay another instrument on the active chart. No-op when the
    /// (symbol, exchange) pair is already overlaid - no two overlays with the
    /// same pair coexist on one chart.
    pub fn add_comparison_symbol(&self, symbol: &str, exchange: &str, color: &str) {
        let chart_id = self.active_id();
        let next = self.workspace.charts().with_untracked(|charts| {
            let chart = charts.iter().find(|c| c.id == chart_id)?;
            if chart.has_comparison(symbol, exchange) {
                return None;
            }
            let mut overlays = chart.comparison_symbols.clone();
            overlays.push(ComparisonSymbol::new(symbol, exchange, color));
            Some(overlays)
        });
        if let Some(comparison_symbols) = next {
            let patch =
                ChartPatch { comparison_symbols: Some(comparison_symbols), ..Default::default() };
            self.workspace.update_chart(chart_id, patch);
        }
    }

    /// Remove the overlay matching the (symbol, exchange) pair.
    pub fn remove_comparison_symbol(&self, symbol: &str, exchange: &str) {
        let chart_id = self.active_id();
        let next = self.workspace.charts().with_untracked(|charts| {
            charts.iter().find(|c| c.id == chart_id).map(|chart| {
                chart
                    .comparison_symbols
                    .iter()
                    .filter(|c| !c.matches(symbol, exchange))
                    .cloned()
                    .collect::<Vec<_>>()
            })
        });
        if let Some(comparison_symbols) = next {
            let patch =
                ChartPatch { comparison_symbols: Some(comparison_symbols), ..Default::default() };
            self.workspace.update_chart(chart_id, patch);
        }
    }

    // ============ STRATEGY CONFIG ============

    pub fn update_strategy_config(&self, config: Option<StrategyConfig>) {
        let patch = ChartPatch { strategy_config: Some(config), ..Default::default() };
        self.workspace.update_chart(self.active_id(), patch);
    }

    // ============ MULTI-CHART MANAGEMENT ============

    /// Open a fully-defaulted chart under a fresh id (`max + 1`, base case 1
    /// for an empty workspace) and return that id.
    pub fn add_chart(&self) -> ChartId {
        let new_id = self.workspace.charts().with_untracked(|charts| {
            charts.iter().map(|c| c.id).max().map(ChartId::next).unwrap_or(ChartId::FIRST)
        });
        self.workspace.add_chart(Chart::new(new_id));
        get_logger().info(
            LogComponent::Application("ChartService"),
            &format!("added chart {new_id}"),
        );
        new_id
    }

    /// Close a chart. Refused while it is the last one: a workspace always
    /// retains at least one chart.
    pub fn remove_chart(&self, chart_id: ChartId) {
        let count = self.workspace.charts().with_untracked(|charts| charts.len());
        if count <= 1 {
            get_logger().warn(
                LogComponent::Application("ChartService"),
                &format!("refusing to remove chart {chart_id}: it is the last one"),
            );
            return;
        }
        self.workspace.remove_chart(chart_id);
    }

    // ============ HANDLES ============

    /// Rendering handle registered for `chart_id`, if any.
    pub fn get_chart_ref(&self, chart_id: ChartId) -> Option<Rc<dyn Any>> {
        self.chart_refs.get(chart_id)
    }

    /// The handle registry itself, for direct registration by the rendering
    /// collaborator (see [`ChartRefRegistry`] on why this bypasses the
    /// reactive model).
    pub fn chart_refs(&self) -> Rc<ChartRefRegistry> {
        Rc::clone(&self.chart_refs)
    }

    // ============ PASSTHROUGH ============

    pub fn charts(&self) -> RwSignal<Vec<Arc<Chart>>> {
        self.workspace.charts()
    }

    pub fn active_chart_id(&self) -> RwSignal<ChartId> {
        self.workspace.active_chart_id()
    }

    pub fn layout(&self) -> RwSignal<Layout> {
        self.workspace.layout()
    }

    pub fn set_charts(&self, charts: Vec<Arc<Chart>>) {
        self.workspace.set_charts(charts);
    }

    pub fn set_active_chart_id(&self, id: ChartId) {
        self.workspace.set_active_chart_id(id);
    }

    pub fn set_layout(&self, layout: Layout) {
        self.workspace.set_layout(layout);
    }

    pub fn workspace(&self) -> WorkspaceStore {
        self.workspace
    }

    pub fn market_data(&self) -> MarketDataStore {
        self.market_data
    }
}
