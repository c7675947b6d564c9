use chart_workspace::application::{ChartRefRegistry, ChartService, MarketDataStore, WorkspaceStore};
use chart_workspace::domain::workspace::{Chart, IndicatorCatalog};
use leptos::*;
use std::rc::Rc;
use std::sync::Arc;

fn service() -> ChartService {
    ChartService::new(
        WorkspaceStore::new(),
        MarketDataStore::new(),
        Arc::new(IndicatorCatalog::new()),
        Rc::new(ChartRefRegistry::new()),
    )
}

fn overlays_of(service: &ChartService) -> Vec<Arc<Chart>> {
    service.charts().get_untracked()
}

#[test]
fn adding_the_same_pair_twice_keeps_one_entry() {
    let service = service();
    service.add_comparison_symbol("TCS", "NSE", "#FF0000");
    service.add_comparison_symbol("TCS", "NSE", "#00FF00");

    let chart = &overlays_of(&service)[0];
    assert_eq!(chart.comparison_symbols.len(), 1);
    // First registration wins, including its color.
    assert_eq!(chart.comparison_symbols[0].color, "#FF0000");
}

#[test]
fn same_symbol_on_another_exchange_coexists() {
    let service = service();
    service.add_comparison_symbol("TCS", "NSE", "#FF0000");
    service.add_comparison_symbol("TCS", "BSE", "#00FF00");

    assert_eq!(overlays_of(&service)[0].comparison_symbols.len(), 2);
}

#[test]
fn remove_matches_by_pair() {
    let service = service();
    service.add_comparison_symbol("TCS", "NSE", "#FF0000");
    service.add_comparison_symbol("INFY", "NSE", "#00FF00");

    service.remove_comparison_symbol("TCS", "NSE");

    let chart = &overlays_of(&service)[0];
    assert_eq!(chart.comparison_symbols.len(), 1);
    assert_eq!(chart.comparison_symbols[0].symbol, "INFY");
}

#[test]
fn removing_a_missing_pair_keeps_chart_identity() {
    let service = service();
    service.add_comparison_symbol("TCS", "NSE", "#FF0000");
    let before = overlays_of(&service);

    service.remove_comparison_symbol("SBIN", "NSE");

    assert!(Arc::ptr_eq(&before[0], &overlays_of(&service)[0]));
}
