use chart_workspace::application::{ChartRefRegistry, ChartService, MarketDataStore, WorkspaceStore};
use chart_workspace::domain::market_data::QuotePatch;
use chart_workspace::domain::workspace::{
    Chart, ChartId, Indicator, IndicatorCatalog, IndicatorId, SettingsMap, StrategyConfig,
};
use leptos::*;
use serde_json::json;
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

fn charts_of(service: &ChartService) -> Vec<Arc<Chart>> {
    service.charts().get_untracked()
}

#[test]
fn fresh_workspace_has_one_default_chart() {
    let service = service();
    let active = service.active_chart().expect("active chart");
    assert_eq!(active.id, ChartId::FIRST);
    assert_eq!(service.current_symbol(), "NIFTY 50");
    assert_eq!(service.current_exchange(), "NSE");
    assert_eq!(service.current_interval(), "1d");
}

#[test]
fn active_chart_follows_selection() {
    let service = service();
    let new_id = service.add_chart();
    service.set_active_chart_id(new_id);
    assert_eq!(service.active_chart().expect("active chart").id, new_id);
}

#[test]
fn stale_active_id_falls_back_to_first_chart() {
    let service = service();
    service.set_active_chart_id(ChartId::from(99));
    assert_eq!(service.active_chart().expect("active chart").id, ChartId::FIRST);
}

#[test]
fn empty_workspace_reads_fixed_defaults() {
    let service = service();
    service.set_charts(Vec::new());
    assert!(service.active_chart().is_none());
    assert_eq!(service.current_symbol(), "NIFTY 50");
    assert_eq!(service.current_exchange(), "NSE");
    assert_eq!(service.current_interval(), "1d");
}

#[test]
fn update_symbol_clears_strategy_config() {
    let service = service();
    service.update_strategy_config(Some(StrategyConfig::from(json!({"legs": 2}))));
    assert!(charts_of(&service)[0].strategy_config.is_some());

    service.update_symbol("TCS", None);

    let chart = &charts_of(&service)[0];
    assert_eq!(chart.symbol, "TCS");
    assert_eq!(chart.exchange, "NSE");
    assert!(chart.strategy_config.is_none());
}

#[test]
fn update_interval_targets_active_chart() {
    let service = service();
    let second = service.add_chart();
    service.set_active_chart_id(second);

    service.update_interval("15m");

    let charts = charts_of(&service);
    assert_eq!(charts[0].interval, "1d");
    assert_eq!(charts[1].interval, "15m");
}

#[test]
fn add_chart_allocates_max_plus_one() {
    let service = service();
    assert_eq!(service.add_chart(), ChartId::from(2));
    assert_eq!(service.add_chart(), ChartId::from(3));

    // Freeing a lower id does not recycle it.
    service.remove_chart(ChartId::from(2));
    assert_eq!(service.add_chart(), ChartId::from(4));
}

#[test]
fn add_chart_on_empty_workspace_starts_at_one() {
    let service = service();
    service.set_charts(Vec::new());
    assert_eq!(service.add_chart(), ChartId::FIRST);
}

#[test]
fn new_chart_is_fully_defaulted() {
    let service = service();
    let id = service.add_chart();
    let chart = charts_of(&service).into_iter().find(|c| c.id == id).expect("new chart");
    assert_eq!(chart.symbol, "NIFTY 50");
    assert_eq!(chart.exchange, "NSE");
    assert_eq!(chart.interval, "1d");
    assert!(chart.indicators.is_empty());
    assert!(chart.comparison_symbols.is_empty());
    assert!(chart.strategy_config.is_none());
}

#[test]
fn removing_the_last_chart_is_refused() {
    let service = service();
    let before = charts_of(&service);

    service.remove_chart(ChartId::FIRST);

    let after = charts_of(&service);
    assert_eq!(after.len(), 1);
    assert!(Arc::ptr_eq(&before[0], &after[0]));
}

#[test]
fn add_then_remove_restores_sequence() {
    let service = service();
    service.add_chart();
    let before = charts_of(&service);

    let added = service.add_chart();
    service.remove_chart(added);

    let after = charts_of(&service);
    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert!(Arc::ptr_eq(old, new));
    }
}

#[test]
fn toggle_visibility_twice_roundtrips() {
    let service = service();
    let id = service.add_indicator("sma");
    assert!(charts_of(&service)[0].indicators[0].visible);

    service.toggle_indicator_visibility(&id);
    assert!(!charts_of(&service)[0].indicators[0].visible);

    service.toggle_indicator_visibility(&id);
    assert!(charts_of(&service)[0].indicators[0].visible);
}

#[test]
fn toggle_unknown_indicator_is_noop() {
    let service = service();
    service.add_indicator("sma");
    let before = charts_of(&service);

    service.toggle_indicator_visibility(&IndicatorId::from("missing"));

    assert!(Arc::ptr_eq(&before[0], &charts_of(&service)[0]));
}

#[test]
fn indicator_ids_carry_kind_stamp_and_salt() {
    let service = service();
    let id = service.add_indicator("sma");

    let parts: Vec<&str> = id.value().split('_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "sma");
    parts[1].parse::<u64>().expect("millis stamp");
    assert!(parts[2].parse::<u64>().expect("salt") < 1000);
}

#[test]
fn update_indicator_settings_merges() {
    let service = service();
    let id = service.add_indicator("sma");

    let mut patch = SettingsMap::new();
    patch.insert("period".to_string(), json!(50));
    service.update_indicator_settings(&id, patch);

    let settings = charts_of(&service)[0].indicators[0].settings.clone();
    assert_eq!(settings["period"], json!(50));
    assert_eq!(settings["color"], json!("#2196F3"));
}

#[test]
fn set_indicators_replaces_list() {
    let service = service();
    service.add_indicator("sma");
    service.add_indicator("ema");

    let kept = Indicator::new(IndicatorId::from("tpo_1_1"), "tpo", SettingsMap::new());
    service.set_indicators(vec![kept]);

    let charts = charts_of(&service);
    assert_eq!(charts[0].indicators.len(), 1);
    assert_eq!(charts[0].indicators[0].kind, "tpo");
}

#[test]
fn remove_indicator_targets_active_chart() {
    let service = service();
    let id = service.add_indicator("sma");
    service.remove_indicator(&id);
    assert!(charts_of(&service)[0].indicators.is_empty());
}

#[test]
fn active_ticker_reads_active_instrument() {
    let service = service();
    service.market_data().update_ticker("NIFTY 50", Some("NSE"), QuotePatch::quote(22000.0, 5.0));

    let snap = service.active_ticker().expect("snapshot");
    assert_eq!(snap.ltp, Some(22000.0));

    service.update_symbol("TCS", None);
    assert!(service.active_ticker().is_none());
}
