use chart_workspace::WorkspaceStore;
use chart_workspace::domain::workspace::{
    Chart, ChartId, ChartPatch, Indicator, IndicatorId, IndicatorPatch, Layout, SettingsMap,
};
use leptos::*;
use serde_json::json;
use std::sync::Arc;

fn chart(id: u32, symbol: &str) -> Arc<Chart> {
    let mut chart = Chart::new(ChartId::from(id));
    chart.symbol = symbol.to_string();
    Arc::new(chart)
}

fn store_with(charts: Vec<Arc<Chart>>) -> WorkspaceStore {
    WorkspaceStore::with_charts(charts, ChartId::FIRST)
}

fn charts_of(store: &WorkspaceStore) -> Vec<Arc<Chart>> {
    store.charts().get_untracked()
}

fn indicator(id: &str, kind: &str) -> Indicator {
    Indicator::new(IndicatorId::from(id), kind, SettingsMap::new())
}

#[test]
fn update_chart_merges_fields() {
    let store = store_with(vec![chart(1, "NIFTY 50")]);
    store.update_chart(
        ChartId::from(1),
        ChartPatch {
            symbol: Some("TCS".to_string()),
            interval: Some("5m".to_string()),
            ..Default::default()
        },
    );

    let charts = charts_of(&store);
    assert_eq!(charts[0].symbol, "TCS");
    assert_eq!(charts[0].interval, "5m");
    assert_eq!(charts[0].exchange, "NSE");
}

#[test]
fn update_chart_keeps_position_and_neighbors() {
    let store = store_with(vec![chart(1, "A"), chart(2, "B"), chart(3, "C")]);
    let before = charts_of(&store);

    store.update_chart(
        ChartId::from(2),
        ChartPatch { symbol: Some("B2".to_string()), ..Default::default() },
    );

    let after = charts_of(&store);
    assert_eq!(after[1].id, ChartId::from(2));
    assert_eq!(after[1].symbol, "B2");
    assert!(Arc::ptr_eq(&before[0], &after[0]));
    assert!(Arc::ptr_eq(&before[2], &after[2]));
    assert!(!Arc::ptr_eq(&before[1], &after[1]));
}

#[test]
fn update_chart_unknown_id_is_noop() {
    let store = store_with(vec![chart(1, "A"), chart(2, "B")]);
    let before = charts_of(&store);

    store.update_chart(
        ChartId::from(99),
        ChartPatch { symbol: Some("X".to_string()), ..Default::default() },
    );

    let after = charts_of(&store);
    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert!(Arc::ptr_eq(old, new));
    }
}

#[test]
fn identical_patch_is_suppressed() {
    let store = store_with(vec![chart(1, "A")]);
    let before = charts_of(&store);

    store.update_chart(
        ChartId::from(1),
        ChartPatch { symbol: Some("A".to_string()), ..Default::default() },
    );

    assert!(Arc::ptr_eq(&before[0], &charts_of(&store)[0]));
}

#[test]
fn add_indicator_appends_in_order() {
    let store = store_with(vec![chart(1, "A")]);
    store.add_indicator(ChartId::from(1), indicator("sma_1_1", "sma"));
    store.add_indicator(ChartId::from(1), indicator("ema_2_2", "ema"));

    let charts = charts_of(&store);
    let ids: Vec<&str> =
        charts[0].indicators.iter().map(|indicator| indicator.id.value()).collect();
    assert_eq!(ids, vec!["sma_1_1", "ema_2_2"]);
}

#[test]
fn add_indicator_unknown_chart_is_noop() {
    let store = store_with(vec![chart(1, "A")]);
    let before = charts_of(&store);

    store.add_indicator(ChartId::from(7), indicator("sma_1_1", "sma"));

    assert!(Arc::ptr_eq(&before[0], &charts_of(&store)[0]));
}

#[test]
fn update_indicator_merges_settings() {
    let store = store_with(vec![chart(1, "A")]);
    let mut seeded = SettingsMap::new();
    seeded.insert("period".to_string(), json!(20));
    seeded.insert("color".to_string(), json!("#2196F3"));
    store.add_indicator(
        ChartId::from(1),
        Indicator::new(IndicatorId::from("sma_1_1"), "sma", seeded),
    );

    let mut patch = SettingsMap::new();
    patch.insert("period".to_string(), json!(50));
    store.update_indicator(
        ChartId::from(1),
        &IndicatorId::from("sma_1_1"),
        IndicatorPatch::settings(patch),
    );

    let charts = charts_of(&store);
    let settings = &charts[0].indicators[0].settings;
    assert_eq!(settings["period"], json!(50));
    assert_eq!(settings["color"], json!("#2196F3"));
}

#[test]
fn update_indicator_unknown_id_is_noop() {
    let store = store_with(vec![chart(1, "A")]);
    store.add_indicator(ChartId::from(1), indicator("sma_1_1", "sma"));
    let before = charts_of(&store);

    store.update_indicator(
        ChartId::from(1),
        &IndicatorId::from("missing"),
        IndicatorPatch::visibility(false),
    );

    assert!(Arc::ptr_eq(&before[0], &charts_of(&store)[0]));
}

#[test]
fn remove_indicator_removes_only_target() {
    let store = store_with(vec![chart(1, "A")]);
    store.add_indicator(ChartId::from(1), indicator("sma_1_1", "sma"));
    store.add_indicator(ChartId::from(1), indicator("ema_2_2", "ema"));

    store.remove_indicator(ChartId::from(1), &IndicatorId::from("sma_1_1"));

    let charts = charts_of(&store);
    assert_eq!(charts[0].indicators.len(), 1);
    assert_eq!(charts[0].indicators[0].id.value(), "ema_2_2");
}

#[test]
fn remove_chart_is_unconditional_at_store_level() {
    // The at-least-one-chart guard belongs to the service; the store removes
    // whatever it is asked to remove.
    let store = store_with(vec![chart(1, "A")]);
    store.remove_chart(ChartId::from(1));
    assert!(charts_of(&store).is_empty());
}

#[test]
fn setters_replace_wholesale() {
    let store = store_with(vec![chart(1, "A")]);
    store.set_charts(vec![chart(5, "E"), chart(6, "F")]);
    store.set_active_chart_id(ChartId::from(6));
    store.set_layout(Layout::from("2x2"));

    assert_eq!(charts_of(&store).len(), 2);
    assert_eq!(store.active_chart_id().get_untracked(), ChartId::from(6));
    assert_eq!(store.layout().get_untracked(), Layout::from("2x2"));
}
