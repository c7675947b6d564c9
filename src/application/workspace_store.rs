use leptos::*;
use std::sync::Arc;

use crate::domain::logging::LogComponent;
use crate::domain::workspace::{
    Chart, ChartId, ChartPatch, Indicator, IndicatorId, IndicatorPatch, Layout,
};
use crate::log_trace;

/// Reactive store owning the chart list, the active selection and the layout.
///
/// Charts are shared via `Arc`: a mutation republishes only the targeted
/// chart, untouched entries keep pointer identity and unrelated subscribers
/// see no change. That stability is part of the contract, not an
/// optimization.
#[derive(Clone, Copy)]
pub struct WorkspaceStore {
    charts: RwSignal<Vec<Arc<Chart>>>,
    active_chart_id: RwSignal<ChartId>,
    layout: RwSignal<Layout>,
}

impl WorkspaceStore {
    /// Fresh workspace: one defaulted chart, selected. A workspace never has
    /// fewer than one chart.
    pub fn new() -> Self {
        Self::with_charts(vec![Arc::new(Chart::new(ChartId::FIRST))], ChartId::FIRST)
    }

    /// Store seeded with an explicit chart list. `active` may be stale; the
    /// adapter falls back to the first chart on read.
    pub fn with_charts(charts: Vec<Arc<Chart>>, active: ChartId) -> Self {
        Self {
            charts: create_rw_signal(charts),
            active_chart_id: create_rw_signal(active),
            layout: create_rw_signal(Layout::default()),
        }
    }

    pub fn charts(&self) -> RwSignal<Vec<Arc<Chart>>> {
        self.charts
    }

    pub fn active_chart_id(&self) -> RwSignal<ChartId> {
        self.active_chart_id
    }

    pub fn layout(&self) -> RwSignal<Layout> {
        self.layout
    }

    /// Unconditional replace; no validation beyond the type.
    pub fn set_charts(&self, charts: Vec<Arc<Chart>>) {
        self.charts.set(charts);
    }

    pub fn set_active_chart_id(&self, id: ChartId) {
        self.active_chart_id.set(id);
    }

    pub fn set_layout(&self, layout: Layout) {
        self.layout.set(layout);
    }

    /// Merge partial fields into the chart with `id`, keeping its position in
    /// the sequence. Complete no-op when the chart is missing or nothing
    /// differed.
    pub fn update_chart(&self, id: ChartId, patch: ChartPatch) {
        self.amend_chart(id, "update_chart", move |chart| {
            let mut next = chart.clone();
            next.apply(patch).then_some(next)
        });
    }

    /// Append an indicator to the chart's sequence; no-op when the chart is
    /// missing.
    pub fn add_indicator(&self, chart_id: ChartId, indicator: Indicator) {
        self.amend_chart(chart_id, "add_indicator", move |chart| {
            let mut next = chart.clone();
            next.add_indicator(indicator);
            Some(next)
        });
    }

    /// Shallow-merge settings (and/or visibility) into the matching
    /// indicator; no-op when the chart or indicator is missing.
    pub fn update_indicator(&self, chart_id: ChartId, indicator_id: &IndicatorId, patch: IndicatorPatch) {
        self.amend_chart(chart_id, "update_indicator", move |chart| {
            let mut next = chart.clone();
            next.update_indicator(indicator_id, patch).then_some(next)
        });
    }

    /// Remove by id; no-op when absent.
    pub fn remove_indicator(&self, chart_id: ChartId, indicator_id: &IndicatorId) {
        self.amend_chart(chart_id, "remove_indicator", move |chart| {
            let mut next = chart.clone();
            next.remove_indicator(indicator_id).then_some(next)
        });
    }

    /// Append a fully-formed chart. Id uniqueness is the caller's concern.
    pub fn add_chart(&self, chart: Chart) {
        self.charts.update(|charts| charts.push(Arc::new(chart)));
    }

    /// Remove unconditionally when present. The at-least-one-chart guard
    /// lives at the service boundary, not here.
    pub fn remove_chart(&self, chart_id: ChartId) {
        let present = self.charts.with_untracked(|charts| charts.iter().any(|c| c.id == chart_id));
        if !present {
            log_trace!(
                LogComponent::Application("WorkspaceStore"),
                "remove_chart: chart {chart_id} not found"
            );
            return;
        }
        self.charts.update(|charts| charts.retain(|c| c.id != chart_id));
    }

    /// Clone-apply-diff on one chart: publishes a single `Arc` replacement at
    /// the chart's index, or nothing at all.
    fn amend_chart(&self, id: ChartId, op: &'static str, mutate: impl FnOnce(&Chart) -> Option<Chart>) {
        let staged = self.charts.with_untracked(|charts| {
            let index = charts.iter().position(|c| c.id == id)?;
            mutate(&charts[index]).map(|next| (index, Arc::new(next)))
        });
        match staged {
            Some((index, next)) => self.charts.update(|charts| charts[index] = next),
            None => {
                log_trace!(
                    LogComponent::Application("WorkspaceStore"),
                    "{op}: chart {id} missing or unchanged"
                );
            }
        }
    }
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}
