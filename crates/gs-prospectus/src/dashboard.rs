//! Assemble everything the prospectus page shows from one round of fetches.

use serde::Serialize;
use tracing::{info, warn};

use crate::constants::{COST_ERROR_MESSAGE, REVENUE_FALLBACK_MESSAGE};
use crate::costs::{aggregate_buckets, expand_all};
use crate::error::FetchError;
use crate::format::format_kpi;
use crate::types::{
    ChartRow, CostConfig, CostMode, CostSeries, HeadlineKpi, KpiSummary, RevenuePoint, Scenario, TotalPoint,
};
use crate::xano::{RevenueResult, XanoClient};

/// KPI keys shown in the headline strip, in display order.
const HEADLINE_KPIS: [(&str, &str); 5] = [
    ("stylists", "Estetiste"),
    ("salons", "Saloni"),
    ("proStylists", "Estetiste PRO"),
    ("proInfluencers", "Influencer PRO"),
    ("bookingsMonth24", "Cabina prenot./mese 24"),
];

/// Cost histogram data in both modes, so the toggle never refetches.
#[derive(Debug, Clone, Serialize)]
pub struct CostPanel {
    pub series: Vec<CostSeries>,
    pub sum: Vec<ChartRow>,
    pub average: Vec<ChartRow>,
}

impl CostPanel {
    pub fn from_series(series: Vec<CostSeries>) -> Self {
        let sum = aggregate_buckets(&series, CostMode::Sum);
        let average = aggregate_buckets(&series, CostMode::Average);
        Self { series, sum, average }
    }

    pub fn rows(&self, mode: CostMode) -> &[ChartRow] {
        match mode {
            CostMode::Sum => &self.sum,
            CostMode::Average => &self.average,
        }
    }
}

/// Everything needed to render the dashboard once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub scenario: Scenario,
    pub revenue: Vec<RevenuePoint>,
    pub totals: Vec<TotalPoint>,
    pub used_fallback: bool,
    /// Advisory shown above the charts when revenue fell back to demo data
    pub advisory: Option<String>,
    pub headline_kpis: Vec<HeadlineKpi>,
    pub costs: Option<CostPanel>,
    /// Shown in place of the cost histogram when the configuration failed to load
    pub cost_error: Option<String>,
    pub generated_at: String,
}

/// Monthly totals across all four streams.
pub fn total_series(points: &[RevenuePoint]) -> Vec<TotalPoint> {
    points
        .iter()
        .map(|p| TotalPoint {
            month: p.month,
            total: p.total(),
        })
        .collect()
}

/// Pick and format the headline KPIs; non-numeric or missing keys are skipped.
pub fn headline_kpis(summary: Option<&KpiSummary>) -> Vec<HeadlineKpi> {
    let Some(summary) = summary else {
        return Vec::new();
    };
    HEADLINE_KPIS
        .iter()
        .filter_map(|(key, label)| {
            summary.get(*key).map(|value| HeadlineKpi {
                key: key.to_string(),
                label: label.to_string(),
                value: format_kpi(*value),
            })
        })
        .collect()
}

impl DashboardSnapshot {
    /// Combine fetched pieces; pure so it can be tested without a backend.
    pub fn assemble(
        revenue: RevenueResult,
        kpis: Option<KpiSummary>,
        costs: Result<Vec<CostConfig>, FetchError>,
    ) -> Self {
        let (costs, cost_error) = match costs {
            Ok(configs) => (Some(CostPanel::from_series(expand_all(&configs))), None),
            Err(e) => {
                warn!(error = %e, "Failed to load cost configuration");
                (None, Some(COST_ERROR_MESSAGE.to_string()))
            }
        };

        Self {
            scenario: revenue.scenario,
            totals: total_series(&revenue.data),
            advisory: revenue.used_fallback.then(|| REVENUE_FALLBACK_MESSAGE.to_string()),
            used_fallback: revenue.used_fallback,
            revenue: revenue.data,
            headline_kpis: headline_kpis(kpis.as_ref()),
            costs,
            cost_error,
            generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Fetch revenue, KPIs and cost configuration concurrently and assemble them.
///
/// Never fails: every backend problem degrades to a fallback or an advisory.
pub async fn load_dashboard(client: &XanoClient, scenario: Scenario) -> DashboardSnapshot {
    let ((revenue, kpis), costs) = futures::join!(
        async { futures::join!(client.fetch_revenue(scenario), client.fetch_kpis()) },
        client.fetch_cost_config(),
    );

    info!(
        %scenario,
        months = revenue.data.len(),
        fallback = revenue.used_fallback,
        kpis = kpis.as_ref().map_or(0, |k| k.len()),
        cost_lines = costs.as_ref().map_or(0, |c| c.len()),
        "Dashboard data loaded"
    );

    DashboardSnapshot::assemble(revenue, kpis, costs)
}
