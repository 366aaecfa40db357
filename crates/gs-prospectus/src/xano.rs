//! Xano backend client
//!
//! One attempt per call, no retries and no response caching: the dashboard
//! always shows the backend's current numbers or, failing that, a fallback.

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Endpoints;
use crate::demo::build_demo_data;
use crate::error::FetchError;
use crate::mapper::{map_cost_rows, map_revenue_rows};
use crate::scenario::scale_series;
use crate::types::{CostConfig, KpiSummary, RevenuePoint, Scenario};

/// Revenue series plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueResult {
    pub scenario: Scenario,
    pub data: Vec<RevenuePoint>,
    /// true when the backend failed and `data` is the scaled demo curve
    pub used_fallback: bool,
}

/// Demo curve scaled for `scenario`.
pub fn fallback_revenue(scenario: Scenario) -> RevenueResult {
    RevenueResult {
        scenario,
        data: scale_series(&build_demo_data(), scenario),
        used_fallback: true,
    }
}

/// HTTP client bound to a set of resolved endpoints.
#[derive(Debug, Clone)]
pub struct XanoClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl XanoClient {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(5);
        if let Some(timeout) = endpoints.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn revenue_url(&self, scenario: Scenario) -> Result<String, FetchError> {
        let mut url =
            Url::parse(&self.endpoints.revenue).map_err(|_| FetchError::InvalidUrl(self.endpoints.revenue.clone()))?;
        url.query_pairs_mut().append_pair("scenario", scenario.as_str());
        Ok(url.into())
    }

    /// Fetch and map the revenue series for `scenario`, surfacing every failure.
    pub async fn try_fetch_revenue(&self, scenario: Scenario) -> Result<Vec<RevenuePoint>, FetchError> {
        let url = self.revenue_url(scenario)?;
        let payload = self.get_json(&url).await?;
        map_revenue_rows(&payload)
    }

    /// Revenue for `scenario`, falling back to the scaled demo curve.
    ///
    /// Backend rows are already scenario-specific and are returned unscaled.
    pub async fn fetch_revenue(&self, scenario: Scenario) -> RevenueResult {
        match self.try_fetch_revenue(scenario).await {
            Ok(data) => RevenueResult {
                scenario,
                data,
                used_fallback: false,
            },
            Err(e) => {
                warn!(%scenario, error = %e, "Failed to load revenue data, using demo data");
                fallback_revenue(scenario)
            }
        }
    }

    /// KPI summary; any failure yields `None` and the headline strip is hidden.
    pub async fn fetch_kpis(&self) -> Option<KpiSummary> {
        let payload = match self.get_json(&self.endpoints.kpis).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to load KPI summary");
                return None;
            }
        };

        let Value::Object(fields) = payload else {
            warn!("KPI summary is not an object, ignoring");
            return None;
        };

        Some(
            fields
                .into_iter()
                .filter_map(|(key, value)| value.as_f64().filter(|v| v.is_finite()).map(|v| (key, v)))
                .collect(),
        )
    }

    /// Cost configuration; failures are returned for the caller to present.
    pub async fn fetch_cost_config(&self) -> Result<Vec<CostConfig>, FetchError> {
        let payload = self.get_json(&self.endpoints.costs).await?;
        map_cost_rows(&payload)
    }
}
