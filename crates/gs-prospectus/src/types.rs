//! Core data types shared by the engine, the reports and the web server.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::HORIZON_MONTHS;

// ── Revenue ─────────────────────────────────────────────────────────────────

/// Projected revenue for one month, split by stream (EUR).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub month: u32,
    pub est_pro: f64,
    pub inf_pro: f64,
    pub cabina: f64,
    pub saloni_pro: f64,
}

impl RevenuePoint {
    /// Sum of all four streams.
    pub fn total(&self) -> f64 {
        self.est_pro + self.inf_pro + self.cabina + self.saloni_pro
    }

    /// Value of a single stream.
    pub fn stream(&self, stream: Stream) -> f64 {
        match stream {
            Stream::EstPro => self.est_pro,
            Stream::InfPro => self.inf_pro,
            Stream::Cabina => self.cabina,
            Stream::SaloniPro => self.saloni_pro,
        }
    }
}

/// Monthly total across all streams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalPoint {
    pub month: u32,
    pub total: f64,
}

/// One of the four revenue streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    EstPro,
    InfPro,
    Cabina,
    SaloniPro,
}

impl Stream {
    pub const ALL: [Stream; 4] = [Stream::EstPro, Stream::InfPro, Stream::Cabina, Stream::SaloniPro];

    /// JSON field name, matching [`RevenuePoint`]'s serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Self::EstPro => "estPro",
            Self::InfPro => "infPro",
            Self::Cabina => "cabina",
            Self::SaloniPro => "saloniPro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EstPro => "Estetiste PRO",
            Self::InfPro => "Influencer/UGC PRO",
            Self::Cabina => "Cabina-sharing",
            Self::SaloniPro => "Saloni PRO",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::EstPro => "#6366F1",
            Self::InfPro => "#22C55E",
            Self::Cabina => "#F97316",
            Self::SaloniPro => "#14B8A6",
        }
    }
}

// ── Scenario ────────────────────────────────────────────────────────────────

/// Planning scenario; each one scales the revenue projection by a fixed factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Conservative,
    #[default]
    Realistic,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Conservative, Scenario::Realistic, Scenario::Optimistic];

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Conservative => 0.8,
            Self::Realistic => 1.0,
            Self::Optimistic => 1.2,
        }
    }

    /// Wire name, as sent to the backend and used in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Realistic => "realistic",
            Self::Optimistic => "optimistic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Realistic => "Realistic",
            Self::Optimistic => "Optimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "realistic" => Ok(Self::Realistic),
            "optimistic" => Ok(Self::Optimistic),
            other => Err(format!(
                "unknown scenario '{}' (expected conservative, realistic or optimistic)",
                other
            )),
        }
    }
}

// ── Costs ───────────────────────────────────────────────────────────────────

/// One recurring or one-off cost line as configured in the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostConfig {
    pub id: String,
    pub key: String,
    pub label: String,
    pub amount: f64,
    /// 0 = one-shot at `start_month`, 1 = monthly, n = every n months
    pub frequency: u32,
    pub start_month: u32,
    pub end_month: u32,
    pub color: String,
}

/// A cost line expanded over the planning horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSeries {
    pub key: String,
    pub label: String,
    pub color: String,
    pub monthly: [f64; HORIZON_MONTHS],
}

impl CostSeries {
    pub fn total(&self) -> f64 {
        self.monthly.iter().sum()
    }
}

/// How a bucket's four months are reduced to one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    #[default]
    Sum,
    Average,
}

impl CostMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sum => "Sum (4 mesi)",
            Self::Average => "Media mensile",
        }
    }

    /// Decimals shown when formatting amounts in this mode.
    pub fn decimals(self) -> usize {
        match self {
            Self::Sum => 0,
            Self::Average => 2,
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "average" | "avg" => Ok(Self::Average),
            other => Err(format!("unknown cost mode '{}' (expected sum or average)", other)),
        }
    }
}

/// One bucket of the cost histogram.
///
/// Serializes flat, `{"bucket": "1–4", "<key>": value, ...}`, with the series
/// in the order they were aggregated so the chart stacks them consistently.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub bucket: String,
    pub values: Vec<(String, f64)>,
}

impl ChartRow {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

impl Serialize for ChartRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("bucket", &self.bucket)?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ── KPIs ────────────────────────────────────────────────────────────────────

/// Raw KPI summary returned by the backend.
pub type KpiSummary = BTreeMap<String, f64>;

/// A KPI selected for the headline strip, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineKpi {
    pub key: String,
    pub label: String,
    pub value: String,
}
