//! Normalize Xano rows into engine types.
//!
//! The revenue table has been exported under two naming schemes over time
//! (`Mese`/`Rev_Estetiste_PRO` from the Italian spreadsheet import, and the
//! camelCase names the dashboard itself uses), so every column is resolved
//! through a short alias list. The first alias holding a usable number wins;
//! `null` or blank cells fall through to the next alias.

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::constants::{COST_PALETTE, HORIZON_MONTHS};
use crate::error::FetchError;
use crate::numeric::{coerce_number, try_number};
use crate::types::{CostConfig, RevenuePoint};

const MONTH_FIELDS: &[&str] = &["month", "Mese", "mese"];
const EST_PRO_FIELDS: &[&str] = &["estPro", "Rev_Estetiste_PRO"];
const INF_PRO_FIELDS: &[&str] = &["infPro", "Rev_Influencer_PRO"];
const CABINA_FIELDS: &[&str] = &["cabina", "Rev_Cabina", "Rev_Cabina_Sharing"];
const SALONI_PRO_FIELDS: &[&str] = &["saloniPro", "Rev_Saloni_PRO"];

fn usable_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        other => try_number(other),
    }
}

fn aliased_number(row: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .filter_map(|name| row.get(*name))
        .find_map(usable_number)
}

fn number_field(row: &Map<String, Value>, aliases: &[&str]) -> f64 {
    aliased_number(row, aliases).unwrap_or(0.0)
}

fn text_field(row: &Map<String, Value>, name: &str) -> Option<String> {
    match row.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ── Revenue ─────────────────────────────────────────────────────────────────

/// Map a revenue payload into a month-sorted series.
///
/// Rows without a month in `(0, 24]` are dropped; fractional months round up
/// into the month they fall in. Duplicate months are kept as-is; the backend
/// is expected to send one row per month.
pub fn map_revenue_rows(payload: &Value) -> Result<Vec<RevenuePoint>, FetchError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| FetchError::Malformed(format!("expected an array of revenue rows, got {}", kind(payload))))?;

    let mut points: Vec<RevenuePoint> = rows.iter().filter_map(map_revenue_row).collect();

    let dropped = rows.len() - points.len();
    if dropped > 0 {
        debug!(dropped, total = rows.len(), "Dropped revenue rows without a valid month");
    }

    if points.is_empty() {
        return Err(FetchError::Empty);
    }

    points.sort_by_key(|p| p.month);
    Ok(points)
}

fn map_revenue_row(row: &Value) -> Option<RevenuePoint> {
    let row = row.as_object()?;
    let month = aliased_number(row, MONTH_FIELDS)?;
    if month <= 0.0 || month > HORIZON_MONTHS as f64 {
        return None;
    }

    Some(RevenuePoint {
        month: month.ceil().max(1.0) as u32,
        est_pro: number_field(row, EST_PRO_FIELDS).round(),
        inf_pro: number_field(row, INF_PRO_FIELDS).round(),
        cabina: number_field(row, CABINA_FIELDS).round(),
        saloni_pro: number_field(row, SALONI_PRO_FIELDS).round(),
    })
}

// ── Costs ───────────────────────────────────────────────────────────────────

/// Map the cost configuration table.
///
/// Only a non-array payload is an error; an empty table is a valid (empty)
/// configuration. Keys are unique in the result: a repeated key gets a
/// numeric suffix.
pub fn map_cost_rows(payload: &Value) -> Result<Vec<CostConfig>, FetchError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| FetchError::Malformed(format!("expected an array of cost rows, got {}", kind(payload))))?;

    let mut configs: Vec<CostConfig> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| row.as_object().map(|row| map_cost_row(index, row)))
        .collect();

    let mut seen: HashSet<String> = configs.iter().map(|c| c.key.clone()).collect();
    if seen.len() < configs.len() {
        let mut claimed = HashSet::new();
        for config in &mut configs {
            if claimed.insert(config.key.clone()) {
                continue;
            }
            let unique = (2..)
                .map(|n| format!("{}-{}", config.key, n))
                .find(|candidate| !seen.contains(candidate))
                .unwrap_or_default();
            warn!(id = %config.id, key = %config.key, renamed = %unique, "Duplicate cost key");
            seen.insert(unique.clone());
            claimed.insert(unique.clone());
            config.key = unique;
        }
    }

    Ok(configs)
}

fn map_cost_row(index: usize, row: &Map<String, Value>) -> CostConfig {
    let id = text_field(row, "id").unwrap_or_else(|| (index + 1).to_string());
    let key = text_field(row, "key").unwrap_or_else(|| format!("cost-{}", id));
    let label = text_field(row, "label").unwrap_or_else(|| key.clone());
    let color = text_field(row, "color").unwrap_or_else(|| COST_PALETTE[index % COST_PALETTE.len()].to_string());

    let frequency = row.get("frequency").map(coerce_number).unwrap_or(0.0).max(0.0).floor() as u32;
    let start_month = month_field(row, "start_month", 1);
    let end_month = month_field(row, "end_month", HORIZON_MONTHS as u32);

    CostConfig {
        id,
        key,
        label,
        amount: row.get("amount").map(coerce_number).unwrap_or(0.0),
        frequency,
        start_month,
        end_month,
        color,
    }
}

/// Month column clamped to the horizon; absent or unparseable uses `default`.
fn month_field(row: &Map<String, Value>, name: &str, default: u32) -> u32 {
    match row.get(name).and_then(try_number) {
        Some(m) => m.round().clamp(1.0, HORIZON_MONTHS as f64) as u32,
        None => default,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn italian_columns_are_coerced_and_sorted() {
        let payload = json!([
            {"Mese": "2", "Rev_Estetiste_PRO": "50", "Rev_Influencer_PRO": "10.6", "Rev_Cabina": 3, "Rev_Saloni_PRO": null},
            {"Mese": 1, "Rev_Estetiste_PRO": 0, "Rev_Influencer_PRO": 0, "Rev_Cabina": 0, "Rev_Saloni_PRO": 0},
        ]);
        let points = map_revenue_rows(&payload).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].month, 1);
        assert_eq!(points[1].month, 2);
        assert_eq!(points[1].est_pro, 50.0);
        assert_eq!(points[1].inf_pro, 11.0);
        assert_eq!(points[1].cabina, 3.0);
        assert_eq!(points[1].saloni_pro, 0.0);
    }

    #[test]
    fn camel_case_columns_are_accepted() {
        let payload = json!([{"month": 5, "estPro": 1, "infPro": 2, "cabina": 3, "saloniPro": 4}]);
        let points = map_revenue_rows(&payload).unwrap();
        assert_eq!(points[0].total(), 10.0);
    }

    #[test]
    fn rows_without_valid_month_are_dropped() {
        let payload = json!([
            {"Mese": "abc", "Rev_Estetiste_PRO": 99},
            {"Mese": 0, "Rev_Estetiste_PRO": 99},
            {"Mese": -4, "Rev_Estetiste_PRO": 99},
            {"Rev_Estetiste_PRO": 99},
            {"Mese": 25, "Rev_Estetiste_PRO": 99},
            "not an object",
            {"Mese": 3, "Rev_Estetiste_PRO": 7},
        ]);
        let points = map_revenue_rows(&payload).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].month, 3);
        assert_eq!(points[0].est_pro, 7.0);
    }

    #[test]
    fn null_first_alias_falls_through() {
        let payload = json!([
            {"month": null, "Mese": 3, "estPro": null, "Rev_Estetiste_PRO": 50, "cabina": " ", "Rev_Cabina": "4"},
            {"month": 1, "estPro": 10},
        ]);
        let points = map_revenue_rows(&payload).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].month, 3);
        assert_eq!(points[1].est_pro, 50.0);
        assert_eq!(points[1].cabina, 4.0);
    }

    #[test]
    fn fractional_months_round_up_inside_horizon() {
        let payload = json!([
            {"Mese": 0.4, "estPro": 5},
            {"Mese": 23.2, "estPro": 6},
            {"Mese": 24.0, "estPro": 7},
            {"Mese": 24.6, "estPro": 8},
        ]);
        let points = map_revenue_rows(&payload).unwrap();
        let months: Vec<u32> = points.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![1, 24, 24]);
        assert_eq!(points[0].est_pro, 5.0);
    }

    #[test]
    fn duplicate_months_are_kept_in_order() {
        let payload = json!([
            {"month": 2, "estPro": 1},
            {"month": 1, "estPro": 5},
            {"month": 2, "estPro": 2},
        ]);
        let points = map_revenue_rows(&payload).unwrap();
        let months: Vec<u32> = points.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![1, 2, 2]);
        assert_eq!(points[1].est_pro, 1.0);
        assert_eq!(points[2].est_pro, 2.0);
    }

    #[test]
    fn non_array_is_malformed() {
        assert!(matches!(
            map_revenue_rows(&json!({"rows": []})),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn empty_after_mapping_is_an_error() {
        assert!(matches!(map_revenue_rows(&json!([])), Err(FetchError::Empty)));
        assert!(matches!(
            map_revenue_rows(&json!([{"Mese": "abc"}])),
            Err(FetchError::Empty)
        ));
    }

    #[test]
    fn cost_rows_are_normalized() {
        let payload = json!([
            {"id": 7, "key": "hosting", "label": "Hosting", "amount": "120", "frequency": "1",
             "start_month": 0, "end_month": 40, "color": "#111111"},
            {"id": "x2", "amount": 50, "frequency": -3, "start_month": "5"},
        ]);
        let costs = map_cost_rows(&payload).unwrap();
        assert_eq!(costs.len(), 2);

        let hosting = &costs[0];
        assert_eq!(hosting.id, "7");
        assert_eq!(hosting.amount, 120.0);
        assert_eq!(hosting.frequency, 1);
        assert_eq!(hosting.start_month, 1);
        assert_eq!(hosting.end_month, 24);
        assert_eq!(hosting.color, "#111111");

        let second = &costs[1];
        assert_eq!(second.key, "cost-x2");
        assert_eq!(second.label, "cost-x2");
        assert_eq!(second.frequency, 0);
        assert_eq!(second.start_month, 5);
        assert_eq!(second.end_month, 24);
        assert_eq!(second.color, COST_PALETTE[1]);
    }

    #[test]
    fn duplicate_cost_keys_are_made_unique() {
        let payload = json!([
            {"id": 1, "key": "infra", "amount": 100},
            {"id": 2, "key": "infra", "amount": 200},
            {"id": 3, "key": "infra-2", "amount": 300},
            {"id": 4, "amount": 10},
            {"id": 5, "key": "cost-4", "amount": 20},
        ]);
        let keys: Vec<String> = map_cost_rows(&payload).unwrap().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["infra", "infra-3", "infra-2", "cost-4", "cost-4-2"]);
    }

    #[test]
    fn cost_payload_must_be_array() {
        assert!(matches!(map_cost_rows(&json!("nope")), Err(FetchError::Malformed(_))));
        assert!(map_cost_rows(&json!([])).unwrap().is_empty());
    }
}
