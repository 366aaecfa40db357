//! Cost expansion and 4-month bucket aggregation.

use crate::constants::{BUCKETS, HORIZON_MONTHS};
use crate::numeric::round_to;
use crate::types::{ChartRow, CostConfig, CostMode, CostSeries};

// ── Expansion ─────────────────────────────────────────────────────────────────

/// Does `config` charge its amount in `month`?
fn is_billed(config: &CostConfig, month: u32) -> bool {
    if month < config.start_month || month > config.end_month {
        return false;
    }
    match config.frequency {
        0 => month == config.start_month,
        1 => true,
        n => (month - config.start_month) % n == 0,
    }
}

/// Lay a cost configuration out over the 24-month horizon.
///
/// Inverted or out-of-horizon ranges simply produce an all-zero series.
pub fn expand_config(config: &CostConfig) -> CostSeries {
    let mut monthly = [0.0; HORIZON_MONTHS];
    for (slot, month) in monthly.iter_mut().zip(1..=HORIZON_MONTHS as u32) {
        if is_billed(config, month) {
            *slot = config.amount;
        }
    }

    CostSeries {
        key: config.key.clone(),
        label: config.label.clone(),
        color: config.color.clone(),
        monthly,
    }
}

/// Expand every configuration, preserving order.
pub fn expand_all(configs: &[CostConfig]) -> Vec<CostSeries> {
    configs.iter().map(expand_config).collect()
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Display label of a bucket, e.g. `5–8`.
pub fn bucket_label(start: u32, end: u32) -> String {
    format!("{}\u{2013}{}", start, end)
}

/// Reduce each series to one value per fixed 4-month bucket.
///
/// `Average` is the mean monthly cost inside the bucket, rounded to cents.
pub fn aggregate_buckets(series: &[CostSeries], mode: CostMode) -> Vec<ChartRow> {
    if series.is_empty() {
        return Vec::new();
    }

    BUCKETS
        .iter()
        .map(|&(start, end)| {
            let span = (start as usize - 1)..(end as usize);
            let divisor = f64::from(end - start + 1);
            let values = series
                .iter()
                .map(|item| {
                    let sum: f64 = item.monthly[span.clone()].iter().sum();
                    let value = match mode {
                        CostMode::Sum => sum,
                        CostMode::Average => round_to(sum / divisor, 2),
                    };
                    (item.key.clone(), value)
                })
                .collect();
            ChartRow {
                bucket: bucket_label(start, end),
                values,
            }
        })
        .collect()
}
