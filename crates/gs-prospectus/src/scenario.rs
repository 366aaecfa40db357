//! Scenario scaling of revenue series.

use crate::types::{RevenuePoint, Scenario};

/// Scale every stream by the scenario's multiplier, rounding to whole euros.
///
/// Applying this twice compounds the factor; callers scale once per fetch.
pub fn scale_series(points: &[RevenuePoint], scenario: Scenario) -> Vec<RevenuePoint> {
    let factor = scenario.multiplier();
    if factor == 1.0 {
        return points.to_vec();
    }
    points.iter().map(|p| scale_point(p, factor)).collect()
}

fn scale_point(point: &RevenuePoint, factor: f64) -> RevenuePoint {
    RevenuePoint {
        month: point.month,
        est_pro: (point.est_pro * factor).round(),
        inf_pro: (point.inf_pro * factor).round(),
        cabina: (point.cabina * factor).round(),
        saloni_pro: (point.saloni_pro * factor).round(),
    }
}
