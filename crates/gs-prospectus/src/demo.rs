//! Built-in 24-month revenue curve used when the backend is unavailable.

use crate::constants::HORIZON_MONTHS;
use crate::types::RevenuePoint;

/// Realistic-scenario baseline, one point per month 1..=24.
///
/// - Estetiste PRO launches in month 6 with logarithmic growth.
/// - Influencer PRO launches in month 12 with logarithmic growth.
/// - Cabina-sharing follows a logistic curve centred on month 18, plateau 500.
/// - Saloni PRO launches in month 12 and steepens from month 18.
pub fn build_demo_data() -> Vec<RevenuePoint> {
    (1..=HORIZON_MONTHS as u32).map(demo_point).collect()
}

fn demo_point(month: u32) -> RevenuePoint {
    let m = f64::from(month);

    let est_pro = if month < 6 { 0.0 } else { (200.0 * m.ln()).round() };
    let inf_pro = if month < 12 { 0.0 } else { (250.0 * (m - 10.0).ln()).round() };
    let cabina = (500.0 / (1.0 + (-0.35 * (m - 18.0)).exp())).round();
    let saloni_pro = if month < 12 {
        0.0
    } else if month >= 18 {
        ((m - 11.0) * 90.0).round()
    } else {
        ((m - 11.0) * 50.0).round()
    };

    RevenuePoint {
        month,
        est_pro,
        inf_pro,
        cabina,
        saloni_pro,
    }
}
