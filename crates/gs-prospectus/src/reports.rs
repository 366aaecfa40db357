//! Report generation (CSV outputs and console summary)

use anyhow::{Context, Result};
use csv::Writer;
use std::path::{Path, PathBuf};

use crate::dashboard::{CostPanel, DashboardSnapshot};
use crate::format::{format_eur, format_thousands};
use crate::types::{CostMode, Stream};

/// Write `revenue_<scenario>.csv` and, when costs loaded, `costs_<mode>.csv`.
///
/// Returns the paths written.
pub fn generate_csv_reports(output_dir: &Path, snapshot: &DashboardSnapshot, mode: CostMode) -> Result<Vec<PathBuf>> {
    let mut written = vec![generate_revenue_csv(output_dir, snapshot)?];
    if let Some(costs) = &snapshot.costs {
        written.push(generate_cost_csv(output_dir, costs, mode)?);
    }
    Ok(written)
}

/// Generate revenue_<scenario>.csv
fn generate_revenue_csv(output_dir: &Path, snapshot: &DashboardSnapshot) -> Result<PathBuf> {
    let path = output_dir.join(format!("revenue_{}.csv", snapshot.scenario));
    let mut wtr = Writer::from_path(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    let mut header = vec!["Month".to_string()];
    header.extend(Stream::ALL.iter().map(|s| s.label().to_string()));
    header.push("Total".to_string());
    wtr.write_record(&header)?;

    for point in &snapshot.revenue {
        let mut record = vec![point.month.to_string()];
        record.extend(Stream::ALL.iter().map(|s| format!("{:.0}", point.stream(*s))));
        record.push(format!("{:.0}", point.total()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generate costs_<mode>.csv
fn generate_cost_csv(output_dir: &Path, costs: &CostPanel, mode: CostMode) -> Result<PathBuf> {
    let path = output_dir.join(format!("costs_{}.csv", mode));
    let mut wtr = Writer::from_path(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    let mut header = vec!["Months".to_string()];
    header.extend(costs.series.iter().map(|s| s.label.clone()));
    wtr.write_record(&header)?;

    for row in costs.rows(mode) {
        let mut record = vec![row.bucket.clone()];
        record.extend(
            costs
                .series
                .iter()
                .map(|s| format!("{:.*}", mode.decimals(), row.get(&s.key).unwrap_or(0.0))),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Print summary to console
pub fn print_summary(snapshot: &DashboardSnapshot, mode: CostMode) {
    println!("\n============================================================");
    println!("        GLOWSKILL PROSPECTUS ({})", snapshot.scenario.label().to_uppercase());
    println!("============================================================\n");

    if let Some(advisory) = &snapshot.advisory {
        println!("  ⚠️  {}\n", advisory);
    }

    if !snapshot.headline_kpis.is_empty() {
        println!("KEY KPIs");
        println!("------------------------------------------------------------");
        for kpi in &snapshot.headline_kpis {
            println!("  {:<28} {:>14}", kpi.label, kpi.value);
        }
        println!();
    }

    println!("REVENUE (24 months)");
    println!("------------------------------------------------------------");
    let mut grand_total = 0.0;
    for stream in Stream::ALL {
        let total: f64 = snapshot.revenue.iter().map(|p| p.stream(stream)).sum();
        grand_total += total;
        println!("  {:<28} {:>14}", stream.label(), format!("€{}", format_thousands(total, 0)));
    }
    println!("  {:<28} {:>14}", "Total", format!("€{}", format_thousands(grand_total, 0)));
    if let Some(last) = snapshot.totals.last() {
        println!(
            "  {:<28} {:>14}",
            format!("Run rate (month {})", last.month),
            format!("€{}", format_thousands(last.total, 0))
        );
    }
    println!();

    println!("COSTS ({})", mode.label());
    println!("------------------------------------------------------------");
    match (&snapshot.costs, &snapshot.cost_error) {
        (_, Some(error)) => println!("  {}", error),
        (Some(costs), None) if costs.series.is_empty() => println!("  No cost data available."),
        (Some(costs), None) => {
            for series in &costs.series {
                println!("  {:<28} {:>14}", series.label, format_eur(series.total(), CostMode::Sum));
            }
            println!();
            for row in costs.rows(mode) {
                let bucket_total: f64 = row.values.iter().map(|(_, v)| v).sum();
                println!("  Mesi {:<23} {:>14}", row.bucket, format_eur(bucket_total, mode));
            }
        }
        (None, None) => println!("  No cost data available."),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CostConfig;
    use crate::xano::fallback_revenue;

    fn snapshot_with_costs() -> DashboardSnapshot {
        let configs = vec![CostConfig {
            id: "1".into(),
            key: "hosting".into(),
            label: "Hosting".into(),
            amount: 30.0,
            frequency: 1,
            start_month: 1,
            end_month: 24,
            color: "#000".into(),
        }];
        DashboardSnapshot::assemble(fallback_revenue(crate::types::Scenario::Realistic), None, Ok(configs))
    }

    #[test]
    fn writes_revenue_and_cost_csv() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate_csv_reports(dir.path(), &snapshot_with_costs(), CostMode::Average).unwrap();
        assert_eq!(written.len(), 2);

        let revenue = std::fs::read_to_string(dir.path().join("revenue_realistic.csv")).unwrap();
        let lines: Vec<&str> = revenue.lines().collect();
        assert_eq!(lines.len(), 25);
        assert!(lines[0].starts_with("Month,Estetiste PRO"));
        assert!(lines[24].starts_with("24,"));

        let costs = std::fs::read_to_string(dir.path().join("costs_average.csv")).unwrap();
        let lines: Vec<&str> = costs.lines().collect();
        assert_eq!(lines[0], "Months,Hosting");
        assert_eq!(lines[1], "1–4,30.00");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn skips_cost_csv_when_costs_failed() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = DashboardSnapshot::assemble(
            fallback_revenue(crate::types::Scenario::Optimistic),
            None,
            Err(crate::error::FetchError::Empty),
        );
        let written = generate_csv_reports(dir.path(), &snapshot, CostMode::Sum).unwrap();
        assert_eq!(written.len(), 1);
        assert!(dir.path().join("revenue_optimistic.csv").exists());
    }

    #[test]
    fn summary_does_not_panic() {
        print_summary(&snapshot_with_costs(), CostMode::Sum);
    }
}
