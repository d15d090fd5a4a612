use crate::chart::{
    gas_usage::GasUsageChart, latency_box::LatencyBoxChart, latency_line::LatencyLineChart,
    throughput::ThroughputChart, EChart,
};
use crate::export::{load_run, save_run, RunMetadata};
use crate::gen_html::{build_html_report, write_chart, ReportMetadata};
use crate::summary::RunSummary;
use crate::Result;
use b2ms_core::{driver::DriverRun, record::TxRecord};
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// Saves a fresh run to `out_dir`, then summarizes and charts it.
pub fn report(
    run: &DriverRun,
    metadata: &RunMetadata,
    out_dir: &Path,
    open: bool,
) -> Result<RunSummary> {
    save_run(run, metadata, out_dir)?;
    render_report(&run.records, metadata, out_dir, open)
}

/// Re-aggregates a run saved by a previous [`report`] call.
pub fn report_saved_run(out_dir: &Path, open: bool) -> Result<RunSummary> {
    let (records, metadata) = load_run(out_dir)?;
    info!(
        "loaded {} records from {} (run started {})",
        records.len(),
        out_dir.display(),
        metadata.started_at
    );
    render_report(&records, &metadata, out_dir, open)
}

/// Computes the summary, then writes the four charts and the HTML report into `out_dir`.
pub fn render_report(
    records: &[TxRecord],
    metadata: &RunMetadata,
    out_dir: &Path,
    open: bool,
) -> Result<RunSummary> {
    if !out_dir.exists() {
        fs::create_dir_all(out_dir)?;
    }

    let summary = RunSummary::new(records, &metadata.window());
    summary.log();

    let charts: Vec<Box<dyn EChart>> = vec![
        Box::new(GasUsageChart::new(records)),
        Box::new(LatencyLineChart::new(records)),
        Box::new(LatencyBoxChart::new(records)),
        Box::new(ThroughputChart::new(summary.tps)),
    ];
    for chart in &charts {
        write_chart(chart.as_ref(), out_dir)?;
    }

    let report_path = build_html_report(
        ReportMetadata {
            summary: &summary,
            run: metadata,
            charts: &charts,
        },
        out_dir,
    )?;

    // Skipped when BROWSER=none, e.g. in CI.
    if open && env::var("BROWSER").unwrap_or_default() != "none" {
        webbrowser::open(&report_path.to_string_lossy())?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ReportChartId;
    use crate::export::{METRICS_FILENAME, RUN_FILENAME};
    use crate::gen_html::REPORT_FILENAME;
    use alloy::primitives::U256;
    use b2ms_core::{deploy::ContractTotals, driver::RunWindow, record::CallKind};
    use std::time::{Duration, SystemTime};

    fn sample_run() -> DriverRun {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let records = (0..6)
            .map(|i| TxRecord {
                kind: if i < 4 {
                    CallKind::Donation
                } else {
                    CallKind::Match
                },
                gas_used: 45_000 + i * 500,
                latency_secs: 1.0 + (i % 3) as f64 * 0.1,
                status: true,
            })
            .collect();
        DriverRun {
            records,
            window: RunWindow::new(start, start + Duration::from_secs(3)),
        }
    }

    #[test]
    fn writes_csv_charts_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let run = sample_run();
        let metadata = RunMetadata::new(&run, "http://localhost:8545", "0x6d12");

        let summary = report(&run, &metadata, dir.path(), false).unwrap();
        assert_eq!(summary.total_txs, 6);
        assert_eq!(summary.tps, 2.0);

        assert!(dir.path().join(METRICS_FILENAME).exists());
        assert!(dir.path().join(RUN_FILENAME).exists());
        for id in ReportChartId::ALL {
            let chart = fs::read_to_string(id.filename(dir.path())).unwrap();
            assert!(chart.contains(id.proper_name()));
            assert!(chart.contains("setOption({"));
        }
        let html = fs::read_to_string(dir.path().join(REPORT_FILENAME)).unwrap();
        assert!(html.contains("http://localhost:8545"));
        assert!(html.contains("Mean gas (Donation)"));
        assert!(html.contains("tps_bar_chart.html"));
    }

    #[test]
    fn saved_run_reports_the_same_summary() {
        let dir = tempfile::tempdir().unwrap();
        let run = sample_run();
        let metadata = RunMetadata::new(&run, "http://localhost:8545", "0x6d12");
        let first = report(&run, &metadata, dir.path(), false).unwrap();

        let again = report_saved_run(dir.path(), false).unwrap();
        assert_eq!(again.total_txs, first.total_txs);
        assert_eq!(again.mean_gas, first.mean_gas);
        assert_eq!(again.tps, first.tps);
        assert_eq!(again.latency_mean_secs, first.latency_mean_secs);
    }

    #[test]
    fn contract_totals_appear_in_report() {
        let dir = tempfile::tempdir().unwrap();
        let run = sample_run();
        let metadata = RunMetadata::new(&run, "http://localhost:8545", "0x6d12");
        report(&run, &metadata, dir.path(), false).unwrap();
        let html = fs::read_to_string(dir.path().join(REPORT_FILENAME)).unwrap();
        assert!(!html.contains("Bank inventory"));

        let metadata = metadata.with_totals(Some(ContractTotals {
            donated: U256::from(1000),
            bank: U256::from(820),
            spent: U256::from(180),
        }));
        report(&run, &metadata, dir.path(), false).unwrap();
        let html = fs::read_to_string(dir.path().join(REPORT_FILENAME)).unwrap();
        assert!(html.contains("<tr><th>Bank inventory</th><td>820</td></tr>"));
        assert!(html.contains("<tr><th>Total spent</th><td>180</td></tr>"));
    }

    #[test]
    fn empty_run_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let start = SystemTime::now();
        let run = DriverRun {
            records: vec![],
            window: RunWindow::new(start, start),
        };
        let metadata = RunMetadata::new(&run, "http://localhost:8545", "0x6d12");
        let summary = report(&run, &metadata, dir.path(), false).unwrap();
        assert!(summary.tps.is_nan());
        let html = fs::read_to_string(dir.path().join(REPORT_FILENAME)).unwrap();
        assert!(html.contains("n/a"));
    }
}
