use crate::chart::EChart;
use crate::export::RunMetadata;
use crate::summary::RunSummary;
use crate::util::fmt_stat;
use crate::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub static REPORT_FILENAME: &str = "report.html";

pub struct ReportMetadata<'a> {
    pub summary: &'a RunSummary,
    pub run: &'a RunMetadata,
    pub charts: &'a [Box<dyn EChart>],
}

#[derive(Serialize)]
struct ChartEntry {
    id: String,
    name: String,
    file: String,
    option: String,
}

#[derive(Serialize)]
struct MeanGasEntry {
    kind: String,
    value: String,
}

#[derive(Serialize)]
struct TotalsEntry {
    donated: String,
    bank: String,
    spent: String,
}

#[derive(Serialize)]
struct TemplateData {
    date: String,
    rpc_url: String,
    contract_address: String,
    started_at: String,
    finished_at: String,
    total_txs: usize,
    mean_gas: Vec<MeanGasEntry>,
    latency_mean: String,
    latency_std_dev: String,
    duration: String,
    tps: String,
    totals: Option<TotalsEntry>,
    charts: Vec<ChartEntry>,
}

impl TemplateData {
    fn new(meta: &ReportMetadata) -> Result<Self> {
        let summary = meta.summary;
        let charts = meta
            .charts
            .iter()
            .map(|chart| {
                let id = chart.id();
                Ok(ChartEntry {
                    id: id.to_string(),
                    name: id.proper_name().to_owned(),
                    file: format!("{id}.html"),
                    option: serde_json::to_string(&chart.echart_option())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            date: chrono::Local::now().to_rfc2822(),
            rpc_url: meta.run.rpc_url.to_owned(),
            contract_address: meta.run.contract_address.to_owned(),
            started_at: meta.run.started_at.to_rfc3339(),
            finished_at: meta.run.finished_at.to_rfc3339(),
            total_txs: summary.total_txs,
            mean_gas: summary
                .mean_gas
                .iter()
                .map(|(kind, gas)| MeanGasEntry {
                    kind: kind.to_string(),
                    value: fmt_stat(*gas, 0),
                })
                .collect(),
            latency_mean: fmt_stat(summary.latency_mean_secs, 2),
            latency_std_dev: fmt_stat(summary.latency_std_dev_secs, 2),
            duration: fmt_stat(summary.duration_secs, 2),
            tps: fmt_stat(summary.tps, 2),
            totals: meta.run.totals.map(|totals| TotalsEntry {
                donated: totals.donated.to_string(),
                bank: totals.bank.to_string(),
                spent: totals.spent.to_string(),
            }),
            charts,
        })
    }
}

/// Writes a standalone page for one chart. Returns the path to the file.
pub fn write_chart(chart: &dyn EChart, reports_dir: &Path) -> Result<PathBuf> {
    let template = include_str!("chart.html.handlebars");
    let id = chart.id();
    let data = serde_json::json!({
        "title": id.proper_name(),
        "option": serde_json::to_string(&chart.echart_option())?,
    });
    let html = handlebars::Handlebars::new().render_template(template, &data)?;

    let path = id.filename(reports_dir);
    std::fs::write(&path, html)?;
    info!("saved chart to {}", path.display());
    Ok(path)
}

/// Builds the HTML summary page with every chart embedded. Returns the path to the report.
pub fn build_html_report(meta: ReportMetadata, reports_dir: &Path) -> Result<PathBuf> {
    let template = include_str!("template.html.handlebars");

    let mut data = HashMap::new();
    data.insert("data", TemplateData::new(&meta)?);
    let html = handlebars::Handlebars::new().render_template(template, &data)?;

    let path = reports_dir.join(REPORT_FILENAME);
    std::fs::write(&path, html)?;
    info!("saved report to {}", path.display());

    Ok(path)
}
