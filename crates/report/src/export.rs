use crate::{Error, Result};
use b2ms_core::{
    deploy::ContractTotals,
    driver::{DriverRun, RunWindow},
    record::TxRecord,
};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub static METRICS_FILENAME: &str = "metrics.csv";
pub static RUN_FILENAME: &str = "run.json";
pub const CSV_HEADER: [&str; 4] = ["Type", "GasUsed", "LatencySec", "Status"];

/// Writes one CSV row per record (`Type,GasUsed,LatencySec,Status`).
/// The header is written even when there are no records.
pub fn write_records<T: std::io::Write>(writer: &mut Writer<T>, records: &[TxRecord]) -> Result<()> {
    if records.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Saves records to `out_path`, replacing any existing file.
pub fn save_csv_report(records: &[TxRecord], out_path: impl AsRef<Path>) -> Result<()> {
    let out_path = out_path.as_ref();
    info!("Exporting {} records to {}", records.len(), out_path.display());
    let mut writer = WriterBuilder::new().has_headers(true).from_path(out_path)?;
    write_records(&mut writer, records)
}

/// Reads back a file written by [`save_csv_report`].
pub fn load_csv_report(path: impl AsRef<Path>) -> Result<Vec<TxRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<TxRecord>, _>>()?;
    Ok(records)
}

/// Run-level facts that don't fit in the per-tx CSV.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RunMetadata {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rpc_url: String,
    pub contract_address: String,
    pub n_donations: u64,
    pub n_matches: u64,
    /// Contract counters read after the last call; absent if the interface has no view functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<ContractTotals>,
}

impl RunMetadata {
    pub fn new(run: &DriverRun, rpc_url: &str, contract_address: &str) -> Self {
        let n_donations = run
            .records
            .iter()
            .filter(|r| r.kind == b2ms_core::record::CallKind::Donation)
            .count() as u64;
        Self {
            started_at: run.window.started_at.into(),
            finished_at: run.window.finished_at.into(),
            rpc_url: rpc_url.to_owned(),
            contract_address: contract_address.to_owned(),
            n_donations,
            n_matches: run.records.len() as u64 - n_donations,
            totals: None,
        }
    }

    pub fn with_totals(mut self, totals: Option<ContractTotals>) -> Self {
        self.totals = totals;
        self
    }

    pub fn window(&self) -> RunWindow {
        RunWindow::new(self.started_at.into(), self.finished_at.into())
    }

    pub fn load(out_dir: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(out_dir.as_ref().join(RUN_FILENAME))?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save(&self, out_dir: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(out_dir.as_ref().join(RUN_FILENAME))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Persists a finished run to `out_dir` so it can be re-reported later.
pub fn save_run(run: &DriverRun, metadata: &RunMetadata, out_dir: impl AsRef<Path>) -> Result<()> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;
    save_csv_report(&run.records, out_dir.join(METRICS_FILENAME))?;
    metadata.save(out_dir)
}

/// Loads a run previously written by [`save_run`].
pub fn load_run(out_dir: impl AsRef<Path>) -> Result<(Vec<TxRecord>, RunMetadata)> {
    let out_dir = out_dir.as_ref();
    let metrics_path = out_dir.join(METRICS_FILENAME);
    if !metrics_path.exists() || !out_dir.join(RUN_FILENAME).exists() {
        return Err(Error::RunNotFound {
            dir: out_dir.to_owned(),
        });
    }
    let records = load_csv_report(metrics_path)?;
    let metadata = RunMetadata::load(out_dir)?;
    Ok((records, metadata))
}
