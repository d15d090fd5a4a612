use crate::util::{fmt_stat, mean, std_deviation};
use b2ms_core::{
    driver::RunWindow,
    record::{round_to, CallKind, TxRecord},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Aggregate metrics for one harness run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub total_txs: usize,
    /// Mean gas used, for each kind that appears in the run.
    pub mean_gas: BTreeMap<CallKind, f64>,
    pub latency_mean_secs: f64,
    pub latency_std_dev_secs: f64,
    pub duration_secs: f64,
    /// Transactions per second over the whole run, rounded to 2 decimals.
    pub tps: f64,
}

impl RunSummary {
    /// Zero records or a zero-length window give NaN/infinite rates; this never panics.
    pub fn new(records: &[TxRecord], window: &RunWindow) -> Self {
        let mut gas_by_kind: BTreeMap<CallKind, Vec<f64>> = BTreeMap::new();
        for record in records {
            gas_by_kind
                .entry(record.kind)
                .or_default()
                .push(record.gas_used as f64);
        }
        let mean_gas = gas_by_kind
            .into_iter()
            .map(|(kind, gas)| (kind, mean(&gas)))
            .collect();

        let latencies = records.iter().map(|r| r.latency_secs).collect::<Vec<_>>();
        let duration_secs = window.elapsed().as_secs_f64();

        Self {
            total_txs: records.len(),
            mean_gas,
            latency_mean_secs: mean(&latencies),
            latency_std_dev_secs: std_deviation(&latencies),
            duration_secs,
            tps: round_to(records.len() as f64 / duration_secs, 2),
        }
    }

    pub fn mean_gas_for(&self, kind: CallKind) -> Option<f64> {
        self.mean_gas.get(&kind).copied()
    }

    /// Writes the summary to the log.
    pub fn log(&self) {
        info!("--- Summary ---");
        for (kind, gas) in &self.mean_gas {
            info!("{kind} mean gas used: {}", fmt_stat(*gas, 0));
        }
        info!(
            "Latency (s): avg {}, std dev {}",
            fmt_stat(self.latency_mean_secs, 2),
            fmt_stat(self.latency_std_dev_secs, 2)
        );
        info!(
            "Total time: {:.2} seconds for {} transactions",
            self.duration_secs, self.total_txs
        );
        info!("Throughput (TPS): {}", fmt_stat(self.tps, 2));
    }
}
