use super::{EChart, ReportChartId};
use b2ms_core::record::{CallKind, TxRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LatencySeries {
    pub name: String,
    pub latencies: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LatencyLineData {
    /// Shared x axis: the index of a tx within its kind.
    pub indices: Vec<usize>,
    pub series: Vec<LatencySeries>,
}

/// Latency of every tx in submission order, one line per kind.
pub struct LatencyLineChart {
    series: Vec<LatencySeries>,
}

impl LatencyLineChart {
    pub fn new(records: &[TxRecord]) -> Self {
        let series = CallKind::ALL
            .iter()
            .map(|kind| LatencySeries {
                name: kind.to_string(),
                latencies: records
                    .iter()
                    .filter(|r| r.kind == *kind)
                    .map(|r| r.latency_secs)
                    .collect(),
            })
            .filter(|s| !s.latencies.is_empty())
            .collect();
        Self { series }
    }

    pub fn echart_data(&self) -> LatencyLineData {
        let longest = self
            .series
            .iter()
            .map(|s| s.latencies.len())
            .max()
            .unwrap_or(0);
        LatencyLineData {
            indices: (0..longest).collect(),
            series: self.series.clone(),
        }
    }
}

impl EChart for LatencyLineChart {
    fn id(&self) -> ReportChartId {
        ReportChartId::LatencyLine
    }

    fn echart_option(&self) -> Value {
        let data = self.echart_data();
        let symbols = ["circle", "rect"];
        let series = data
            .series
            .iter()
            .zip(symbols.iter().cycle())
            .map(|(s, symbol)| {
                json!({
                    "name": s.name,
                    "type": "line",
                    "symbol": symbol,
                    "data": s.latencies,
                })
            })
            .collect::<Vec<_>>();
        json!({
            "title": { "text": self.id().proper_name(), "left": "center" },
            "tooltip": { "trigger": "axis" },
            "legend": { "top": "bottom" },
            "xAxis": { "type": "category", "name": "Transaction Index", "data": data.indices },
            "yAxis": { "type": "value", "name": "Latency (seconds)" },
            "series": series
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: CallKind, latency_secs: f64) -> TxRecord {
        TxRecord {
            kind,
            gas_used: 21_000,
            latency_secs,
            status: true,
        }
    }

    #[test]
    fn each_kind_is_indexed_from_zero() {
        let records = vec![
            record(CallKind::Donation, 1.1),
            record(CallKind::Donation, 0.9),
            record(CallKind::Donation, 1.4),
            record(CallKind::Match, 2.0),
        ];
        let data = LatencyLineChart::new(&records).echart_data();

        assert_eq!(data.indices, vec![0, 1, 2]);
        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[0].name, "Donation");
        assert_eq!(data.series[0].latencies, vec![1.1, 0.9, 1.4]);
        assert_eq!(data.series[1].name, "Match");
        assert_eq!(data.series[1].latencies, vec![2.0]);
    }

    #[test]
    fn absent_kinds_have_no_line() {
        let records = vec![record(CallKind::Match, 2.0)];
        let chart = LatencyLineChart::new(&records);
        let option = chart.echart_option();
        assert_eq!(option["series"].as_array().unwrap().len(), 1);
        assert_eq!(option["series"][0]["name"], "Match");
    }
}
