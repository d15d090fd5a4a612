use super::{box_plot::BoxPlotData, EChart, ReportChartId};
use b2ms_core::record::TxRecord;
use serde_json::Value;

/// Distribution of broadcast-to-receipt latency, one box per transaction kind.
pub struct LatencyBoxChart {
    data: BoxPlotData,
}

impl LatencyBoxChart {
    pub fn new(records: &[TxRecord]) -> Self {
        Self {
            data: BoxPlotData::by_kind(records, |r| r.latency_secs),
        }
    }

    pub fn echart_data(&self) -> &BoxPlotData {
        &self.data
    }
}

impl EChart for LatencyBoxChart {
    fn id(&self) -> ReportChartId {
        ReportChartId::LatencyBox
    }

    fn echart_option(&self) -> Value {
        self.data
            .echart_option(self.id().proper_name(), "Latency (s)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b2ms_core::record::CallKind;

    #[test]
    fn single_kind_single_box() {
        let records = [1.0, 1.2, 0.8].map(|latency_secs| TxRecord {
            kind: CallKind::Donation,
            gas_used: 21_000,
            latency_secs,
            status: true,
        });
        let data = LatencyBoxChart::new(&records).echart_data().clone();
        assert_eq!(data.categories, vec!["Donation"]);
        assert_eq!(data.boxes[0][0], 0.8);
        assert_eq!(data.boxes[0][2], 1.0);
        assert_eq!(data.boxes[0][4], 1.2);
    }
}
