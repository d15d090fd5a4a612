use super::{box_plot::BoxPlotData, EChart, ReportChartId};
use b2ms_core::record::TxRecord;
use serde_json::Value;

/// Distribution of gas used, one box per transaction kind.
pub struct GasUsageChart {
    data: BoxPlotData,
}

impl GasUsageChart {
    pub fn new(records: &[TxRecord]) -> Self {
        Self {
            data: BoxPlotData::by_kind(records, |r| r.gas_used as f64),
        }
    }

    pub fn echart_data(&self) -> &BoxPlotData {
        &self.data
    }
}

impl EChart for GasUsageChart {
    fn id(&self) -> ReportChartId {
        ReportChartId::GasUsage
    }

    fn echart_option(&self) -> Value {
        self.data
            .echart_option(self.id().proper_name(), "Gas Units")
    }
}
