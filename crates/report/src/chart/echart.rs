use super::ReportChartId;
use serde_json::Value;

/// A chart rendered client-side by echarts.
pub trait EChart {
    fn id(&self) -> ReportChartId;

    /// The echarts `option` object that draws this chart.
    fn echart_option(&self) -> Value;
}
