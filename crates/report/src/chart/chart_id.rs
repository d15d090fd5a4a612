use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportChartId {
    GasUsage,
    LatencyLine,
    LatencyBox,
    Throughput,
}

impl std::fmt::Display for ReportChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReportChartId::GasUsage => "gas_usage_boxplot",
            ReportChartId::LatencyLine => "latency_line_plot",
            ReportChartId::LatencyBox => "latency_boxplot",
            ReportChartId::Throughput => "tps_bar_chart",
        };
        write!(f, "{s}")
    }
}

impl ReportChartId {
    pub const ALL: [ReportChartId; 4] = [
        ReportChartId::GasUsage,
        ReportChartId::LatencyLine,
        ReportChartId::LatencyBox,
        ReportChartId::Throughput,
    ];

    pub fn filename(&self, reports_dir: &Path) -> PathBuf {
        reports_dir.join(format!("{self}.html"))
    }

    pub fn proper_name(&self) -> &'static str {
        match self {
            ReportChartId::GasUsage => "Gas Used by Transaction Type",
            ReportChartId::LatencyLine => "Transaction Latency by Type",
            ReportChartId::LatencyBox => "Latency by Transaction Type",
            ReportChartId::Throughput => "Transactions Per Second",
        }
    }
}
