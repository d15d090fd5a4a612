mod box_plot;
mod chart_id;
mod echart;
pub mod gas_usage;
pub mod latency_box;
pub mod latency_line;
pub mod throughput;

pub use box_plot::BoxPlotData;
pub use chart_id::ReportChartId;
pub use echart::EChart;
