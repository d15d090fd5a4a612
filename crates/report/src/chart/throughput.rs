use super::{EChart, ReportChartId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ThroughputData {
    pub tps: f64,
    /// Upper bound of the y axis: at least 10, and always above the bar.
    pub y_max: f64,
}

/// A single bar showing transactions per second for the whole run.
pub struct ThroughputChart {
    tps: f64,
}

impl ThroughputChart {
    pub fn new(tps: f64) -> Self {
        Self { tps }
    }

    pub fn echart_data(&self) -> ThroughputData {
        ThroughputData {
            tps: self.tps,
            y_max: f64::max(10.0, self.tps + 1.0),
        }
    }
}

impl EChart for ThroughputChart {
    fn id(&self) -> ReportChartId {
        ReportChartId::Throughput
    }

    fn echart_option(&self) -> Value {
        let data = self.echart_data();
        json!({
            "title": { "text": self.id().proper_name(), "left": "center" },
            "tooltip": { "trigger": "axis" },
            "xAxis": { "type": "category", "data": ["TPS"] },
            "yAxis": { "type": "value", "name": "TPS", "min": 0, "max": data.y_max },
            "series": [{
                "type": "bar",
                "data": [data.tps],
                "itemStyle": { "color": "skyblue" },
                "barWidth": "40%"
            }]
        })
    }
}
