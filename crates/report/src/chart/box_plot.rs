use crate::util::five_number_summary;
use b2ms_core::record::{CallKind, TxRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Per-kind five-number summaries, in [`CallKind`] order.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BoxPlotData {
    pub categories: Vec<String>,
    /// `[min, q1, median, q3, max]` for each category.
    pub boxes: Vec<[f64; 5]>,
}

impl BoxPlotData {
    /// Groups `records` by kind and summarizes `value` within each group.
    /// Kinds with no records are left out.
    pub fn by_kind(records: &[TxRecord], value: impl Fn(&TxRecord) -> f64) -> Self {
        let mut groups: BTreeMap<CallKind, Vec<f64>> = BTreeMap::new();
        for record in records {
            groups.entry(record.kind).or_default().push(value(record));
        }
        let (categories, boxes) = groups
            .into_iter()
            .map(|(kind, values)| (kind.to_string(), five_number_summary(&values)))
            .unzip();
        Self { categories, boxes }
    }

    pub fn echart_option(&self, title: &str, y_name: &str) -> Value {
        json!({
            "title": { "text": title, "left": "center" },
            "tooltip": { "trigger": "item" },
            "xAxis": { "type": "category", "name": "Type", "data": self.categories },
            "yAxis": { "type": "value", "name": y_name, "scale": true },
            "series": [{ "type": "boxplot", "data": self.boxes }]
        })
    }
}
