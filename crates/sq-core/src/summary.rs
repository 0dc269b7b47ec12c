//! Page KPIs. Unparseable quantity or amount counts as zero here, unlike in
//! the filter and sort stages.

use crate::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageSummary {
    pub total_units: f64,
    pub total_amount: f64,
}

pub fn summarize(records: &[Record]) -> PageSummary {
    records
        .iter()
        .fold(PageSummary::default(), |mut acc, record| {
            acc.total_units += record.fields().quantity_or_zero();
            acc.total_amount += record.fields().final_amount_or_zero();
            acc
        })
}
