//! Terminal rendering of a result page.

use sq_core::{summarize, Field, QueryResult, Record};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Debug, PartialEq)]
pub struct Row {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Customer")]
    pub customer: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "Gender")]
    pub gender: String,
    #[tabled(rename = "Age")]
    pub age: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Qty")]
    pub quantity: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Payment")]
    pub payment: String,
    #[tabled(rename = "Tags")]
    pub tags: String,
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        let cell = |f: Field| record.raw(f).unwrap_or("").trim().to_string();
        Self {
            date: cell(Field::Date),
            customer: cell(Field::CustomerName),
            phone: cell(Field::PhoneNumber),
            region: cell(Field::CustomerRegion),
            gender: cell(Field::Gender),
            age: cell(Field::Age),
            category: cell(Field::ProductCategory),
            quantity: cell(Field::Quantity),
            amount: cell(Field::FinalAmount),
            payment: cell(Field::PaymentMethod),
            tags: cell(Field::Tags),
        }
    }
}

/// Table, page line and page KPIs.
pub fn render(result: &QueryResult) -> String {
    let meta = &result.meta;
    let mut out = String::new();

    if result.data.is_empty() {
        out.push_str("No matching records.\n");
    } else {
        let rows: Vec<Row> = result.data.iter().map(Row::from).collect();
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    let summary = summarize(&result.data);
    out.push_str(&format!(
        "Page {} of {} • {} records\n",
        meta.current_page, meta.total_pages, meta.total_items
    ));
    out.push_str(&format!(
        "Units on page: {} • Amount on page: {:.2}\n",
        summary.total_units, summary.total_amount
    ));
    out
}
