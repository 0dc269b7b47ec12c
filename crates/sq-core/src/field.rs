//! # Field Resolver
//!
//! Every logical field of a sales record can arrive under two spellings: the
//! human-readable CSV label (`Customer Name`) or the camel-case alias
//! (`customerName`). This module owns that mapping and the coercions applied
//! to the resolved text. Nothing outside this module looks at raw keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Logical fields of a sales record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CustomerName,
    PhoneNumber,
    CustomerRegion,
    Gender,
    Age,
    ProductCategory,
    Tags,
    PaymentMethod,
    Date,
    Quantity,
    FinalAmount,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::CustomerName,
        Field::PhoneNumber,
        Field::CustomerRegion,
        Field::Gender,
        Field::Age,
        Field::ProductCategory,
        Field::Tags,
        Field::PaymentMethod,
        Field::Date,
        Field::Quantity,
        Field::FinalAmount,
    ];

    /// Human-readable spelling used by the CSV header.
    pub const fn label(self) -> &'static str {
        match self {
            Field::CustomerName => "Customer Name",
            Field::PhoneNumber => "Phone Number",
            Field::CustomerRegion => "Customer Region",
            Field::Gender => "Gender",
            Field::Age => "Age",
            Field::ProductCategory => "Product Category",
            Field::Tags => "Tags",
            Field::PaymentMethod => "Payment Method",
            Field::Date => "Date",
            Field::Quantity => "Quantity",
            Field::FinalAmount => "Final Amount",
        }
    }

    /// Camel-case spelling, also the canonical name.
    pub const fn alias(self) -> &'static str {
        match self {
            Field::CustomerName => "customerName",
            Field::PhoneNumber => "phoneNumber",
            Field::CustomerRegion => "customerRegion",
            Field::Gender => "gender",
            Field::Age => "age",
            Field::ProductCategory => "productCategory",
            Field::Tags => "tags",
            Field::PaymentMethod => "paymentMethod",
            Field::Date => "date",
            Field::Quantity => "quantity",
            Field::FinalAmount => "finalAmount",
        }
    }

    /// Resolve this field against a list of raw columns.
    ///
    /// The label spelling wins; the alias is consulted when the label is
    /// missing or blank. Returns `None` when neither yields any text.
    pub fn lookup<'a>(self, columns: &'a [(String, String)]) -> Option<&'a str> {
        let find = |key: &str| {
            columns
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .filter(|v| !v.is_empty())
        };
        find(self.label()).or_else(|| find(self.alias()))
    }
}

/// Trim and lower-case.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Parse a finite number. Blank, non-numeric, `NaN` and infinities yield `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date or timestamp to a comparable instant (UTC, naive).
///
/// Date-only inputs resolve to midnight, year-month inputs to the first of
/// the month. Offsets are normalized to UTC.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| parse_year_month(value))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM`, read as the first day of that month.
fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || !digits(year) || month.len() > 2 || !digits(month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Split a comma-delimited list into trimmed, lower-cased tokens.
pub fn split_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Canonical, already-coerced view of one record.
///
/// Built once per record by [`Fields::resolve`]; predicates and comparators
/// read only from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pub customer_name: String,
    pub phone_number: String,
    pub customer_region: String,
    pub gender: String,
    pub age: Option<f64>,
    pub product_category: String,
    pub tags: Vec<String>,
    pub payment_method: String,
    pub date: Option<NaiveDateTime>,
    pub quantity: Option<f64>,
    pub final_amount: Option<f64>,
}

impl Fields {
    pub fn resolve(columns: &[(String, String)]) -> Self {
        let text = |f: Field| f.lookup(columns).map(normalize).unwrap_or_default();
        let number = |f: Field| f.lookup(columns).and_then(parse_number);

        Self {
            customer_name: text(Field::CustomerName),
            phone_number: text(Field::PhoneNumber),
            customer_region: text(Field::CustomerRegion),
            gender: text(Field::Gender),
            age: number(Field::Age),
            product_category: text(Field::ProductCategory),
            tags: Field::Tags.lookup(columns).map(split_tokens).unwrap_or_default(),
            payment_method: text(Field::PaymentMethod),
            date: Field::Date.lookup(columns).and_then(parse_date),
            quantity: number(Field::Quantity),
            final_amount: number(Field::FinalAmount),
        }
    }

    /// Quantity with the aggregation default applied.
    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }

    pub fn final_amount_or_zero(&self) -> f64 {
        self.final_amount.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_label_and_alias_resolve_identically() {
        let labelled = Fields::resolve(&cols(&[
            ("Customer Name", "  Neha Shah "),
            ("Customer Region", "North"),
            ("Age", "31"),
            ("Date", "2023-01-05"),
        ]));
        let aliased = Fields::resolve(&cols(&[
            ("customerName", "neha shah"),
            ("customerRegion", " NORTH"),
            ("age", "31"),
            ("date", "2023-01-05"),
        ]));
        assert_eq!(labelled, aliased);
        assert_eq!(labelled.customer_name, "neha shah");
    }

    #[test]
    fn test_blank_label_falls_back_to_alias() {
        let columns = cols(&[("Gender", ""), ("gender", "Female")]);
        assert_eq!(Field::Gender.lookup(&columns), Some("Female"));
    }

    #[test]
    fn test_missing_numbers_are_null_not_zero() {
        let fields = Fields::resolve(&cols(&[("Age", "n/a"), ("Quantity", "")]));
        assert_eq!(fields.age, None);
        assert_eq!(fields.quantity, None);
        assert_eq!(fields.quantity_or_zero(), 0.0);
    }

    #[test]
    fn test_zero_is_a_real_value() {
        let fields = Fields::resolve(&cols(&[("Quantity", "0")]));
        assert_eq!(fields.quantity, Some(0.0));
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(" 42.5 "), Some(42.5));
    }

    #[test]
    fn test_parse_date_formats() {
        let midnight = NaiveDate::from_ymd_opt(2023, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date("2023-01-31"), Some(midnight));
        assert_eq!(parse_date("2023/01/31"), Some(midnight));
        assert_eq!(parse_date("01/31/2023"), Some(midnight));
        assert_eq!(parse_date("2023-01-31T00:00:00Z"), Some(midnight));
        assert_eq!(parse_date("2023-01-31T05:30:00+05:30"), Some(midnight));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_date_fractional_seconds_without_offset() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(parse_date("2023-01-15T10:00:00.000"), Some(expected));
        assert_eq!(parse_date("2023-01-15 10:00:00.000"), Some(expected));

        let with_millis = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 250)
            .unwrap();
        assert_eq!(parse_date("2023-01-15T10:00:00.250"), Some(with_millis));
    }

    #[test]
    fn test_parse_date_year_month_is_first_of_month() {
        let first = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date("2023-01"), Some(first));
        assert_eq!(parse_date(" 2023-1 "), Some(first));
        assert_eq!(parse_date("2023-13"), None);
        assert_eq!(parse_date("23-01"), None);
    }

    #[test]
    fn test_tags_are_split_and_normalized() {
        let fields = Fields::resolve(&cols(&[("Tags", "Summer-Promo, ,loyal-VIP-client")]));
        assert_eq!(fields.tags, vec!["summer-promo", "loyal-vip-client"]);
    }
}
