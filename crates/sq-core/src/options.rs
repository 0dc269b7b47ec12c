//! # Query Options
//!
//! [`QueryParams`] is the raw, string-typed request as a transport receives
//! it. [`QueryOptions`] is the coerced value the engine evaluates. The
//! conversion between them lives here so that transports never parse numbers
//! or dates themselves.

use crate::field::{normalize, parse_date, parse_number, split_tokens};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Fields the sort stage knows how to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Quantity,
    CustomerName,
}

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(SortField::Date),
            "quantity" => Ok(SortField::Quantity),
            "customerName" => Ok(SortField::CustomerName),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortField(pub String);

impl fmt::Display for UnknownSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported sort field '{}'", self.0)
    }
}

impl std::error::Error for UnknownSortField {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Exactly `desc` is descending; anything else is ascending.
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Raw request parameters, camel-cased like the HTTP query string.
///
/// Multi-value parameters hold every occurrence as received; each occurrence
/// may itself be comma-separated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub search: Option<String>,
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub age_min: Option<String>,
    pub age_max: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl QueryParams {
    /// Collect parameters from decoded `key=value` pairs.
    ///
    /// Repeated multi-value keys accumulate; repeated scalar keys keep the
    /// last occurrence. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = QueryParams::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "search" => params.search = Some(value),
                "regions" => params.regions.push(value),
                "genders" => params.genders.push(value),
                "categories" => params.categories.push(value),
                "tags" => params.tags.push(value),
                "paymentMethods" => params.payment_methods.push(value),
                "ageMin" => params.age_min = Some(value),
                "ageMax" => params.age_max = Some(value),
                "dateFrom" => params.date_from = Some(value),
                "dateTo" => params.date_to = Some(value),
                "sortBy" => params.sort_by = Some(value),
                "sortOrder" => params.sort_order = Some(value),
                "page" => params.page = Some(value),
                "pageSize" => params.page_size = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Inverse of [`QueryParams::from_pairs`], for building request URLs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let scalars = [
            ("search", &self.search),
            ("ageMin", &self.age_min),
            ("ageMax", &self.age_max),
            ("dateFrom", &self.date_from),
            ("dateTo", &self.date_to),
            ("sortBy", &self.sort_by),
            ("sortOrder", &self.sort_order),
            ("page", &self.page),
            ("pageSize", &self.page_size),
        ];
        for (key, value) in scalars {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        }
        let lists = [
            ("regions", &self.regions),
            ("genders", &self.genders),
            ("categories", &self.categories),
            ("tags", &self.tags),
            ("paymentMethods", &self.payment_methods),
        ];
        for (key, values) in lists {
            if !values.is_empty() {
                pairs.push((key, values.join(",")));
            }
        }
        pairs
    }
}

/// Coerced query, ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Normalized search text; `None` when absent or blank.
    pub search: Option<String>,
    pub regions: BTreeSet<String>,
    pub genders: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub payment_methods: BTreeSet<String>,
    pub age_min: Option<f64>,
    pub age_max: Option<f64>,
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
    pub sort: Option<Sort>,
    /// Requested page, uncorrected. The paginator clamps it.
    pub page: i64,
    /// Requested page size, uncorrected.
    pub page_size: i64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            search: None,
            regions: BTreeSet::new(),
            genders: BTreeSet::new(),
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
            payment_methods: BTreeSet::new(),
            age_min: None,
            age_max: None,
            date_from: None,
            date_to: None,
            sort: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Comma-split, trim, drop empties, lower-case and deduplicate.
pub fn parse_multi<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|v| split_tokens(v.as_ref()))
        .collect()
}

/// Leading integer of `raw`: optional sign, then the digit run. Trailing
/// text is ignored (`"2.5"` is 2, `"3abc"` is 3). No leading digits means
/// `default`.
fn parse_int(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return default;
    }
    let magnitude = rest[..len].parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl From<&QueryParams> for QueryOptions {
    fn from(params: &QueryParams) -> Self {
        let search = params
            .search
            .as_deref()
            .map(normalize)
            .filter(|s| !s.is_empty());

        let sort = params
            .sort_by
            .as_deref()
            .and_then(|raw| raw.parse::<SortField>().ok())
            .map(|field| Sort {
                field,
                order: params
                    .sort_order
                    .as_deref()
                    .map(SortOrder::parse)
                    .unwrap_or_default(),
            });

        Self {
            search,
            regions: parse_multi(&params.regions),
            genders: parse_multi(&params.genders),
            categories: parse_multi(&params.categories),
            tags: parse_multi(&params.tags),
            payment_methods: parse_multi(&params.payment_methods),
            age_min: params.age_min.as_deref().and_then(parse_number),
            age_max: params.age_max.as_deref().and_then(parse_number),
            date_from: params.date_from.as_deref().and_then(parse_date),
            date_to: params.date_to.as_deref().and_then(parse_date),
            sort,
            page: parse_int(params.page.as_deref(), DEFAULT_PAGE),
            page_size: parse_int(params.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        }
    }
}

impl From<QueryParams> for QueryOptions {
    fn from(params: QueryParams) -> Self {
        QueryOptions::from(&params)
    }
}
