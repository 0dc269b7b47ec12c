//! # Sort Stage
//!
//! Stable, single-field ordering. Comparators are total: numbers are finite
//! by construction and compared with `total_cmp`; missing dates order before
//! present ones prior to applying the direction.

use crate::field::Fields;
use crate::options::{Sort, SortField, SortOrder};
use crate::record::Record;
use std::cmp::Ordering;

fn compare(a: &Fields, b: &Fields, field: SortField) -> Ordering {
    match field {
        SortField::Date => match (a.date, b.date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(&y),
        },
        SortField::Quantity => a.quantity_or_zero().total_cmp(&b.quantity_or_zero()),
        SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
    }
}

/// Order `records` in place. Ties keep their prior relative order.
pub fn sort_records(records: &mut [&Record], sort: Sort) {
    records.sort_by(|a, b| {
        let ord = compare(a.fields(), b.fields(), sort.field);
        match sort.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.fields().customer_name.clone())
            .collect()
    }

    #[test]
    fn test_quantity_descending() {
        let rows = [
            Record::from_columns([("Customer Name", "a"), ("Quantity", "5")]),
            Record::from_columns([("Customer Name", "b"), ("Quantity", "1")]),
            Record::from_columns([("Customer Name", "c"), ("Quantity", "9")]),
        ];
        let mut refs: Vec<&Record> = rows.iter().collect();
        sort_records(
            &mut refs,
            Sort {
                field: SortField::Quantity,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(names(&refs), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unparseable_quantity_sorts_as_zero() {
        let rows = [
            Record::from_columns([("Customer Name", "a"), ("Quantity", "2")]),
            Record::from_columns([("Customer Name", "b"), ("Quantity", "lots")]),
            Record::from_columns([("Customer Name", "c"), ("Quantity", "-1")]),
        ];
        let mut refs: Vec<&Record> = rows.iter().collect();
        sort_records(
            &mut refs,
            Sort {
                field: SortField::Quantity,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&refs), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_missing_dates_first_ascending_last_descending() {
        let rows = [
            Record::from_columns([("Customer Name", "late"), ("Date", "2023-03-01")]),
            Record::from_columns([("Customer Name", "none"), ("Date", "garbage")]),
            Record::from_columns([("Customer Name", "early"), ("Date", "2023-01-01")]),
        ];
        let mut refs: Vec<&Record> = rows.iter().collect();
        sort_records(
            &mut refs,
            Sort {
                field: SortField::Date,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&refs), vec!["none", "early", "late"]);

        sort_records(
            &mut refs,
            Sort {
                field: SortField::Date,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(names(&refs), vec!["late", "early", "none"]);
    }

    #[test]
    fn test_two_missing_dates_keep_prior_order() {
        let rows = [
            Record::from_columns([("Customer Name", "first"), ("Date", "soon")]),
            Record::from_columns([("Customer Name", "dated"), ("Date", "2023-02-01")]),
            Record::from_columns([("Customer Name", "second"), ("Date", "")]),
        ];
        let mut refs: Vec<&Record> = rows.iter().collect();
        sort_records(
            &mut refs,
            Sort {
                field: SortField::Date,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&refs), vec!["first", "second", "dated"]);

        let mut refs: Vec<&Record> = rows.iter().collect();
        sort_records(
            &mut refs,
            Sort {
                field: SortField::Date,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(names(&refs), vec!["dated", "first", "second"]);
    }

    #[test]
    fn test_name_ties_keep_prior_order() {
        let rows = [
            Record::from_columns([("Customer Name", "Zed"), ("Transaction ID", "1")]),
            Record::from_columns([("Customer Name", " amy"), ("Transaction ID", "2")]),
            Record::from_columns([("Customer Name", "AMY "), ("Transaction ID", "3")]),
        ];
        let mut refs: Vec<&Record> = rows.iter().collect();
        sort_records(
            &mut refs,
            Sort {
                field: SortField::CustomerName,
                order: SortOrder::Asc,
            },
        );
        let ids: Vec<&str> = refs
            .iter()
            .map(|r| r.columns()[1].1.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }
}
