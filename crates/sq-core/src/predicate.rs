//! # Predicate Stages
//!
//! Independent filters over canonical [`Fields`]. Each stage passes every
//! record when its criteria are unset or empty. Active stages combine with
//! AND semantics in [`matches_filters`].

use crate::field::Fields;
use crate::options::QueryOptions;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Substring match of the normalized query on name or phone.
pub fn search(fields: &Fields, query: Option<&str>) -> bool {
    match query {
        Some(q) => fields.customer_name.contains(q) || fields.phone_number.contains(q),
        None => true,
    }
}

/// Set membership, OR within the set. An empty set admits everything.
pub fn categorical(value: &str, allowed: &BTreeSet<String>) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

/// Inclusive bounds. A missing value never satisfies an active bound.
fn within<T: PartialOrd>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    let above = min.map_or(true, |m| value >= m);
    let below = max.map_or(true, |m| value <= m);
    above && below
}

pub fn age_range(fields: &Fields, min: Option<f64>, max: Option<f64>) -> bool {
    within(fields.age, min, max)
}

pub fn date_range(
    fields: &Fields,
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
) -> bool {
    within(fields.date, from, to)
}

/// Every requested tag must be contained in at least one record tag.
pub fn tags(fields: &Fields, requested: &BTreeSet<String>) -> bool {
    requested
        .iter()
        .all(|want| fields.tags.iter().any(|have| have.contains(want.as_str())))
}

/// All non-search stages, AND-combined.
pub fn matches_filters(fields: &Fields, options: &QueryOptions) -> bool {
    categorical(&fields.customer_region, &options.regions)
        && categorical(&fields.gender, &options.genders)
        && age_range(fields, options.age_min, options.age_max)
        && categorical(&fields.product_category, &options.categories)
        && tags(fields, &options.tags)
        && categorical(&fields.payment_method, &options.payment_methods)
        && date_range(fields, options.date_from, options.date_to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::parse_date;
    use crate::options::parse_multi;

    fn fields() -> Fields {
        Fields {
            customer_name: "neha shah".into(),
            phone_number: "9876543210".into(),
            customer_region: "north".into(),
            gender: "female".into(),
            age: Some(34.0),
            product_category: "electronics".into(),
            tags: vec!["summer-promo".into(), "loyal-vip-client".into()],
            payment_method: "upi".into(),
            date: parse_date("2023-01-15"),
            quantity: Some(2.0),
            final_amount: Some(1999.0),
        }
    }

    #[test]
    fn test_search_matches_name_or_phone() {
        let f = fields();
        assert!(search(&f, None));
        assert!(search(&f, Some("shah")));
        assert!(search(&f, Some("65432")));
        assert!(!search(&f, Some("kumar")));
    }

    #[test]
    fn test_categorical_empty_set_is_pass_through() {
        assert!(categorical("north", &BTreeSet::new()));
        assert!(categorical("north", &parse_multi(["North,South"])));
        assert!(!categorical("east", &parse_multi(["North,South"])));
    }

    #[test]
    fn test_age_null_excluded_by_either_bound() {
        let f = Fields::default();
        assert!(age_range(&f, None, None));
        assert!(!age_range(&f, Some(18.0), None));
        assert!(!age_range(&f, None, Some(60.0)));
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let f = fields();
        assert!(age_range(&f, Some(34.0), Some(34.0)));
        assert!(!age_range(&f, Some(35.0), None));
        assert!(!age_range(&f, None, Some(33.0)));
    }

    #[test]
    fn test_tags_substring_and_across_requested() {
        let f = fields();
        assert!(tags(&f, &parse_multi(["promo,vip"])));
        assert!(!tags(&f, &parse_multi(["promo,missing"])));
        assert!(tags(&f, &BTreeSet::new()));
        assert!(!tags(&Fields::default(), &parse_multi(["promo"])));
    }

    #[test]
    fn test_date_range_excludes_outside_and_null() {
        let from = parse_date("2023-01-01");
        let to = parse_date("2023-01-31");
        assert!(date_range(&fields(), from, to));

        let mut feb = fields();
        feb.date = parse_date("2023-02-01");
        assert!(!date_range(&feb, from, to));

        assert!(!date_range(&Fields::default(), from, None));
        assert!(date_range(&Fields::default(), None, None));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let f = fields();
        let mut options = QueryOptions {
            regions: parse_multi(["north"]),
            genders: parse_multi(["female"]),
            ..Default::default()
        };
        assert!(matches_filters(&f, &options));

        options.payment_methods = parse_multi(["cash"]);
        assert!(!matches_filters(&f, &options));
    }
}
