//! # Query Facade
//!
//! Runs the stages in fixed order: search, filters, sort, paginate. The source
//! collection is only borrowed; every intermediate collection is private to the
//! call, so concurrent evaluations over the same slice need no coordination.

use crate::options::QueryOptions;
use crate::paginate::{paginate, PageMeta};
use crate::predicate;
use crate::record::Record;
use crate::sort::sort_records;
use serde::{Deserialize, Serialize};

/// One page of results plus counts over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: Vec<Record>,
    pub meta: PageMeta,
}

/// Evaluate `options` against `records`. Never fails.
pub fn evaluate(records: &[Record], options: &QueryOptions) -> QueryResult {
    let search = options.search.as_deref();

    let mut matched: Vec<&Record> = records
        .iter()
        .filter(|r| predicate::search(r.fields(), search))
        .filter(|r| predicate::matches_filters(r.fields(), options))
        .collect();

    if let Some(sort) = options.sort {
        sort_records(&mut matched, sort);
    }

    let (page, meta) = paginate(&matched, options.page, options.page_size);

    QueryResult {
        data: page.iter().map(|r| (*r).clone()).collect(),
        meta,
    }
}
