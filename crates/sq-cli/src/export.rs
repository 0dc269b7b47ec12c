//! CSV export of a single result page.
//!
//! The header is the column keys of the page's first record, in order. Every
//! value is quoted; embedded quotes are doubled.

use std::io;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use sq_core::{PageMeta, Record};

/// `sales_page_<currentPage>.csv`
pub fn default_path(meta: &PageMeta) -> PathBuf {
    PathBuf::from(format!("sales_page_{}.csv", meta.current_page))
}

pub fn write_page<W: io::Write>(writer: W, page: &[Record]) -> Result<(), csv::Error> {
    let Some(first) = page.first() else {
        return Ok(());
    };
    let keys: Vec<&str> = first.columns().iter().map(|(k, _)| k.as_str()).collect();

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);
    wtr.write_record(&keys)?;
    for record in page {
        let columns = record.columns();
        wtr.write_record(keys.iter().map(|key| {
            columns
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap_or("")
        }))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_page(path: &Path, page: &[Record]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_page(file, page)
}
