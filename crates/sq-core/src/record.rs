//! # Sales Record
//!
//! A record keeps its source columns verbatim, in source order, so it can be
//! served back exactly as ingested. The canonical [`Fields`] are resolved once
//! at construction and never recomputed.

use crate::field::{Field, Fields};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Vec<(String, String)>,
    fields: Fields,
}

impl Record {
    /// Build a record from `(key, value)` pairs in source order.
    pub fn from_columns<I, K, V>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let columns: Vec<(String, String)> = columns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let fields = Fields::resolve(&columns);
        Self { columns, fields }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    /// Raw text of a logical field, untrimmed, under either spelling.
    pub fn raw(&self, field: Field) -> Option<&str> {
        field.lookup(&self.columns)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (k, v) in &self.columns {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Scalar JSON value flattened to text. Objects and arrays are rejected.
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number, boolean or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }
            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
            fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(String::new()))
            }
            fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(String::new()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sales record object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut columns = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, Scalar(value))) = access.next_entry::<String, Scalar>()? {
                    columns.push((key, value));
                }
                Ok(Record::from_columns(columns))
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
