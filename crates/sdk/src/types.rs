//! Shared request building blocks: id lists, filter expressions and dates.

use crate::error::{SproutError, SproutResult};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A list of upstream identifiers.
///
/// Accepts a comma-separated string (`"1, 2,3"`), a JSON array of strings
/// or numbers, or a single number. Entries are trimmed and blanks dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdList(Vec<String>);

impl IdList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        )
    }

    /// Split a comma-separated string.
    pub fn parse(joined: &str) -> Self {
        Self::new(joined.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Comma-joined form used inside filter expressions.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl<'de> Deserialize<'de> for IdList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawIds {
            Joined(String),
            Single(u64),
            List(Vec<RawId>),
        }

        Ok(match RawIds::deserialize(deserializer)? {
            RawIds::Joined(joined) => IdList::parse(&joined),
            RawIds::Single(id) => IdList(vec![id.to_string()]),
            RawIds::List(ids) => IdList::new(ids.into_iter().map(|id| match id {
                RawId::Text(text) => text,
                RawId::Number(n) => n.to_string(),
            })),
        })
    }
}

/// One entry of the `filters` array understood by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Filter(String);

impl Filter {
    /// `field.eq(a,b,c)`
    pub fn eq(field: &str, ids: &IdList) -> Self {
        Self(format!("{}.eq({})", field, ids.joined()))
    }

    /// `field.in(start..end)` over timestamps, passed through verbatim.
    pub fn between(field: &str, start: &str, end: &str) -> Self {
        Self(format!("{}.in({}..{})", field, start, end))
    }

    /// `field.in(start...end)` over calendar dates.
    pub fn period(field: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self(format!(
            "{}.in({}...{})",
            field,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar date of a `YYYY-MM-DD` or ISO 8601 datetime string.
pub fn reporting_date(value: &str) -> SproutResult<NaiveDate> {
    let value = value.trim();
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            SproutError::InvalidInput(format!(
                "'{}' is not an ISO 8601 date (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)",
                value
            ))
        })
}
