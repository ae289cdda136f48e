//! Query-string validation.
//!
//! Each scalar parameter is described once by a [`QueryParam`]: its name, the
//! default used when it is absent, a parser, and a predicate. Extraction is a
//! two-stage check (parse, then validate) and both stages fail with the same
//! `invalid query <name>` error.

use std::fmt::Display;
use std::str::FromStr;

use crate::api::ApiError;
use crate::db::Page;

/// Raw query-string pairs in request order. Repeated keys are kept; the
/// first occurrence is the one validated.
pub type RawQuery = Vec<(String, String)>;

fn first_value<'a>(query: &'a RawQuery, name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Specification of one scalar query parameter.
#[derive(Debug, Clone, Copy)]
pub struct QueryParam<T: 'static> {
    pub name: &'static str,
    pub default: T,
    pub parse: fn(&str) -> Result<T, String>,
    pub accept: fn(&T) -> bool,
}

/// Parser for any `FromStr` scalar, keeping the error text for logs.
pub fn parse_scalar<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|e| e.to_string())
}

impl<T: Clone + Display> QueryParam<T> {
    /// Resolve the parameter from the raw query.
    ///
    /// Absent or empty values yield the default without running the
    /// predicate.
    pub fn extract(&self, query: &RawQuery) -> Result<T, ApiError> {
        let raw = match first_value(query, self.name) {
            None | Some("") => return Ok(self.default.clone()),
            Some(raw) => raw,
        };

        let value = (self.parse)(raw).map_err(|e| ApiError::invalid_query(self.name, e))?;

        if !(self.accept)(&value) {
            return Err(ApiError::invalid_query(
                self.name,
                format!("{} is out of range", value),
            ));
        }

        Ok(value)
    }
}

fn valid_limit(limit: &i64) -> bool {
    (1..=Page::MAX_LIMIT).contains(limit)
}

fn valid_offset(offset: &i64) -> bool {
    *offset >= 0
}

/// `limit`: 1..=100, default 20.
pub const LIMIT: QueryParam<i64> = QueryParam {
    name: "limit",
    default: Page::DEFAULT_LIMIT,
    parse: parse_scalar::<i64>,
    accept: valid_limit,
};

/// `offset`: >= 0, default 0.
pub const OFFSET: QueryParam<i64> = QueryParam {
    name: "offset",
    default: 0,
    parse: parse_scalar::<i64>,
    accept: valid_offset,
};

/// Validate `limit` and `offset` into a page. `limit` is checked first.
pub fn page_from_query(query: &RawQuery) -> Result<Page, ApiError> {
    Ok(Page {
        limit: LIMIT.extract(query)?,
        offset: OFFSET.extract(query)?,
    })
}
