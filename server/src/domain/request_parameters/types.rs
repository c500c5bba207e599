//! Request parameter vocabulary
//!
//! Wire names, operator tokens, and defaults shared by the parameter parser
//! and the query layer that interprets the filter tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query-string key for the page number
pub const NAME_FOR_PAGE: &str = "page";
/// Query-string key for the number of records per page
pub const NAME_FOR_LIMIT: &str = "limit";
/// Query-string key for the raw search filter (JSON)
pub const NAME_FOR_SEARCH: &str = "search";
/// Query-string key for the sort spec (JSON object or bare field name)
pub const NAME_FOR_SORT: &str = "sort_by";
/// Response-only key for the total of matching records
pub const NAME_FOR_TOTAL: &str = "total";

/// Aggregate token joining conditions that must all hold
pub const AGGREGATE_OPERATOR_AND: &str = "$and";
/// Aggregate token joining conditions of which at least one must hold
pub const AGGREGATE_OPERATOR_OR: &str = "$or";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Sort direction for one field of the sort spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a direction string case-insensitively; anything other than
    /// ASC/DESC is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator tokens of the search filter DSL.
///
/// The parser stores these verbatim inside the filter tree; interpretation
/// happens in the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Like,
    NotLike,
    In,
    NotIn,
}

impl ComparisonOperator {
    /// Operator applied to bare `field: scalar` conditions
    pub const DEFAULT: Self = Self::Equal;

    pub fn token(&self) -> &'static str {
        match self {
            Self::Equal => "$eq",
            Self::NotEqual => "$neq",
            Self::LessThan => "$lt",
            Self::LessThanOrEqual => "$le",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqual => "$ge",
            Self::Like => "$lk",
            Self::NotLike => "$nk",
            Self::In => "$in",
            Self::NotIn => "$ni",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$eq" => Some(Self::Equal),
            "$neq" => Some(Self::NotEqual),
            "$lt" => Some(Self::LessThan),
            "$le" => Some(Self::LessThanOrEqual),
            "$gt" => Some(Self::GreaterThan),
            "$ge" => Some(Self::GreaterThanOrEqual),
            "$lk" => Some(Self::Like),
            "$nk" => Some(Self::NotLike),
            "$in" => Some(Self::In),
            "$ni" => Some(Self::NotIn),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Whether the query layer should reject search fields it does not know.
///
/// Stored on the request parameters, never interpreted by the parser itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConcordanceMode {
    Strict,
    #[default]
    NoStrict,
}

/// Parse failures surfaced to the caller as bad-request conditions.
///
/// Individual invalid sort entries are not errors; they are dropped.
#[derive(Debug, Error)]
pub enum RequestParametersError {
    /// The sort value started with `{` but did not parse as a JSON object
    #[error("bad format for the sort_by parameter")]
    InvalidSortFormat,
    /// The search value was not valid JSON
    #[error("invalid JSON in the search parameter: {0}")]
    InvalidSearchJson(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_parse_is_case_insensitive() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("Desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("descending"), None);
        assert_eq!(SortOrder::parse(""), None);
    }

    #[test]
    fn comparison_operator_tokens_round_trip() {
        let all = [
            ComparisonOperator::Equal,
            ComparisonOperator::NotEqual,
            ComparisonOperator::LessThan,
            ComparisonOperator::LessThanOrEqual,
            ComparisonOperator::GreaterThan,
            ComparisonOperator::GreaterThanOrEqual,
            ComparisonOperator::Like,
            ComparisonOperator::NotLike,
            ComparisonOperator::In,
            ComparisonOperator::NotIn,
        ];
        for op in all {
            assert_eq!(ComparisonOperator::from_token(op.token()), Some(op));
        }
        assert_eq!(ComparisonOperator::from_token("$unknown"), None);
    }

    #[test]
    fn default_operator_is_equal() {
        assert_eq!(ComparisonOperator::DEFAULT.token(), "$eq");
    }
}
