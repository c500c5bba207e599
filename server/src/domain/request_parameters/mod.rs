//! Request parameter parsing
//!
//! Parses the listing query-string contract (`page`, `limit`, `sort_by`,
//! `search`) into a normalized [`RequestParameters`] value. The `search`
//! parameter carries a JSON filter tree (`$and`/`$or` groups over field
//! conditions) which is normalized so that its root is always a single
//! aggregate group; the query layer interprets the tree, this module only
//! parses and answers structural lookups.
//!
//! ## Usage
//!
//! ```
//! use watchtower_server::domain::request_parameters::RequestParameters;
//!
//! let mut params = RequestParameters::new();
//! params.set_search(r#"{"name": {"$lk": "srv%"}}"#).unwrap();
//! assert!(params.is_search_parameter_defined("name"));
//! ```

mod parameters;
mod types;

pub use parameters::RequestParameters;
pub use types::{
    AGGREGATE_OPERATOR_AND, AGGREGATE_OPERATOR_OR, ComparisonOperator, ConcordanceMode,
    DEFAULT_LIMIT, DEFAULT_PAGE, NAME_FOR_LIMIT, NAME_FOR_PAGE, NAME_FOR_SEARCH, NAME_FOR_SORT,
    NAME_FOR_TOTAL, RequestParametersError, SortOrder,
};
