//! The request parameter holder and its parsing rules
//!
//! One [`RequestParameters`] value is built per incoming listing request,
//! mutated while the query string is parsed, read by the query layer, and
//! discarded when the response is written. Nothing here is shared across
//! requests.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::types::{
    AGGREGATE_OPERATOR_AND, AGGREGATE_OPERATOR_OR, ConcordanceMode, DEFAULT_LIMIT, DEFAULT_PAGE,
    NAME_FOR_LIMIT, NAME_FOR_PAGE, NAME_FOR_SEARCH, NAME_FOR_SORT, NAME_FOR_TOTAL,
    RequestParametersError, SortOrder,
};

/// Sort fields are restricted to identifier-like names so they can be passed
/// to a query backend without quoting concerns.
static SORT_FIELD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("sort field pattern is valid"));

/// Pagination, sort spec, and search-filter tree of one listing request.
///
/// The search tree is kept as ordered JSON (`serde_json` with
/// `preserve_order`), so key-declaration order is stable; both the
/// first-match policy of [`find_search_parameter`](Self::find_search_parameter)
/// and multi-column sort precedence rely on it.
#[derive(Debug, Clone)]
pub struct RequestParameters {
    page: u32,
    limit: u32,
    total: u64,
    sort: Vec<(String, SortOrder)>,
    search: Value,
    extra_parameters: Map<String, Value>,
    concordance_strict_mode: ConcordanceMode,
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            total: 0,
            sort: Vec::new(),
            search: Value::Object(Map::new()),
            extra_parameters: Map::new(),
            concordance_strict_mode: ConcordanceMode::default(),
        }
    }
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from the raw query-string values of a listing
    /// request. `page`/`limit` fall back to their defaults; `sort_by` and
    /// `search` are parsed when present.
    pub fn from_query(
        page: Option<u32>,
        limit: Option<u32>,
        sort_by: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, RequestParametersError> {
        let mut params = Self::new();
        if let Some(page) = page {
            params.set_page(page);
        }
        if let Some(limit) = limit {
            params.set_limit(limit);
        }
        if let Some(sort_by) = sort_by {
            params.set_sort(sort_by)?;
        }
        if let Some(search) = search {
            params.set_search(search)?;
        }
        Ok(params)
    }

    // Pagination accessors. No range validation happens here: out-of-range
    // values are accepted as-is and left to the caller to police.

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Written back by the query layer after counting matches without limit
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Sort spec in declaration order; later fields break ties of earlier ones
    pub fn sort(&self) -> &[(String, SortOrder)] {
        &self.sort
    }

    /// Parse the raw `sort_by` value.
    ///
    /// Accepts either a bare field name (sorted ASC) or a JSON object mapping
    /// field names to directions. Object entries with an invalid field name
    /// or an unrecognized direction are dropped rather than failing the
    /// request, and so is every entry of a JSON list (a list carries no
    /// directions); only a `{`-prefixed value that does not parse as an
    /// object is an error.
    pub fn set_sort(&mut self, raw: &str) -> Result<(), RequestParametersError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(entries)) => {
                let mut sort = Vec::with_capacity(entries.len());
                for (field, direction) in entries {
                    let direction = direction.as_str().and_then(SortOrder::parse);
                    match direction {
                        Some(direction) if SORT_FIELD_PATTERN.is_match(&field) => {
                            sort.push((field, direction));
                        }
                        _ => {
                            tracing::debug!(field = %field, "Dropping invalid sort entry");
                        }
                    }
                }
                self.sort = sort;
                Ok(())
            }
            Ok(Value::Array(entries)) => {
                for entry in entries {
                    tracing::debug!(entry = %entry, "Dropping invalid sort entry");
                }
                self.sort = Vec::new();
                Ok(())
            }
            _ if !raw.starts_with('{') => {
                self.sort = vec![(raw.to_string(), SortOrder::default())];
                Ok(())
            }
            _ => Err(RequestParametersError::InvalidSortFormat),
        }
    }

    /// The normalized search tree. Empty object means "no filter".
    pub fn search(&self) -> &Value {
        &self.search
    }

    /// Parse the raw `search` value and normalize its schema.
    ///
    /// Empty input is treated as an empty filter. Anything else must be
    /// valid JSON; decode failures surface to the caller.
    pub fn set_search(&mut self, raw: &str) -> Result<(), RequestParametersError> {
        self.search = if raw.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(raw).map_err(RequestParametersError::InvalidSearchJson)?
        };
        self.fix_schema();
        Ok(())
    }

    /// Guarantee the invariant downstream consumers rely on: a non-empty
    /// tree is always a single-key object keyed by one aggregate operator.
    /// A flat condition object (or any other shape) is wrapped under an
    /// implicit `$and`. Idempotent.
    fn fix_schema(&mut self) {
        if tree_is_empty(&self.search) {
            self.search = Value::Object(Map::new());
            return;
        }
        let already_aggregated = matches!(
            &self.search,
            Value::Object(map) if map.len() == 1
                && map.keys().all(|key| {
                    key == AGGREGATE_OPERATOR_AND || key == AGGREGATE_OPERATOR_OR
                })
        );
        if !already_aggregated {
            let inner = std::mem::take(&mut self.search);
            let mut wrapped = Map::new();
            wrapped.insert(AGGREGATE_OPERATOR_AND.to_string(), inner);
            self.search = Value::Object(wrapped);
        }
    }

    /// Depth-first lookup of `key` in `tree`, keys before children, in
    /// key-declaration order. The first occurrence wins; the search does not
    /// continue past it.
    ///
    /// When the matched value is itself an object, the value of its *first*
    /// key is returned instead, so `{"name": {"$eq": "srv1"}}` looked up by
    /// `name` yields `"srv1"`. On multi-operator conditions this returns
    /// whichever operator was declared first; known limitation, kept for
    /// compatibility. A `None` result is not distinguishable from a stored
    /// JSON null.
    pub fn find_search_parameter<'a>(&self, key: &str, tree: &'a Value) -> Option<&'a Value> {
        find_node(key, tree)
    }

    /// Whether `key` occurs anywhere in the stored search tree
    pub fn is_search_parameter_defined(&self, key: &str) -> bool {
        self.find_search_parameter(key, &self.search).is_some()
    }

    /// Remove *every* occurrence of `key` at any depth of the stored search
    /// tree, preserving sibling order. Deliberately asymmetric with
    /// [`find_search_parameter`](Self::find_search_parameter), which stops at
    /// the first match. The schema is not re-normalized afterwards, so an
    /// aggregate can be left with zero children.
    pub fn unset_search_parameter(&mut self, key: &str) {
        remove_node(key, &mut self.search);
    }

    /// Out-of-band flags for the query layer (e.g. matching modes); stored,
    /// never interpreted here.
    pub fn add_extra_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.extra_parameters.insert(name.into(), value);
    }

    pub fn extra_parameter(&self, name: &str) -> Option<&Value> {
        self.extra_parameters.get(name)
    }

    pub fn concordance_strict_mode(&self) -> ConcordanceMode {
        self.concordance_strict_mode
    }

    pub fn set_concordance_strict_mode(&mut self, mode: ConcordanceMode) {
        self.concordance_strict_mode = mode;
    }

    /// Snapshot of the request state for response metadata.
    ///
    /// Empty `search`/`sort` serialize as `{}`, never `[]`; API consumers
    /// type-check those fields as objects.
    pub fn to_json(&self) -> Value {
        let search = if tree_is_empty(&self.search) {
            Value::Object(Map::new())
        } else {
            self.search.clone()
        };
        let sort: Map<String, Value> = self
            .sort
            .iter()
            .map(|(field, direction)| (field.clone(), Value::String(direction.to_string())))
            .collect();
        json!({
            NAME_FOR_PAGE: self.page,
            NAME_FOR_LIMIT: self.limit,
            NAME_FOR_SEARCH: search,
            NAME_FOR_SORT: sort,
            NAME_FOR_TOTAL: self.total,
        })
    }
}

fn tree_is_empty(tree: &Value) -> bool {
    match tree {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn find_node<'a>(key: &str, node: &'a Value) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            for (candidate, value) in map {
                if candidate == key {
                    return match value {
                        Value::Object(inner) => inner.values().next(),
                        other => Some(other),
                    };
                }
                if let Some(found) = find_node(key, value) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|item| find_node(key, item)),
        _ => None,
    }
}

fn remove_node(key: &str, node: &mut Value) {
    match node {
        Value::Object(map) => {
            map.retain(|candidate, _| candidate != key);
            for value in map.values_mut() {
                remove_node(key, value);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                remove_node(key, item);
            }
        }
        _ => {}
    }
}
