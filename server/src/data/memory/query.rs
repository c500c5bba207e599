//! Filter tree interpretation
//!
//! The query-building side of the request parameter contract: takes the
//! normalized search tree, sort spec, and pagination from
//! [`RequestParameters`] and applies them to entities rendered as JSON.
//! Conditions are `field: scalar` (implicit `$eq`) or `field: {op: value}`
//! with the comparison operator tokens; `$and`/`$or` groups combine nodes
//! given as lists or objects.

use std::cmp::Ordering;

use regex::Regex;
use serde_json::Value;

use crate::domain::request_parameters::{
    AGGREGATE_OPERATOR_AND, AGGREGATE_OPERATOR_OR, ComparisonOperator, ConcordanceMode,
    RequestParameters, SortOrder,
};

/// Filter, sort, and paginate `items`, writing the unlimited match count
/// back into `params` for response metadata.
pub fn apply(params: &mut RequestParameters, items: Vec<Value>) -> Vec<Value> {
    let mode = params.concordance_strict_mode();
    let mut matched: Vec<Value> = items
        .into_iter()
        .filter(|item| matches(item, params.search(), mode))
        .collect();
    sort(&mut matched, params.sort());
    params.set_total(matched.len() as u64);
    let offset = params.page().saturating_sub(1) as usize * params.limit() as usize;
    matched
        .into_iter()
        .skip(offset)
        .take(params.limit() as usize)
        .collect()
}

/// Whether `entity` satisfies the filter `node`.
///
/// Fields the entity does not carry are ignored in
/// [`ConcordanceMode::NoStrict`] and reject the candidate in
/// [`ConcordanceMode::Strict`].
pub fn matches(entity: &Value, node: &Value, mode: ConcordanceMode) -> bool {
    match node {
        Value::Object(map) => map
            .iter()
            .all(|(key, value)| entry_matches(entity, key, value, mode)),
        Value::Array(items) => items.iter().all(|item| matches(entity, item, mode)),
        _ => true,
    }
}

/// Multi-column sort in spec order; later fields break ties of earlier ones.
/// The underlying sort is stable, so equal rows keep their input order.
pub fn sort(items: &mut [Value], spec: &[(String, SortOrder)]) {
    if spec.is_empty() {
        return;
    }
    items.sort_by(|a, b| {
        for (field, direction) in spec {
            let ordering = sort_key_ordering(a.get(field), b.get(field));
            let ordering = match direction {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

#[derive(Clone, Copy)]
enum Combinator {
    All,
    Any,
}

fn entry_matches(entity: &Value, key: &str, value: &Value, mode: ConcordanceMode) -> bool {
    match key {
        AGGREGATE_OPERATOR_AND => group_matches(entity, value, mode, Combinator::All),
        AGGREGATE_OPERATOR_OR => group_matches(entity, value, mode, Combinator::Any),
        field => condition_matches(entity, field, value, mode),
    }
}

fn group_matches(entity: &Value, children: &Value, mode: ConcordanceMode, op: Combinator) -> bool {
    match children {
        Value::Array(items) => match op {
            Combinator::All => items.iter().all(|item| matches(entity, item, mode)),
            Combinator::Any => items.iter().any(|item| matches(entity, item, mode)),
        },
        Value::Object(map) => match op {
            Combinator::All => map
                .iter()
                .all(|(key, value)| entry_matches(entity, key, value, mode)),
            Combinator::Any => map
                .iter()
                .any(|(key, value)| entry_matches(entity, key, value, mode)),
        },
        // A scalar under an aggregate is meaningless; treat as no constraint
        _ => true,
    }
}

fn condition_matches(entity: &Value, field: &str, value: &Value, mode: ConcordanceMode) -> bool {
    let Some(actual) = entity.get(field) else {
        return matches!(mode, ConcordanceMode::NoStrict);
    };
    match value {
        Value::Object(operators) => operators.iter().all(|(token, operand)| {
            match ComparisonOperator::from_token(token) {
                Some(op) => compare(actual, op, operand),
                None => {
                    tracing::debug!(token = %token, "Unknown comparison operator in search filter");
                    false
                }
            }
        }),
        operand => compare(actual, ComparisonOperator::DEFAULT, operand),
    }
}

fn compare(actual: &Value, op: ComparisonOperator, operand: &Value) -> bool {
    match op {
        ComparisonOperator::Equal => values_equal(actual, operand),
        ComparisonOperator::NotEqual => !values_equal(actual, operand),
        ComparisonOperator::LessThan => {
            value_ordering(actual, operand).is_some_and(|o| o == Ordering::Less)
        }
        ComparisonOperator::LessThanOrEqual => {
            value_ordering(actual, operand).is_some_and(|o| o != Ordering::Greater)
        }
        ComparisonOperator::GreaterThan => {
            value_ordering(actual, operand).is_some_and(|o| o == Ordering::Greater)
        }
        ComparisonOperator::GreaterThanOrEqual => {
            value_ordering(actual, operand).is_some_and(|o| o != Ordering::Less)
        }
        ComparisonOperator::Like => like_matches(actual, operand),
        ComparisonOperator::NotLike => !like_matches(actual, operand),
        ComparisonOperator::In => operand
            .as_array()
            .is_some_and(|options| options.iter().any(|option| values_equal(actual, option))),
        ComparisonOperator::NotIn => operand
            .as_array()
            .is_some_and(|options| !options.iter().any(|option| values_equal(actual, option))),
    }
}

/// Equality with numeric coercion: `1` equals `1.0`
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn value_ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// SQL-LIKE matching: `%` matches any run, `_` a single character,
/// case-insensitively. Numbers are coerced to their decimal rendering.
fn like_matches(actual: &Value, pattern: &Value) -> bool {
    let Some(pattern) = pattern.as_str() else {
        return false;
    };
    let actual = match actual {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push_str("(?i)^");
    for ch in pattern.chars() {
        match ch {
            '%' => translated.push_str(".*"),
            '_' => translated.push('.'),
            other => translated.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    translated.push('$');
    Regex::new(&translated)
        .map(|re| re.is_match(&actual))
        .unwrap_or(false)
}

fn sort_key_ordering(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => value_ordering(a, b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entity() -> Value {
        json!({"id": 7, "name": "srv-web-01", "alias": "Web frontend"})
    }

    fn no_strict(node: Value) -> bool {
        matches(&entity(), &node, ConcordanceMode::NoStrict)
    }

    #[test]
    fn implicit_eq_on_scalar_condition() {
        assert!(no_strict(json!({"$and": {"name": "srv-web-01"}})));
        assert!(!no_strict(json!({"$and": {"name": "srv-web-02"}})));
    }

    #[test]
    fn comparison_operators() {
        assert!(no_strict(json!({"id": {"$eq": 7}})));
        assert!(no_strict(json!({"id": {"$neq": 8}})));
        assert!(no_strict(json!({"id": {"$lt": 8}})));
        assert!(no_strict(json!({"id": {"$le": 7}})));
        assert!(no_strict(json!({"id": {"$gt": 6}})));
        assert!(no_strict(json!({"id": {"$ge": 7}})));
        assert!(!no_strict(json!({"id": {"$lt": 7}})));
        assert!(!no_strict(json!({"id": {"$gt": 7}})));
    }

    #[test]
    fn numeric_equality_coerces_integer_and_float() {
        assert!(no_strict(json!({"id": {"$eq": 7.0}})));
    }

    #[test]
    fn multi_operator_condition_requires_all() {
        assert!(no_strict(json!({"id": {"$gt": 1, "$lt": 10}})));
        assert!(!no_strict(json!({"id": {"$gt": 1, "$lt": 5}})));
    }

    #[test]
    fn in_and_not_in_over_arrays() {
        assert!(no_strict(json!({"id": {"$in": [1, 7, 9]}})));
        assert!(!no_strict(json!({"id": {"$in": [1, 2]}})));
        assert!(no_strict(json!({"id": {"$ni": [1, 2]}})));
        assert!(!no_strict(json!({"id": {"$ni": [7]}})));
    }

    #[test]
    fn like_patterns() {
        assert!(no_strict(json!({"name": {"$lk": "srv-%"}})));
        assert!(no_strict(json!({"name": {"$lk": "srv-web-0_"}})));
        assert!(no_strict(json!({"name": {"$lk": "SRV-WEB-01"}})));
        assert!(!no_strict(json!({"name": {"$lk": "db-%"}})));
        assert!(no_strict(json!({"name": {"$nk": "db-%"}})));
    }

    #[test]
    fn like_escapes_regex_metacharacters_in_pattern() {
        let entity = json!({"name": "a.b"});
        assert!(matches(
            &entity,
            &json!({"name": {"$lk": "a.b"}}),
            ConcordanceMode::NoStrict
        ));
        // A literal dot must not match an arbitrary character
        assert!(!matches(
            &entity,
            &json!({"name": {"$lk": "axb"}}),
            ConcordanceMode::NoStrict
        ));
        assert!(!matches(
            &json!({"name": "axb"}),
            &json!({"name": {"$lk": "a.b"}}),
            ConcordanceMode::NoStrict
        ));
    }

    #[test]
    fn or_group_over_list_and_object_children() {
        assert!(no_strict(json!({"$or": [{"name": "other"}, {"id": 7}]})));
        assert!(no_strict(json!({"$or": {"name": "other", "id": 7}})));
        assert!(!no_strict(json!({"$or": [{"name": "other"}, {"id": 8}]})));
    }

    #[test]
    fn nested_groups() {
        let node = json!({"$and": [
            {"name": {"$lk": "srv-%"}},
            {"$or": [{"id": {"$gt": 100}}, {"alias": {"$lk": "%frontend"}}]}
        ]});
        assert!(no_strict(node));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(no_strict(json!({})));
        assert!(no_strict(json!({"$and": {}})));
    }

    #[test]
    fn unknown_field_ignored_unless_strict() {
        let node = json!({"$and": {"no_such_field": 1}});
        assert!(matches(&entity(), &node, ConcordanceMode::NoStrict));
        assert!(!matches(&entity(), &node, ConcordanceMode::Strict));
    }

    #[test]
    fn unknown_operator_rejects_the_condition() {
        assert!(!no_strict(json!({"id": {"$between": [1, 10]}})));
    }

    #[test]
    fn sort_orders_by_spec_with_tie_breaking() {
        let mut items = vec![
            json!({"group": "b", "id": 1}),
            json!({"group": "a", "id": 3}),
            json!({"group": "a", "id": 2}),
        ];
        sort(
            &mut items,
            &[
                ("group".to_string(), SortOrder::Asc),
                ("id".to_string(), SortOrder::Desc),
            ],
        );
        let ids: Vec<_> = items.iter().map(|i| i["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn sort_missing_field_sorts_first_ascending() {
        let mut items = vec![json!({"id": 1}), json!({})];
        sort(&mut items, &[("id".to_string(), SortOrder::Asc)]);
        assert_eq!(items[0], json!({}));
    }

    #[test]
    fn apply_filters_sorts_paginates_and_sets_total() {
        let items: Vec<Value> = (1..=25)
            .map(|id| json!({"id": id, "name": format!("srv-{id:02}")}))
            .collect();
        let mut params = RequestParameters::from_query(
            Some(2),
            Some(5),
            Some(r#"{"id": "desc"}"#),
            Some(r#"{"id": {"$le": 20}}"#),
        )
        .unwrap();
        let page = apply(&mut params, items);
        assert_eq!(params.total(), 20);
        let ids: Vec<_> = page.iter().map(|i| i["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![15, 14, 13, 12, 11]);
    }

    #[test]
    fn apply_with_zero_limit_returns_nothing_but_counts_all() {
        let items = vec![json!({"id": 1}), json!({"id": 2})];
        let mut params = RequestParameters::from_query(Some(1), Some(0), None, None).unwrap();
        let page = apply(&mut params, items);
        assert!(page.is_empty());
        assert_eq!(params.total(), 2);
    }

    #[test]
    fn apply_past_the_last_page_is_empty() {
        let items = vec![json!({"id": 1}), json!({"id": 2})];
        let mut params = RequestParameters::from_query(Some(9), Some(10), None, None).unwrap();
        assert!(apply(&mut params, items).is_empty());
        assert_eq!(params.total(), 2);
    }
}
