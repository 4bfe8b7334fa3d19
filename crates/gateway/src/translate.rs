//! Query translation
//!
//! Converts the structured `Query` into the `QueryInput` variable the
//! backend expects:
//!
//! - equality predicates become `{ field: value }`
//! - comparisons become `{ field: { "__gt": value } }` (and `__gte`, `__lt`, `__lte`)
//! - sort becomes `{ field: 1 }` or `{ field: -1 }`
//! - page becomes top-level `limit` / `offset`

use serde_json::{Map, Value};
use smallcrud_schema::{Predicate, Query, SortSpec};

/// Fold predicates into the wire filter object
///
/// Keys are field names. A later predicate on the same field replaces
/// an earlier one.
pub fn to_wire_filter(predicates: &[Predicate]) -> Value {
    let mut filter = Map::new();
    for predicate in predicates {
        let value = match predicate.operator.wire_tag() {
            None => predicate.value.clone(),
            Some(tag) => {
                let mut wrapped = Map::new();
                wrapped.insert(tag.to_string(), predicate.value.clone());
                Value::Object(wrapped)
            }
        };
        filter.insert(predicate.name.clone(), value);
    }
    Value::Object(filter)
}

/// Wire sort object, present only when both field and direction are set
pub fn to_wire_sort(sort: Option<&SortSpec>) -> Option<Value> {
    let (name, order) = sort?.resolved()?;
    let mut map = Map::new();
    map.insert(name.to_string(), Value::from(order.direction()));
    Some(Value::Object(map))
}

/// Complete `QueryInput` variable; absent parts are omitted
pub fn to_wire_query(query: &Query) -> Value {
    let mut input = Map::new();
    input.insert("filter".to_string(), to_wire_filter(&query.filter));
    if let Some(page) = query.page {
        input.insert("limit".to_string(), Value::from(page.limit));
        input.insert("offset".to_string(), Value::from(page.offset));
    }
    if let Some(sort) = to_wire_sort(query.sort.as_ref()) {
        input.insert("sort".to_string(), sort);
    }
    Value::Object(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use smallcrud_core::{Operator, SortOrder};
    use smallcrud_schema::PageSpec;

    #[test]
    fn test_equality_is_bare_value() {
        let filter = to_wire_filter(&[Predicate::eq("name", json!("Ann"))]);
        assert_eq!(filter, json!({"name": "Ann"}));
    }

    #[test]
    fn test_each_comparison_operator() {
        let cases = [
            (Operator::Gt, "__gt"),
            (Operator::Gte, "__gte"),
            (Operator::Lt, "__lt"),
            (Operator::Lte, "__lte"),
        ];
        for (operator, tag) in cases {
            let filter = to_wire_filter(&[Predicate::new("age", operator, json!(21))]);
            assert_eq!(filter["age"][tag], json!(21), "operator {}", operator);
            assert_eq!(filter["age"].as_object().map(|m| m.len()), Some(1));
        }
    }

    #[test]
    fn test_later_predicate_on_same_field_wins() {
        let filter = to_wire_filter(&[
            Predicate::new("age", Operator::Gt, json!(18)),
            Predicate::new("age", Operator::Lt, json!(65)),
            Predicate::eq("name", json!("Bo")),
        ]);
        assert_eq!(filter, json!({"age": {"__lt": 65}, "name": "Bo"}));
    }

    #[test]
    fn test_empty_filter_is_empty_object() {
        assert_eq!(to_wire_filter(&[]), json!({}));
    }

    #[test]
    fn test_sort_translation() {
        assert_eq!(
            to_wire_sort(Some(&SortSpec::by("name", SortOrder::Ascending))),
            Some(json!({"name": 1}))
        );
        assert_eq!(
            to_wire_sort(Some(&SortSpec::by("name", SortOrder::Descending))),
            Some(json!({"name": -1}))
        );
        let no_order = SortSpec {
            name: Some("name".into()),
            order: None,
        };
        assert_eq!(to_wire_sort(Some(&no_order)), None);
        assert_eq!(to_wire_sort(None), None);
    }

    #[test]
    fn test_empty_query_only_has_filter() {
        assert_eq!(to_wire_query(&Query::new()), json!({"filter": {}}));
    }

    #[test]
    fn test_full_query() {
        let query = Query::new()
            .with_filter(vec![Predicate::new("age", Operator::Gte, json!(30))])
            .with_sort(SortSpec::by("age", SortOrder::Descending))
            .with_page(PageSpec::for_page(3, 20));
        assert_eq!(
            to_wire_query(&query),
            json!({
                "filter": {"age": {"__gte": 30}},
                "limit": 20,
                "offset": 40,
                "sort": {"age": -1}
            })
        );
    }
}
