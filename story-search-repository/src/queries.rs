//! Search query body builders.
//!
//! This module provides functions that build the JSON bodies for the query
//! shapes the demo issues: match-all, term, match, range, bool, terms
//! aggregation, and multi-match. The bodies follow the service's query
//! grammar verbatim; builders never invent clauses, so an absent argument
//! produces no corresponding key in the body.

use serde_json::{json, Map, Value};

/// Build a match-all query returning up to `size` documents.
pub fn build_match_all_query(size: usize) -> Value {
    json!({
        "query": {
            "match_all": {}
        },
        "size": size
    })
}

/// Build a term query for an exact value on a keyword field.
pub fn build_term_query(field: &str, value: &str) -> Value {
    json!({
        "query": {
            "term": {
                field: value
            }
        }
    })
}

/// Build a match query against an analyzed field.
///
/// Results carry relevance scores. `source_fields` limits the stored fields
/// returned with each hit.
pub fn build_match_query(field: &str, text: &str, source_fields: Option<&[&str]>) -> Value {
    let mut body = json!({
        "query": {
            "match": {
                field: text
            }
        }
    });
    apply_source_filter(&mut body, source_fields);
    body
}

/// Build a range query over a date or numeric field.
///
/// Either bound may be open; an open bound is omitted from the body.
pub fn build_range_query(
    field: &str,
    gte: Option<&str>,
    lte: Option<&str>,
    source_fields: Option<&[&str]>,
) -> Value {
    let mut conditions = Map::new();
    if let Some(gte) = gte {
        conditions.insert("gte".to_string(), json!(gte));
    }
    if let Some(lte) = lte {
        conditions.insert("lte".to_string(), json!(lte));
    }

    let mut body = json!({
        "query": {
            "range": {
                field: conditions
            }
        }
    });
    apply_source_filter(&mut body, source_fields);
    body
}

/// Build a compound bool query.
///
/// # Arguments
///
/// * `must` - Clauses that must match (affect the score)
/// * `filter` - Clauses that must match without affecting the score
/// * `should` - Optional clauses that boost matching documents
///
/// Empty clause lists are omitted from the body.
pub fn build_bool_query(
    must: Vec<Value>,
    filter: Vec<Value>,
    should: Vec<Value>,
    source_fields: Option<&[&str]>,
) -> Value {
    let mut conditions = Map::new();
    if !must.is_empty() {
        conditions.insert("must".to_string(), Value::Array(must));
    }
    if !filter.is_empty() {
        conditions.insert("filter".to_string(), Value::Array(filter));
    }
    if !should.is_empty() {
        conditions.insert("should".to_string(), Value::Array(should));
    }

    let mut body = json!({
        "query": {
            "bool": conditions
        }
    });
    apply_source_filter(&mut body, source_fields);
    body
}

/// Build a terms aggregation over a keyword field.
///
/// `size` is 0: only the buckets are wanted, not the documents.
pub fn build_terms_aggregation(field: &str, agg_name: &str) -> Value {
    json!({
        "size": 0,
        "aggs": {
            agg_name: {
                "terms": {
                    "field": field
                }
            }
        }
    })
}

/// Build a multi-match query over several fields at once.
pub fn build_multi_match_query(
    text: &str,
    fields: &[&str],
    source_fields: Option<&[&str]>,
) -> Value {
    let mut body = json!({
        "query": {
            "multi_match": {
                "query": text,
                "fields": fields
            }
        }
    });
    apply_source_filter(&mut body, source_fields);
    body
}

/// Add a `_source` filter to a query body when fields are requested.
fn apply_source_filter(body: &mut Value, source_fields: Option<&[&str]>) {
    if let (Some(fields), Some(map)) = (source_fields, body.as_object_mut()) {
        map.insert("_source".to_string(), json!(fields));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_match_all_query() {
        let query = build_match_all_query(100);

        assert!(query["query"]["match_all"].is_object());
        assert_eq!(query["size"], 100);
    }

    #[test]
    fn test_build_term_query() {
        let query = build_term_query("document_type", "terror");

        assert_eq!(query["query"]["term"]["document_type"], "terror");
        assert!(query.get("_source").is_none());
    }

    #[test]
    fn test_build_match_query_with_source_filter() {
        let query = build_match_query(
            "text",
            "dragón mágico reino",
            Some(&["author", "document_type"]),
        );

        assert_eq!(query["query"]["match"]["text"], "dragón mágico reino");
        let source = query["_source"].as_array().unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source[0], "author");
    }

    #[test]
    fn test_build_match_query_without_source_filter() {
        let query = build_match_query("text", "dragón", None);

        assert!(query.get("_source").is_none());
    }

    #[test]
    fn test_build_range_query_both_bounds() {
        let query = build_range_query("date", Some("2024-04-01"), Some("2024-07-31"), None);

        assert_eq!(query["query"]["range"]["date"]["gte"], "2024-04-01");
        assert_eq!(query["query"]["range"]["date"]["lte"], "2024-07-31");
    }

    #[test]
    fn test_build_range_query_open_lower_bound() {
        let query = build_range_query("date", None, Some("2024-07-31"), None);

        let conditions = query["query"]["range"]["date"].as_object().unwrap();
        assert!(!conditions.contains_key("gte"));
        assert_eq!(conditions["lte"], "2024-07-31");
    }

    #[test]
    fn test_build_bool_query() {
        let query = build_bool_query(
            vec![json!({ "match": { "text": "reino" } })],
            vec![json!({ "term": { "document_type": "fantastico" } })],
            vec![],
            Some(&["author"]),
        );

        let bool_clause = query["query"]["bool"].as_object().unwrap();
        assert_eq!(bool_clause["must"].as_array().unwrap().len(), 1);
        assert_eq!(bool_clause["filter"].as_array().unwrap().len(), 1);
        assert!(!bool_clause.contains_key("should"));
        assert_eq!(query["_source"][0], "author");
    }

    #[test]
    fn test_build_bool_query_empty_clauses_omitted() {
        let query = build_bool_query(vec![], vec![], vec![], None);

        assert!(query["query"]["bool"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_build_terms_aggregation() {
        let query = build_terms_aggregation("document_type", "stories_by_type");

        assert_eq!(query["size"], 0);
        assert_eq!(
            query["aggs"]["stories_by_type"]["terms"]["field"],
            "document_type"
        );
    }

    #[test]
    fn test_build_multi_match_query() {
        let query = build_multi_match_query(
            "Maria dragon",
            &["author", "text"],
            Some(&["author", "document_type"]),
        );

        assert_eq!(query["query"]["multi_match"]["query"], "Maria dragon");
        let fields = query["query"]["multi_match"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], "text");
    }
}
