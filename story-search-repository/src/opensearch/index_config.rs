//! Index settings and mappings for the story index.

use serde_json::{json, Value};

/// Default name of the story index.
pub const DEFAULT_INDEX_NAME: &str = "stories";

/// Get the index settings and mappings for the story index.
///
/// The configuration includes:
/// - A custom Spanish analyzer (standard tokenizer, lowercase, asciifolding,
///   Spanish stopwords, Spanish stemmer) applied to the story text
/// - **Keyword fields** for exact matching on author and document type
/// - A `text.keyword` subfield for aggregations over short texts
/// - A `yyyy-MM-dd` date field
///
/// Shard and replica counts are left to the service defaults; managed
/// deployments do not accept them.
pub fn index_body() -> Value {
    json!({
        "settings": {
            "analysis": {
                "analyzer": {
                    "spanish_analyzer": {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": [
                            "lowercase",
                            "asciifolding",
                            "spanish_stop",
                            "spanish_stemmer"
                        ]
                    }
                },
                "filter": {
                    "spanish_stop": {
                        "type": "stop",
                        "stopwords": "_spanish_"
                    },
                    "spanish_stemmer": {
                        "type": "stemmer",
                        "language": "spanish"
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "author": {
                    "type": "keyword"
                },
                "document_type": {
                    "type": "keyword"
                },
                "date": {
                    "type": "date",
                    "format": "yyyy-MM-dd"
                },
                "text": {
                    "type": "text",
                    "analyzer": "spanish_analyzer",
                    "fields": {
                        "keyword": {
                            "type": "keyword",
                            "ignore_above": 256
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_body_structure() {
        let body = index_body();

        // Exact-match fields
        assert_eq!(body["mappings"]["properties"]["author"]["type"], "keyword");
        assert_eq!(
            body["mappings"]["properties"]["document_type"]["type"],
            "keyword"
        );

        // Analyzed text field with keyword subfield
        assert_eq!(body["mappings"]["properties"]["text"]["type"], "text");
        assert_eq!(
            body["mappings"]["properties"]["text"]["analyzer"],
            "spanish_analyzer"
        );
        assert_eq!(
            body["mappings"]["properties"]["text"]["fields"]["keyword"]["type"],
            "keyword"
        );

        // Date format
        assert_eq!(
            body["mappings"]["properties"]["date"]["format"],
            "yyyy-MM-dd"
        );
    }

    #[test]
    fn test_index_body_analysis_chain() {
        let body = index_body();

        let filters = body["settings"]["analysis"]["analyzer"]["spanish_analyzer"]["filter"]
            .as_array()
            .unwrap();
        assert_eq!(filters.len(), 4);
        assert_eq!(filters[0], "lowercase");

        assert_eq!(
            body["settings"]["analysis"]["filter"]["spanish_stop"]["stopwords"],
            "_spanish_"
        );
        assert_eq!(
            body["settings"]["analysis"]["filter"]["spanish_stemmer"]["language"],
            "spanish"
        );
    }

    #[test]
    fn test_no_shard_settings() {
        let body = index_body();

        let settings = body["settings"].as_object().unwrap();
        assert!(!settings.contains_key("number_of_shards"));
        assert!(!settings.contains_key("number_of_replicas"));
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(DEFAULT_INDEX_NAME, "stories");
    }
}
