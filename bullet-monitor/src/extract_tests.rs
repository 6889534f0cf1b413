//! Unit tests for query field extraction

#[cfg(test)]
mod tests {
    use super::super::extract::*;
    use mongobullet_protocol::{CommandRecord, CommandStartedEvent};
    use serde_json::json;

    fn record(name: &str, command: serde_json::Value) -> CommandRecord {
        CommandRecord::from_started(&CommandStartedEvent {
            request_id: 1,
            command_name: name.to_string(),
            command,
        })
        .unwrap()
    }

    #[test]
    fn test_filter_keys_become_match_fields() {
        let record = record(
            "find",
            json!({ "find": "users", "filter": { "age": 30, "name": "ann" } }),
        );
        let fields = extract_query_fields(&record);

        assert_eq!(fields.matched, vec!["age", "name"]);
        assert!(fields.sorted.is_empty());
    }

    #[test]
    fn test_sort_keys_become_sort_fields() {
        let record = record(
            "find",
            json!({ "find": "users", "sort": { "createdAt": -1 } }),
        );
        let fields = extract_query_fields(&record);

        assert!(fields.matched.is_empty());
        assert_eq!(fields.sorted, vec!["createdAt"]);
    }

    #[test]
    fn test_operator_valued_filter_counts_by_key() {
        let record = record(
            "find",
            json!({ "find": "users", "filter": { "age": { "$gt": 21 } } }),
        );
        let fields = extract_query_fields(&record);

        assert_eq!(fields.matched, vec!["age"]);
    }

    #[test]
    fn test_pipeline_stages_contribute_in_order() {
        let record = record(
            "aggregate",
            json!({
                "aggregate": "orders",
                "pipeline": [
                    { "$match": { "status": "open" } },
                    { "$group": { "_id": "$customer" } },
                    { "$sort": { "createdAt": -1 } },
                ],
            }),
        );
        let fields = extract_query_fields(&record);

        assert_eq!(fields.matched, vec!["status"]);
        assert_eq!(fields.sorted, vec!["createdAt"]);
    }

    #[test]
    fn test_repeated_keys_across_stages_union_once() {
        let record = record(
            "aggregate",
            json!({
                "aggregate": "orders",
                "pipeline": [
                    { "$match": { "status": "open", "region": "eu" } },
                    { "$match": { "status": "open" } },
                    { "$sort": { "total": -1 } },
                    { "$sort": { "total": -1, "createdAt": 1 } },
                ],
            }),
        );
        let fields = extract_query_fields(&record);

        assert_eq!(fields.matched, vec!["status", "region"]);
        assert_eq!(fields.sorted, vec!["total", "createdAt"]);
    }

    #[test]
    fn test_absent_parts_yield_empty_sets() {
        let record = record("find", json!({ "find": "users" }));
        let fields = extract_query_fields(&record);

        assert!(fields.is_empty());
    }

    #[test]
    fn test_update_filter_contributes_match_fields() {
        let record = record(
            "update",
            json!({ "update": "users", "filter": { "active": true } }),
        );
        let fields = extract_query_fields(&record);

        assert_eq!(fields.matched, vec!["active"]);
        assert!(fields.sorted.is_empty());
    }

    #[test]
    fn test_extraction_is_pure() {
        let record = record(
            "find",
            json!({ "find": "users", "filter": { "a": 1 }, "sort": { "b": 1 } }),
        );

        let first = extract_query_fields(&record);
        let second = extract_query_fields(&record);
        assert_eq!(first, second);
    }
}
