//! Introspection documents shared by the unit tests

use serde_json::{Value, json};

use crate::schema_cache::{CachedSchema, SchemaCache};

fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn non_null(inner: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn list(inner: Value) -> Value {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

fn field(name: &str, ty: Value) -> Value {
    json!({ "name": name, "description": null, "args": [], "type": ty })
}

fn field_with_args(name: &str, description: &str, ty: Value, args: Vec<Value>) -> Value {
    json!({ "name": name, "description": description, "args": args, "type": ty })
}

fn arg(name: &str, ty: Value) -> Value {
    json!({ "name": name, "description": null, "type": ty, "defaultValue": null })
}

fn object(name: &str, description: Option<&str>, fields: Vec<Value>) -> Value {
    json!({
        "kind": "OBJECT",
        "name": name,
        "description": description,
        "fields": fields,
        "inputFields": null,
        "enumValues": null
    })
}

fn scalar(name: &str) -> Value {
    json!({
        "kind": "SCALAR",
        "name": name,
        "description": null,
        "fields": null,
        "inputFields": null,
        "enumValues": null
    })
}

/// The `__schema` object of a small relational schema with `authors` and
/// `articles` tables and their generated helper types
pub(crate) fn schema_json() -> Value {
    json!({
        "queryType": { "name": "query_root" },
        "mutationType": { "name": "mutation_root" },
        "subscriptionType": null,
        "types": [
            object("query_root", None, vec![
                field_with_args(
                    "authors",
                    "fetch data from the table: \"authors\"",
                    non_null(list(non_null(named("OBJECT", "authors")))),
                    vec![
                        arg("limit", named("SCALAR", "Int")),
                        arg("where", named("INPUT_OBJECT", "authors_bool_exp")),
                    ],
                ),
                field("authors_aggregate", non_null(named("OBJECT", "authors_aggregate"))),
                field("articles", non_null(list(non_null(named("OBJECT", "articles"))))),
            ]),
            object("mutation_root", None, vec![
                field("insert_authors", named("OBJECT", "authors_mutation_response")),
            ]),
            object("authors", Some("columns and relationships of \"authors\""), vec![
                field("id", non_null(named("SCALAR", "uuid"))),
                field("name", non_null(named("SCALAR", "String"))),
                field("articles", non_null(list(non_null(named("OBJECT", "articles"))))),
            ]),
            object("articles", None, vec![
                field("id", non_null(named("SCALAR", "uuid"))),
                field("title", named("SCALAR", "String")),
                field("status", named("ENUM", "article_status")),
                field("author", named("OBJECT", "authors")),
            ]),
            object("authors_aggregate", None, vec![
                field("aggregate", named("OBJECT", "authors_aggregate_fields")),
            ]),
            object("authors_aggregate_fields", None, vec![
                field("count", non_null(named("SCALAR", "Int"))),
            ]),
            object("authors_mutation_response", None, vec![
                field("affected_rows", non_null(named("SCALAR", "Int"))),
            ]),
            object("empty_view", None, vec![]),
            {
                "kind": "INPUT_OBJECT",
                "name": "authors_bool_exp",
                "description": "Boolean expression to filter rows from the table \"authors\"",
                "fields": null,
                "inputFields": [
                    arg("name", named("INPUT_OBJECT", "String_comparison_exp")),
                    arg("_and", list(non_null(named("INPUT_OBJECT", "authors_bool_exp")))),
                ],
                "enumValues": null
            },
            {
                "kind": "ENUM",
                "name": "article_status",
                "description": null,
                "fields": null,
                "inputFields": null,
                "enumValues": [
                    { "name": "draft", "description": null, "isDeprecated": false },
                    { "name": "published", "description": "visible to readers", "isDeprecated": false }
                ]
            },
            scalar("uuid"),
            scalar("String"),
            scalar("Int"),
            object("__Schema", None, vec![
                field("types", non_null(list(non_null(named("OBJECT", "__Type"))))),
            ]),
        ]
    })
}

/// A full introspection response wrapping [`schema_json`]
pub(crate) fn introspection_response() -> Value {
    json!({ "data": { "__schema": schema_json() } })
}

/// A cache already holding [`schema_json`]
pub(crate) fn schema_cache() -> SchemaCache {
    #[allow(clippy::unwrap_used)]
    SchemaCache::with_schema(CachedSchema::from_raw(schema_json()).unwrap())
}
