//! Name based lookups into the introspected types

use super::model::{IntrospectionSchema, NamedType};

/// Find a type by exact name
pub fn find_type<'a>(schema: &'a IntrospectionSchema, name: &str) -> Option<&'a NamedType> {
    schema
        .types
        .iter()
        .find(|named_type| named_type.name() == Some(name))
}

/// Resolve the type backing a table.
///
/// Tables outside the default schema are exposed as `<schema>_<table>`, so
/// the lookup tries the exact name, then the qualified name, then falls back
/// to a case-insensitive match against either.
pub fn resolve_table_type<'a>(
    schema: &'a IntrospectionSchema,
    table_name: &str,
    schema_name: Option<&str>,
) -> Option<&'a NamedType> {
    let qualified = schema_name.map(|schema_name| format!("{schema_name}_{table_name}"));

    find_type(schema, table_name)
        .or_else(|| {
            qualified
                .as_deref()
                .and_then(|qualified| find_type(schema, qualified))
        })
        .or_else(|| {
            schema.types.iter().find(|named_type| {
                named_type.name().is_some_and(|name| {
                    name.eq_ignore_ascii_case(table_name)
                        || qualified
                            .as_deref()
                            .is_some_and(|qualified| name.eq_ignore_ascii_case(qualified))
                })
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::model::TypeKind;

    fn named(name: &str) -> NamedType {
        NamedType {
            kind: TypeKind::Object,
            name: Some(name.to_string()),
            description: Some(format!("the {name} type")),
            fields: Some(vec![]),
            input_fields: None,
            enum_values: None,
        }
    }

    fn schema() -> IntrospectionSchema {
        IntrospectionSchema {
            types: vec![named("authors"), named("sales_orders"), named("Invoices")],
            ..Default::default()
        }
    }

    #[test]
    fn finds_exact_names() {
        let schema = schema();
        assert_eq!(
            find_type(&schema, "authors").and_then(NamedType::name),
            Some("authors")
        );
        assert!(find_type(&schema, "Authors").is_none());
    }

    #[test]
    fn resolves_schema_qualified_tables() {
        let schema = schema();
        let resolved = resolve_table_type(&schema, "orders", Some("sales"));
        assert_eq!(resolved.and_then(NamedType::name), Some("sales_orders"));
    }

    #[test]
    fn exact_name_wins_over_qualified() {
        let schema = schema();
        let resolved = resolve_table_type(&schema, "authors", Some("sales"));
        assert_eq!(resolved.and_then(NamedType::name), Some("authors"));
    }

    #[test]
    fn falls_back_to_case_insensitive_match() {
        let schema = schema();
        assert_eq!(
            resolve_table_type(&schema, "invoices", None).and_then(NamedType::name),
            Some("Invoices")
        );
        assert_eq!(
            resolve_table_type(&schema, "ORDERS", Some("SALES")).and_then(NamedType::name),
            Some("sales_orders")
        );
    }

    #[test]
    fn unknown_table_is_not_resolved() {
        assert!(resolve_table_type(&schema(), "missing", Some("public")).is_none());
    }
}
