//! Semantic classification of introspected types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::lookup::find_type;
use super::model::{IntrospectionSchema, NamedType, TypeKind};

/// Prefix reserved for the introspection system types
pub const INTROSPECTION_PREFIX: &str = "__";

/// Conventional names of the root operation types
pub const ROOT_TYPE_NAMES: [&str; 3] = ["query_root", "mutation_root", "subscription_root"];

/// Suffixes of the helper types generated alongside every table.
///
/// An object type whose name ends with one of these is an aggregate, filter,
/// ordering or mutation payload type rather than a table. A table that
/// happens to be named with one of these suffixes is misclassified.
pub const TABLE_HELPER_SUFFIXES: &[&str] = &[
    "_aggregate",
    "_aggregate_fields",
    "_aggregate_order_by",
    "_aggregate_bool_exp",
    "_avg_fields",
    "_max_fields",
    "_min_fields",
    "_sum_fields",
    "_stddev_fields",
    "_stddev_pop_fields",
    "_stddev_samp_fields",
    "_var_pop_fields",
    "_var_samp_fields",
    "_variance_fields",
    "_avg_order_by",
    "_max_order_by",
    "_min_order_by",
    "_sum_order_by",
    "_stddev_order_by",
    "_stddev_pop_order_by",
    "_stddev_samp_order_by",
    "_var_pop_order_by",
    "_var_samp_order_by",
    "_variance_order_by",
    "_order_by",
    "_bool_exp",
    "_comparison_exp",
    "_mutation_response",
    "_stream_cursor_input",
    "_stream_cursor_value_input",
];

/// Whether a type represents a queryable table
pub fn is_table_type(named_type: &NamedType) -> bool {
    if named_type.kind != TypeKind::Object {
        return false;
    }
    let Some(name) = named_type.name() else {
        return false;
    };

    !name.starts_with(INTROSPECTION_PREFIX)
        && !ROOT_TYPE_NAMES.contains(&name)
        && !TABLE_HELPER_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
        && !named_type.fields().is_empty()
}

/// A GraphQL root operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// The root type name used when the schema does not declare one
    pub fn default_root_name(self) -> &'static str {
        match self {
            OperationKind::Query => "query_root",
            OperationKind::Mutation => "mutation_root",
            OperationKind::Subscription => "subscription_root",
        }
    }
}

/// The declared root type name for `operation`, or its conventional default
pub fn root_type_name(schema: &IntrospectionSchema, operation: OperationKind) -> &str {
    let declared = match operation {
        OperationKind::Query => schema.query_type.as_ref(),
        OperationKind::Mutation => schema.mutation_type.as_ref(),
        OperationKind::Subscription => schema.subscription_type.as_ref(),
    };
    declared
        .map(|root| root.name.as_str())
        .unwrap_or_else(|| operation.default_root_name())
}

/// Whether `name` refers to a scalar or enum type of the schema.
///
/// Leaf types can be selected without a nested selection set.
pub fn is_leaf_type(name: Option<&str>, schema: &IntrospectionSchema) -> bool {
    name.and_then(|name| find_type(schema, name))
        .is_some_and(|named_type| matches!(named_type.kind, TypeKind::Scalar | TypeKind::Enum))
}
