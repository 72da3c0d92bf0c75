//! Interpretation of a GraphQL introspection document.
//!
//! Everything in here is pure: functions take the introspected schema as an
//! argument and derive facts from the raw `__Type` shapes, such as whether a
//! type is a table or which fields can be selected without nesting.

pub mod classify;
pub mod lookup;
pub mod model;
pub mod type_ref;

pub use classify::{
    OperationKind, ROOT_TYPE_NAMES, TABLE_HELPER_SUFFIXES, is_leaf_type, is_table_type,
    root_type_name,
};
pub use lookup::{find_type, resolve_table_type};
pub use model::{
    Argument, EnumValue, Field, InputValue, IntrospectionSchema, NamedType, RootTypeRef, TypeKind,
    TypeRef,
};
pub use type_ref::{UnwrappedType, render_type, unwrap_type};

/// Query used to fetch the schema from the GraphQL endpoint
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
  }
  inputFields {
    ...InputValue
  }
  enumValues(includeDeprecated: true) {
    name
    description
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
"#;
