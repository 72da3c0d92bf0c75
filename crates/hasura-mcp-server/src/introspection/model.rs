//! Serde model of a GraphQL introspection document
//!
//! Only the parts of `__Schema` that the tools read are modelled. Unknown
//! keys (directives, deprecation info, interfaces) are ignored on
//! deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind tag of a `__Type`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a `NON_NULL` / `LIST` wrapper chain.
///
/// Wrapper nodes carry no name and own the next node in `of_type`. The node
/// without `of_type` is the terminal and names the underlying type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// A terminal reference to a named type
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// Wrap `inner` in a `NON_NULL` node
    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Wrap `inner` in a `LIST` node
    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

/// A field of an object or interface type
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A field argument or an input object field
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Field arguments share the shape of input values
pub type Argument = InputValue;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A top-level type of the schema
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedType {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
}

impl NamedType {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared fields, or an empty slice for kinds without fields
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }
}

/// Reference to a root operation type
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RootTypeRef {
    pub name: String,
}

/// The `__schema` object of an introspection response
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub query_type: Option<RootTypeRef>,
    #[serde(default)]
    pub mutation_type: Option<RootTypeRef>,
    #[serde(default)]
    pub subscription_type: Option<RootTypeRef>,
    #[serde(default)]
    pub types: Vec<NamedType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wrapped_field_types() {
        let field: Field = serde_json::from_value(json!({
            "name": "authors",
            "description": null,
            "args": [],
            "type": {
                "kind": "NON_NULL",
                "name": null,
                "ofType": {
                    "kind": "LIST",
                    "name": null,
                    "ofType": {
                        "kind": "NON_NULL",
                        "name": null,
                        "ofType": { "kind": "OBJECT", "name": "authors", "ofType": null }
                    }
                }
            },
            "isDeprecated": false
        }))
        .unwrap();

        assert_eq!(
            field.ty,
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(
                TypeKind::Object,
                "authors"
            ))))
        );
    }

    #[test]
    fn missing_collections_stay_absent() {
        let named: NamedType = serde_json::from_value(json!({
            "kind": "SCALAR",
            "name": "uuid",
            "description": null,
            "fields": null,
            "inputFields": null,
            "interfaces": null,
            "enumValues": null,
            "possibleTypes": null
        }))
        .unwrap();

        assert_eq!(named.kind, TypeKind::Scalar);
        assert!(named.fields.is_none());
        assert!(named.fields().is_empty());
        assert!(named.enum_values.is_none());
    }

    #[test]
    fn deserializes_schema_without_mutation_root() {
        let schema: IntrospectionSchema = serde_json::from_value(json!({
            "queryType": { "name": "query_root" },
            "mutationType": null,
            "subscriptionType": null,
            "types": [],
            "directives": []
        }))
        .unwrap();

        assert_eq!(
            schema.query_type,
            Some(RootTypeRef {
                name: "query_root".to_string()
            })
        );
        assert!(schema.mutation_type.is_none());
    }
}
