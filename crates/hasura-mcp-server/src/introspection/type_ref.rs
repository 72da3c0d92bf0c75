//! Unwrapping and rendering of type reference chains

use std::fmt;

use serde::Serialize;

use super::model::{TypeKind, TypeRef};

/// The terminal type of a wrapper chain along with the wrappers seen on the way
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnwrappedType<'a> {
    pub name: Option<&'a str>,
    pub kind: TypeKind,
    pub is_list: bool,
    pub is_non_null: bool,
}

/// Follow `of_type` to the terminal node.
///
/// `is_list` and `is_non_null` are set if any node of the chain is a `LIST`
/// or `NON_NULL` wrapper respectively. A terminal without a name is passed
/// through as `None`.
pub fn unwrap_type(type_ref: &TypeRef) -> UnwrappedType<'_> {
    let mut current = type_ref;
    let mut is_list = false;
    let mut is_non_null = false;

    loop {
        match current.kind {
            TypeKind::List => is_list = true,
            TypeKind::NonNull => is_non_null = true,
            _ => {}
        }
        match current.of_type.as_deref() {
            Some(inner) => current = inner,
            None => break,
        }
    }

    UnwrappedType {
        name: current.name.as_deref(),
        kind: current.kind,
        is_list,
        is_non_null,
    }
}

/// Render a chain in GraphQL notation, e.g. `[book!]!`
pub fn render_type(type_ref: &TypeRef) -> String {
    type_ref.to_string()
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.of_type.as_deref()) {
            (TypeKind::NonNull, Some(inner)) => write!(f, "{inner}!"),
            (TypeKind::List, Some(inner)) => write!(f, "[{inner}]"),
            // Unnamed terminals fall back to their kind
            (kind, _) => match &self.name {
                Some(name) => f.write_str(name),
                None => f.write_str(kind.as_str()),
            },
        }
    }
}
