//! Mutation gating for free-form GraphQL documents

use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq, Copy, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MutationMode {
    /// Only read operations may be executed
    #[default]
    None,
    /// Mutations may be executed through the dedicated mutation tool
    All,
}

impl MutationMode {
    pub fn allows_mutations(self) -> bool {
        matches!(self, MutationMode::All)
    }
}

/// Replace comments, block strings and string literals with whitespace
#[allow(clippy::expect_used)]
fn strip_non_code(document: &str) -> String {
    static NON_CODE_PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = NON_CODE_PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)"""(?:\\"""|.)*?"""|"(?:\\.|[^"\\\n])*"|#[^\n]*"#)
            .expect("regex pattern compiles")
    });
    re.replace_all(document, " ").into_owned()
}

/// Whether a GraphQL document contains a `mutation` operation.
///
/// Only the first name of a top-level definition counts as its operation
/// type, so fields, arguments, variables and fragments named `mutation` do
/// not trigger a rejection.
#[allow(clippy::expect_used)]
pub fn is_mutation(document: &str) -> bool {
    static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = TOKEN_PATTERN.get_or_init(|| {
        Regex::new(r"[{}()]|[$@]?[_A-Za-z][_0-9A-Za-z]*").expect("regex pattern compiles")
    });

    let normalized = strip_non_code(document);
    let mut braces: usize = 0;
    let mut parens: usize = 0;
    let mut definition_start = true;
    for token in re.find_iter(&normalized) {
        match token.as_str() {
            "{" => {
                braces += 1;
                definition_start = false;
            }
            "}" => {
                braces = braces.saturating_sub(1);
                definition_start = braces == 0 && parens == 0;
            }
            "(" => parens += 1,
            ")" => parens = parens.saturating_sub(1),
            name if braces == 0 && parens == 0 => {
                if definition_start && name == "mutation" {
                    return true;
                }
                definition_start = false;
            }
            _ => {}
        }
    }
    false
}
