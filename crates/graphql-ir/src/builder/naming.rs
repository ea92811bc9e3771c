use crate::ir::OperationKind;
use std::path::Component;
use std::path::Path;

/// Upper-cases the first character.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The model name of an operation: capitalized, and suffixed with
/// `Query`/`Mutation`/`Subscription` when semantic naming is on and the name
/// doesn't already end with it.
pub(crate) fn normalize_operation_name(
    name: &str,
    operation_kind: OperationKind,
    use_semantic_naming: bool,
) -> String {
    let capitalized = capitalize(name);
    let suffix = operation_kind.semantic_suffix();
    if use_semantic_naming && !capitalized.ends_with(suffix) {
        format!("{capitalized}{suffix}")
    } else {
        capitalized
    }
}

/// A dotted package hint derived from the directories a document lives in,
/// e.g. `com/example/queries/Hero.graphql` becomes `com.example.queries`.
pub(crate) fn package_hint_from_path(file_path: Option<&Path>) -> String {
    let Some(parent) = file_path.and_then(Path::parent) else {
        return String::new();
    };
    parent.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}
