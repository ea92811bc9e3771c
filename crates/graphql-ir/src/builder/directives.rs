use crate::ast;
use crate::builder::IrBuildError;
use crate::ir::Condition;
use crate::loc;

type Result<T> = std::result::Result<T, IrBuildError>;

/// Whether a selection can be part of a response, as decided by its
/// `@skip`/`@include` directives.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Inclusion {
    /// A literal condition rules the selection out entirely.
    Never,

    /// Selected whenever every runtime condition holds. An empty list means
    /// unconditionally.
    When(Vec<Condition>),
}

/// Evaluates `@skip`/`@include` on one selection.
///
/// Only a directive with exactly one argument is inspected; any other
/// directive (or a `@skip`/`@include` with zero or several arguments) is
/// ignored. Literal conditions that always select are dropped, literal
/// conditions that never select yield [`Inclusion::Never`] and variables
/// become runtime [`Condition`]s.
pub(crate) fn inclusion(
    directives: &[ast::operation::Directive],
    location: &loc::SourceLocation,
) -> Result<Inclusion> {
    let mut conditions = vec![];
    for directive in directives {
        let inverted = match directive.name.as_str() {
            "skip" => true,
            "include" => false,
            _ => continue,
        };
        let [(_, value)] = directive.arguments.as_slice() else {
            continue;
        };

        match value {
            ast::operation::Value::Boolean(literal) => {
                if *literal == inverted {
                    return Ok(Inclusion::Never);
                }
            },

            ast::operation::Value::Variable(variable_name) => {
                let condition = Condition::Boolean {
                    variable_name: variable_name.to_owned(),
                    inverted,
                };
                if !conditions.contains(&condition) {
                    conditions.push(condition);
                }
            },

            _ => return Err(IrBuildError::InvalidDirectiveArgument {
                directive_name: directive.name.to_owned(),
                location: location.with_ast_position(&directive.position),
            }),
        }
    }
    Ok(Inclusion::When(conditions))
}

/// Appends each condition not already present.
pub(crate) fn extend_conditions(
    conditions: &mut Vec<Condition>,
    additional: impl IntoIterator<Item = Condition>,
) {
    for condition in additional {
        if !conditions.contains(&condition) {
            conditions.push(condition);
        }
    }
}
