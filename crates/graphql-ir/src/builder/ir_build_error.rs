use crate::ir::OperationKind;
use crate::loc;
use thiserror::Error;

/// A fatal failure of the IR-building pass.
///
/// Apart from [`IrBuildError::ArgumentCoercion`], every variant describes
/// input that upstream validation should already have rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum IrBuildError {
    #[error("Every operation must be named, but found an anonymous operation")]
    AnonymousOperation {
        location: loc::SourceLocation,
    },

    /// `location` is the position of the field selection carrying the
    /// argument. The parser records no position for individual arguments,
    /// so an argument written on a later line still reports the field's
    /// line and column.
    #[error("Invalid value for argument `{argument_name}`: {message}")]
    ArgumentCoercion {
        argument_name: String,
        location: loc::SourceLocation,
        message: String,
    },

    #[error("`@{directive_name}` expects a boolean literal or a variable as its condition")]
    InvalidDirectiveArgument {
        directive_name: String,
        location: loc::SourceLocation,
    },

    #[error("The schema does not define a {operation_kind} root operation type")]
    MissingRootOperationType {
        location: loc::SourceLocation,
        operation_kind: OperationKind,
    },

    #[error("Could not locate the source text of `{definition_name}`")]
    SourceTextUnavailable {
        definition_name: String,
        location: loc::SourceLocation,
    },

    #[error("Field `{field_name}` is not defined on type `{type_name}`")]
    UndefinedField {
        field_name: String,
        location: loc::SourceLocation,
        type_name: String,
    },

    #[error("Fragment `{fragment_name}` is not defined")]
    UndefinedFragment {
        fragment_name: String,
        location: loc::SourceLocation,
    },

    #[error("Type `{type_name}` is not defined in the schema")]
    UndefinedType {
        location: loc::SourceLocation,
        type_name: String,
    },
}
