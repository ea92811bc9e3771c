use crate::ir::Field;
use crate::ir::OperationKind;
use crate::ir::Variable;
use crate::loc;

/// The IR for one named operation.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub(crate) data_field: Field,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) name: String,
    pub(crate) operation_kind: OperationKind,
    pub(crate) operation_name: String,
    pub(crate) root_type: String,
    pub(crate) source_text: String,
    pub(crate) target_package_hint: String,
    pub(crate) variables: Vec<Variable>,
}
impl Operation {
    /// The synthetic `data` field wrapping the operation's selection set.
    pub fn data_field(&self) -> &Field {
        &self.data_field
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    /// The normalized name used for generated models, e.g. `HeroNameQuery`.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn operation_kind(&self) -> OperationKind {
        self.operation_kind
    }

    /// The operation name exactly as declared in the document.
    pub fn operation_name(&self) -> &str {
        self.operation_name.as_str()
    }

    pub fn root_type(&self) -> &str {
        self.root_type.as_str()
    }

    /**
     * The operation's source text followed by that of every fragment it
     * transitively spreads, each reproduced byte-for-byte.
     */
    pub fn source_text(&self) -> &str {
        self.source_text.as_str()
    }

    pub fn target_package_hint(&self) -> &str {
        self.target_package_hint.as_str()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }
}
