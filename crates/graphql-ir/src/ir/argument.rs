use crate::types::TypeAnnotation;
use crate::types::Value;

/// A field argument whose literal value was coerced against the argument's
/// declared type.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
    pub(crate) value: Value,
}
impl Argument {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}
