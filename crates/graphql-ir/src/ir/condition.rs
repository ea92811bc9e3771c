/// A runtime condition controlling whether a selection is included.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Condition {
    /// Produced by `@include(if: $var)` (`inverted: false`) or
    /// `@skip(if: $var)` (`inverted: true`).
    #[serde(rename_all = "camelCase")]
    Boolean {
        variable_name: String,
        inverted: bool,
    },
}
impl Condition {
    /// Whether the selection is included for the given variable value.
    pub fn evaluate(&self, variable_value: bool) -> bool {
        match self {
            Self::Boolean { inverted, .. } => variable_value != *inverted,
        }
    }

    pub fn variable_name(&self) -> &str {
        match self {
            Self::Boolean { variable_name, .. } => variable_name.as_str(),
        }
    }
}
