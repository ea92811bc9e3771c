use crate::ir::field::derive_keys;
use crate::ir::Condition;
use crate::ir::Field;
use crate::ir::SelectionKey;
use indexmap::IndexSet;

/// A type-conditioned slice of a selection set.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Fragment {
    Implementation(FragmentImplementation),
    Interface(FragmentInterface),
}
impl Fragment {
    pub fn as_implementation(&self) -> Option<&FragmentImplementation> {
        if let Self::Implementation(implementation) = self {
            Some(implementation)
        } else {
            None
        }
    }

    pub fn as_interface(&self) -> Option<&FragmentInterface> {
        if let Self::Interface(interface) = self {
            Some(interface)
        } else {
            None
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        match self {
            Self::Implementation(implementation) => &implementation.conditions,
            Self::Interface(interface) => &interface.conditions,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Implementation(implementation) => &implementation.fields,
            Self::Interface(interface) => &interface.fields,
        }
    }

    /// An interface is named after its type condition; an implementation
    /// after the type conditions it groups plus its enclosing selection.
    pub fn name(&self) -> &str {
        match self {
            Self::Implementation(implementation) => implementation.name.as_str(),
            Self::Interface(interface) => interface.type_condition.as_str(),
        }
    }

    pub fn possible_types(&self) -> &IndexSet<String> {
        match self {
            Self::Implementation(implementation) => &implementation.possible_types,
            Self::Interface(interface) => &interface.possible_types,
        }
    }

    pub fn selection_keys(&self) -> &IndexSet<SelectionKey> {
        match self {
            Self::Implementation(implementation) => &implementation.selection_keys,
            Self::Interface(interface) => &interface.selection_keys,
        }
    }

    pub(crate) fn with_derived_keys<F>(&self, derive: &F) -> Self
    where
        F: Fn(&SelectionKey) -> Vec<SelectionKey>,
    {
        let fields: Vec<Field> = self.fields().iter()
            .map(|field| field.with_derived_keys(derive))
            .collect();
        let selection_keys = derive_keys(self.selection_keys(), derive);

        match self {
            Self::Implementation(implementation) =>
                Self::Implementation(FragmentImplementation {
                    fields,
                    selection_keys,
                    ..implementation.clone()
                }),

            Self::Interface(interface) =>
                Self::Interface(FragmentInterface {
                    fields,
                    selection_keys,
                    ..interface.clone()
                }),
        }
    }
}

/// The contract shared by every occurrence of one type condition at a
/// selection site.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentInterface {
    pub(crate) conditions: Vec<Condition>,
    pub(crate) description: Option<String>,
    pub(crate) fields: Vec<Field>,
    pub(crate) possible_types: IndexSet<String>,
    pub(crate) selection_keys: IndexSet<SelectionKey>,
    pub(crate) type_condition: String,
}
impl FragmentInterface {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /**
     * The concrete types satisfying this type condition, restricted to
     * those possible at the selection site.
     */
    pub fn possible_types(&self) -> &IndexSet<String> {
        &self.possible_types
    }

    pub fn selection_keys(&self) -> &IndexSet<SelectionKey> {
        &self.selection_keys
    }

    pub fn type_condition(&self) -> &str {
        self.type_condition.as_str()
    }
}

/// A concrete model covering exactly the concrete types that satisfy the
/// same set of type conditions at a selection site.
///
/// The implementations of one site partition that site's possible types.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentImplementation {
    pub(crate) conditions: Vec<Condition>,
    pub(crate) description: Option<String>,
    pub(crate) fields: Vec<Field>,
    pub(crate) name: String,
    pub(crate) possible_types: IndexSet<String>,
    pub(crate) selection_keys: IndexSet<SelectionKey>,
    pub(crate) type_conditions: Vec<String>,
}
impl FragmentImplementation {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn possible_types(&self) -> &IndexSet<String> {
        &self.possible_types
    }

    pub fn selection_keys(&self) -> &IndexSet<SelectionKey> {
        &self.selection_keys
    }

    /**
     * The type conditions this implementation satisfies, in the order they
     * were first seen. Empty for the implementation covering types that
     * satisfy none of the site's fragments.
     */
    pub fn type_conditions(&self) -> &[String] {
        &self.type_conditions
    }
}
