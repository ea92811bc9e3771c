use crate::ast;
use crate::schema::SchemaBuilder;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::sync::LazyLock;

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

static EMPTY_POSSIBLE_TYPES: LazyLock<IndexSet<String>> =
    LazyLock::new(IndexSet::new);

/// An immutable, read-only index over a GraphQL schema.
///
/// This is the only view of the schema the IR builder needs: type lookup by
/// name, the possible concrete (object) types of any type, field definitions
/// by owning type and field deprecation.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) mutation_type: Option<String>,
    pub(crate) possible_types: HashMap<String, IndexSet<String>>,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) typename_field: ast::schema::Field,
    pub(crate) types: IndexMap<String, ast::schema::TypeDefinition>,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// All type definitions in this schema (including injected built-in
    /// scalars), in definition order.
    pub fn all_types(&self) -> &IndexMap<String, ast::schema::TypeDefinition> {
        &self.types
    }

    /// The deprecation reason of a field, if it is annotated with
    /// `@deprecated`. A `@deprecated` without an explicit `reason` yields
    /// GraphQL's default reason.
    pub fn deprecation_reason(&self, field_def: &ast::schema::Field) -> Option<String> {
        let directive = field_def.directives.iter()
            .find(|directive| directive.name == "deprecated")?;

        let reason = directive.arguments.iter()
            .find(|(arg_name, _)| arg_name == "reason")
            .and_then(|(_, value)| match value {
                ast::operation::Value::String(reason) => Some(reason.to_owned()),
                _ => None,
            });

        Some(reason.unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string()))
    }

    /// Look up the definition of `field_name` on the object or interface type
    /// named `type_name`.
    ///
    /// The `__typename` meta-field resolves on every composite type
    /// (including unions).
    pub fn field_definition(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Option<&ast::schema::Field> {
        let type_def = self.types.get(type_name)?;
        if field_name == "__typename" {
            return match type_def {
                ast::schema::TypeDefinition::Interface(_)
                    | ast::schema::TypeDefinition::Object(_)
                    | ast::schema::TypeDefinition::Union(_)
                    => Some(&self.typename_field),
                _ => None,
            };
        }

        let fields = match type_def {
            ast::schema::TypeDefinition::Interface(iface) => &iface.fields,
            ast::schema::TypeDefinition::Object(obj) => &obj.fields,
            _ => return None,
        };
        fields.iter().find(|field| field.name == field_name)
    }

    /// Returns this schema's Mutation root operation type name (if one was
    /// defined).
    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// The set of concrete object types that satisfy the type named
    /// `type_name`, in schema definition order.
    ///
    /// Objects are satisfied only by themselves, unions by their object
    /// members and interfaces by every object implementing them (directly or
    /// through another interface). Every other kind of type yields an empty
    /// set.
    pub fn possible_types(&self, type_name: &str) -> &IndexSet<String> {
        self.possible_types.get(type_name).unwrap_or(&EMPTY_POSSIBLE_TYPES)
    }

    /// Returns this schema's Query root operation type name.
    pub fn query_type(&self) -> &str {
        self.query_type.as_str()
    }

    /// Returns this schema's Subscription root operation type name (if one
    /// was defined).
    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    pub fn type_definition(&self, type_name: &str) -> Option<&ast::schema::TypeDefinition> {
        self.types.get(type_name)
    }

    pub fn type_description(&self, type_name: &str) -> Option<&str> {
        let description = match self.types.get(type_name)? {
            ast::schema::TypeDefinition::Enum(def) => &def.description,
            ast::schema::TypeDefinition::InputObject(def) => &def.description,
            ast::schema::TypeDefinition::Interface(def) => &def.description,
            ast::schema::TypeDefinition::Object(def) => &def.description,
            ast::schema::TypeDefinition::Scalar(def) => &def.description,
            ast::schema::TypeDefinition::Union(def) => &def.description,
        };
        description.as_deref()
    }
}
