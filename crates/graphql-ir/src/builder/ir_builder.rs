use crate::ast;
use crate::builder::build_pass::BuildPass;
use crate::builder::build_pass::SelectionSite;
use crate::builder::naming;
use crate::builder::selection_key_patcher;
use crate::builder::IrBuildError;
use crate::document::ExecutableDocument;
use crate::document::FragmentRegistry;
use crate::document::RegisteredFragment;
use crate::ir::Field;
use crate::ir::NamedFragment;
use crate::ir::Operation;
use crate::ir::OperationKind;
use crate::ir::SelectionKey;
use crate::ir::SelectionKeyType;
use crate::ir::SelectionSet;
use crate::ir::Variable;
use crate::loc;
use crate::schema::Schema;
use crate::types::NamedTypeAnnotation;
use crate::types::TypeAnnotation;
use crate::types::Value;
use indexmap::IndexMap;
use indexmap::IndexSet;
use rayon::prelude::*;
use std::path::Path;

type Result<T> = std::result::Result<T, IrBuildError>;

const DATA_FIELD_NAME: &str = "data";

/// Knobs for [`IrBuilder`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IrBuilderOptions {
    /// Overrides the package hint otherwise derived from each document's
    /// directory.
    pub package_name: Option<String>,

    /// Suffix operation names with `Query`/`Mutation`/`Subscription`.
    pub use_semantic_naming: bool,
}
impl Default for IrBuilderOptions {
    fn default() -> Self {
        Self {
            package_name: None,
            use_semantic_naming: true,
        }
    }
}

/// The IR of every definition in a set of documents, each list in document
/// order.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DocumentIr {
    pub fragments: Vec<NamedFragment>,
    pub operations: Vec<Operation>,
}

enum BuiltDefinition {
    Fragment(NamedFragment),
    Operation(Operation),
}

/// Turns operations and fragment definitions into IR.
///
/// The schema and fragment registry are only ever read, so one builder can
/// be shared across threads (see [`IrBuilder::build_all`]).
#[derive(Clone, Debug)]
pub struct IrBuilder<'schema, 'fragreg> {
    fragment_registry: &'fragreg FragmentRegistry,
    options: IrBuilderOptions,
    schema: &'schema Schema,
}
impl<'schema, 'fragreg> IrBuilder<'schema, 'fragreg> {
    pub fn new(
        schema: &'schema Schema,
        fragment_registry: &'fragreg FragmentRegistry,
        options: IrBuilderOptions,
    ) -> Self {
        Self {
            fragment_registry,
            options,
            schema,
        }
    }

    /// Build every definition of every document on the `rayon` thread pool.
    ///
    /// Results keep document order. If any definition fails, the whole
    /// batch fails.
    pub fn build_all(&self, documents: &[ExecutableDocument]) -> Result<DocumentIr> {
        let definitions: Vec<(&ExecutableDocument, &ast::operation::Definition)> =
            documents.iter()
                .flat_map(|document| {
                    document.ast().definitions.iter()
                        .map(move |definition| (document, definition))
                })
                .collect();

        log::debug!(
            "Building {} definition(s) from {} document(s)",
            definitions.len(),
            documents.len(),
        );

        let built = definitions.par_iter()
            .map(|(document, definition)| self.build_definition(document, definition))
            .collect::<Result<Vec<_>>>()?;

        Ok(collect_built_definitions(built))
    }

    /// Build every definition of one document, in order.
    pub fn build_document(&self, document: &ExecutableDocument) -> Result<DocumentIr> {
        let built = document.ast().definitions.iter()
            .map(|definition| self.build_definition(document, definition))
            .collect::<Result<Vec<_>>>()?;

        Ok(collect_built_definitions(built))
    }

    /// Build the IR of a fragment definition.
    ///
    /// The selection set is built twice: once as the interface-only view and
    /// once with implementations, the latter patched so that every key
    /// rooted at the fragment is also rooted at its default implementation.
    pub fn build_named_fragment(&self, fragment: &RegisteredFragment) -> Result<NamedFragment> {
        let def_location = fragment.def_location();
        let type_condition = fragment.type_condition();
        if self.schema.type_definition(type_condition).is_none() {
            return Err(IrBuildError::UndefinedType {
                location: def_location,
                type_name: type_condition.to_string(),
            });
        }

        log::debug!("Building fragment `{}` on `{type_condition}`", fragment.name());

        let name = naming::capitalize(fragment.name());
        let default_implementation_name = format!("{name}Impl");
        let selection_keys = IndexSet::from([
            SelectionKey::new(name.as_str(), SelectionKeyType::Fragment),
        ]);
        let selections: Vec<&ast::operation::Selection> =
            fragment.definition().selection_set.items.iter().collect();
        let site = SelectionSite {
            file_path: fragment.file_path(),
            implementation_suffix: name.as_str(),
            parent_type: type_condition,
            selection_keys: &selection_keys,
        };

        let selection_set = self.build_selection_set(false, &selections, &site)?;
        let default_selection_set = selection_key_patcher::patch_selection_set(
            &self.build_selection_set(true, &selections, &site)?,
            name.as_str(),
            default_implementation_name.as_str(),
        );

        Ok(NamedFragment {
            def_location,
            default_implementation_name,
            default_selection_set,
            description: self.schema.type_description(type_condition).map(str::to_string),
            name,
            selection_set,
            source_text: fragment.source_text().to_string(),
        })
    }

    /// Build the IR of one operation defined in `document`.
    pub fn build_operation(
        &self,
        document: &ExecutableDocument,
        op_def: &ast::operation::OperationDefinition,
    ) -> Result<Operation> {
        let details = OperationAstDetails::from_ast(op_def);
        let file_path = document.file_path();
        let def_location = loc::SourceLocation::from_execdoc_ast_position(
            file_path,
            details.position,
        );

        let Some(operation_name) = details.name else {
            return Err(IrBuildError::AnonymousOperation {
                location: def_location,
            });
        };
        log::debug!("Building {} `{operation_name}`", details.operation_kind);

        let root_type = match details.operation_kind {
            OperationKind::Mutation => self.schema.mutation_type(),
            OperationKind::Query => Some(self.schema.query_type()),
            OperationKind::Subscription => self.schema.subscription_type(),
        }.ok_or_else(|| IrBuildError::MissingRootOperationType {
            location: def_location.to_owned(),
            operation_kind: details.operation_kind,
        })?;

        let name = naming::normalize_operation_name(
            operation_name,
            details.operation_kind,
            self.options.use_semantic_naming,
        );

        let data_model_name = naming::capitalize(DATA_FIELD_NAME);
        let data_keys = IndexSet::from([
            SelectionKey::new(name.as_str(), SelectionKeyType::Query)
                .with_segment(data_model_name.as_str()),
        ]);
        let selections: Vec<&ast::operation::Selection> =
            details.selection_set.items.iter().collect();
        let (fields, fragments) = self.build_pass(true).build_selections(
            &selections,
            &SelectionSite {
                file_path,
                implementation_suffix: data_model_name.as_str(),
                parent_type: root_type,
                selection_keys: &data_keys,
            },
        )?;

        let data_field = Field {
            alias: None,
            arguments: vec![],
            conditions: vec![],
            def_location: def_location.to_owned(),
            deprecation_reason: None,
            description: None,
            fields,
            fragments,
            name: DATA_FIELD_NAME.to_string(),
            selection_keys: data_keys,
            type_annotation: TypeAnnotation::Named(NamedTypeAnnotation {
                nullable: false,
                type_name: root_type.to_string(),
            }),
        };

        let variables = details.variable_definitions.iter()
            .map(|var_def| Variable {
                default_value: var_def.default_value.as_ref().map(Value::from_ast),
                name: var_def.name.to_owned(),
                type_annotation: TypeAnnotation::from_ast_type(&var_def.var_type),
            })
            .collect();

        let source_text = self.operation_source_text(
            document,
            &details,
            operation_name,
            &def_location,
        )?;

        Ok(Operation {
            data_field,
            def_location,
            name,
            operation_kind: details.operation_kind,
            operation_name: operation_name.to_owned(),
            root_type: root_type.to_string(),
            source_text,
            target_package_hint: self.options.package_name.to_owned()
                .unwrap_or_else(|| naming::package_hint_from_path(file_path)),
            variables,
        })
    }

    pub fn options(&self) -> &IrBuilderOptions {
        &self.options
    }

    fn build_definition(
        &self,
        document: &ExecutableDocument,
        definition: &ast::operation::Definition,
    ) -> Result<BuiltDefinition> {
        match definition {
            ast::operation::Definition::Operation(op_def) =>
                self.build_operation(document, op_def).map(BuiltDefinition::Operation),

            ast::operation::Definition::Fragment(frag_def) => {
                let fragment = self.fragment_registry.get(&frag_def.name)
                    .ok_or_else(|| IrBuildError::UndefinedFragment {
                        fragment_name: frag_def.name.to_owned(),
                        location: loc::SourceLocation::from_execdoc_ast_position(
                            document.file_path(),
                            &frag_def.position,
                        ),
                    })?;
                self.build_named_fragment(fragment).map(BuiltDefinition::Fragment)
            },
        }
    }

    fn build_pass(&self, with_implementations: bool) -> BuildPass<'_> {
        BuildPass {
            fragment_registry: self.fragment_registry,
            schema: self.schema,
            with_implementations,
        }
    }

    fn build_selection_set(
        &self,
        with_implementations: bool,
        selections: &[&ast::operation::Selection],
        site: &SelectionSite<'_>,
    ) -> Result<SelectionSet> {
        let (fields, fragments) = self.build_pass(with_implementations)
            .build_selections(selections, site)?;

        Ok(SelectionSet {
            fields,
            fragments,
            possible_types: self.schema.possible_types(site.parent_type).to_owned(),
            selection_keys: site.selection_keys.to_owned(),
            type_condition: site.parent_type.to_string(),
        })
    }

    /// Every fragment transitively spread from `selection_set`, each once,
    /// in depth-first order of first use.
    fn collect_used_fragments(
        &self,
        selection_set: &ast::operation::SelectionSet,
        file_path: Option<&Path>,
        used: &mut IndexMap<String, &'fragreg RegisteredFragment>,
    ) -> Result<()> {
        for selection in &selection_set.items {
            match selection {
                ast::operation::Selection::Field(field) =>
                    self.collect_used_fragments(&field.selection_set, file_path, used)?,

                ast::operation::Selection::InlineFragment(inline_fragment) =>
                    self.collect_used_fragments(&inline_fragment.selection_set, file_path, used)?,

                ast::operation::Selection::FragmentSpread(spread) => {
                    if used.contains_key(&spread.fragment_name) {
                        continue;
                    }
                    let fragment = self.fragment_registry.get(&spread.fragment_name)
                        .ok_or_else(|| IrBuildError::UndefinedFragment {
                            fragment_name: spread.fragment_name.to_owned(),
                            location: loc::SourceLocation::from_execdoc_ast_position(
                                file_path,
                                &spread.position,
                            ),
                        })?;
                    used.insert(spread.fragment_name.to_owned(), fragment);
                    self.collect_used_fragments(
                        &fragment.definition().selection_set,
                        fragment.file_path(),
                        used,
                    )?;
                },
            }
        }
        Ok(())
    }

    fn operation_source_text(
        &self,
        document: &ExecutableDocument,
        details: &OperationAstDetails<'_>,
        operation_name: &str,
        def_location: &loc::SourceLocation,
    ) -> Result<String> {
        let mut source_text = document.definition_source(details.position)
            .ok_or_else(|| IrBuildError::SourceTextUnavailable {
                definition_name: operation_name.to_string(),
                location: def_location.to_owned(),
            })?
            .to_string();

        let mut used_fragments = IndexMap::new();
        self.collect_used_fragments(
            details.selection_set,
            document.file_path(),
            &mut used_fragments,
        )?;
        for fragment in used_fragments.values() {
            source_text.push('\n');
            source_text.push_str(fragment.source_text());
        }

        Ok(source_text.trim_end_matches('\n').to_string())
    }
}

fn collect_built_definitions(built: Vec<BuiltDefinition>) -> DocumentIr {
    let mut document_ir = DocumentIr::default();
    for built_definition in built {
        match built_definition {
            BuiltDefinition::Fragment(fragment) => document_ir.fragments.push(fragment),
            BuiltDefinition::Operation(operation) => document_ir.operations.push(operation),
        }
    }
    document_ir
}

struct OperationAstDetails<'a> {
    name: Option<&'a str>,
    operation_kind: OperationKind,
    position: &'a ast::AstPos,
    selection_set: &'a ast::operation::SelectionSet,
    variable_definitions: &'a [ast::operation::VariableDefinition],
}
impl<'a> OperationAstDetails<'a> {
    fn from_ast(op_def: &'a ast::operation::OperationDefinition) -> Self {
        match op_def {
            ast::operation::OperationDefinition::Mutation(mutation) => Self {
                name: mutation.name.as_deref(),
                operation_kind: OperationKind::Mutation,
                position: &mutation.position,
                selection_set: &mutation.selection_set,
                variable_definitions: &mutation.variable_definitions,
            },

            ast::operation::OperationDefinition::Query(query) => Self {
                name: query.name.as_deref(),
                operation_kind: OperationKind::Query,
                position: &query.position,
                selection_set: &query.selection_set,
                variable_definitions: &query.variable_definitions,
            },

            ast::operation::OperationDefinition::SelectionSet(selection_set) => Self {
                name: None,
                operation_kind: OperationKind::Query,
                position: &selection_set.span.0,
                selection_set,
                variable_definitions: &[],
            },

            ast::operation::OperationDefinition::Subscription(subscription) => Self {
                name: subscription.name.as_deref(),
                operation_kind: OperationKind::Subscription,
                position: &subscription.position,
                selection_set: &subscription.selection_set,
                variable_definitions: &subscription.variable_definitions,
            },
        }
    }
}
