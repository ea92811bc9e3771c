use crate::ast;
use crate::file_reader;
use crate::loc;
use crate::schema::Schema;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Utility for building a [`Schema`] from one or more SDL documents.
#[derive(Debug)]
pub struct SchemaBuilder {
    mutation_type: Option<String>,
    query_type: Option<String>,
    str_load_counter: u16,
    subscription_type: Option<String>,
    type_extensions: Vec<(Option<PathBuf>, ast::schema::TypeExtension)>,
    types: IndexMap<String, (loc::SourceLocation, ast::schema::TypeDefinition)>,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        for (file_path, ext) in std::mem::take(&mut self.type_extensions) {
            self.apply_type_extension(file_path.as_deref(), ext)?;
        }
        self.inject_missing_builtin_scalars();

        let types: IndexMap<String, ast::schema::TypeDefinition> =
            self.types.into_iter()
                .map(|(name, (_, type_def))| (name, type_def))
                .collect();

        let query_type = match self.query_type {
            Some(query_type) => query_type,
            None => match types.get("Query") {
                Some(ast::schema::TypeDefinition::Object(_)) => "Query".to_string(),
                _ => return Err(SchemaBuildError::NoQueryOperationTypeDefined),
            },
        };
        for root_type_name in [Some(&query_type), self.mutation_type.as_ref(), self.subscription_type.as_ref()]
            .into_iter()
            .flatten() {
            if !matches!(types.get(root_type_name), Some(ast::schema::TypeDefinition::Object(_))) {
                return Err(SchemaBuildError::InvalidRootOperationType {
                    type_name: root_type_name.to_owned(),
                });
            }
        }

        let mutation_type = self.mutation_type.or_else(|| {
            matches!(types.get("Mutation"), Some(ast::schema::TypeDefinition::Object(_)))
                .then(|| "Mutation".to_string())
        });
        let subscription_type = self.subscription_type.or_else(|| {
            matches!(types.get("Subscription"), Some(ast::schema::TypeDefinition::Object(_)))
                .then(|| "Subscription".to_string())
        });

        let possible_types = compute_possible_types(&types);
        log::debug!(
            "Built schema with {} types (query root: `{query_type}`).",
            types.len(),
        );

        Ok(Schema {
            mutation_type,
            possible_types,
            query_type,
            subscription_type,
            typename_field: typename_field_definition(),
            types,
        })
    }

    /// Produce a [`SchemaBuilder`] loaded with a single SDL string.
    pub fn from_str(
        file_path: Option<PathBuf>,
        content: impl AsRef<str>,
    ) -> Result<Self> {
        Self::new().load_str(file_path, content.as_ref())
    }

    /// Produce a [`SchemaBuilder`] loaded with the SDL from every file in
    /// `file_paths`.
    pub fn from_files(file_paths: &[impl AsRef<Path>]) -> Result<Self> {
        Self::new().load_files(file_paths)
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(&[file_path])
    }

    pub fn load_files(mut self, file_paths: &[impl AsRef<Path>]) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError(
                    Box::new(err),
                ))?;
            self = self.load_str(
                Some(file_path.to_path_buf()),
                file_content.as_str(),
            )?;
        }
        Ok(self)
    }

    pub fn load_str(
        mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::schema::parse(content)
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        for def in ast_doc.definitions {
            self.visit_definition(&file_path, def)?;
        }

        Ok(self)
    }

    pub fn new() -> Self {
        Self {
            mutation_type: None,
            query_type: None,
            str_load_counter: 0,
            subscription_type: None,
            type_extensions: vec![],
            types: IndexMap::new(),
        }
    }

    fn apply_type_extension(
        &mut self,
        file_path: Option<&Path>,
        ext: ast::schema::TypeExtension,
    ) -> Result<()> {
        use ast::schema::TypeDefinition;
        use ast::schema::TypeExtension;

        let (ext_name, ext_pos) = match &ext {
            TypeExtension::Enum(ext) => (&ext.name, ext.position),
            TypeExtension::InputObject(ext) => (&ext.name, ext.position),
            TypeExtension::Interface(ext) => (&ext.name, ext.position),
            TypeExtension::Object(ext) => (&ext.name, ext.position),
            TypeExtension::Scalar(ext) => (&ext.name, ext.position),
            TypeExtension::Union(ext) => (&ext.name, ext.position),
        };
        let ext_location = loc::SourceLocation::from_schema_ast_position(
            file_path,
            &ext_pos,
        );

        let Some((_, type_def)) = self.types.get_mut(ext_name) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                type_name: ext_name.to_owned(),
                location: ext_location,
            });
        };

        match (type_def, ext) {
            (TypeDefinition::Enum(def), TypeExtension::Enum(ext)) => {
                def.directives.extend(ext.directives);
                def.values.extend(ext.values);
            },

            (TypeDefinition::InputObject(def), TypeExtension::InputObject(ext)) => {
                def.directives.extend(ext.directives);
                def.fields.extend(ext.fields);
            },

            (TypeDefinition::Interface(def), TypeExtension::Interface(ext)) => {
                def.directives.extend(ext.directives);
                def.fields.extend(ext.fields);
                def.implements_interfaces.extend(ext.implements_interfaces);
            },

            (TypeDefinition::Object(def), TypeExtension::Object(ext)) => {
                def.directives.extend(ext.directives);
                def.fields.extend(ext.fields);
                def.implements_interfaces.extend(ext.implements_interfaces);
            },

            (TypeDefinition::Scalar(def), TypeExtension::Scalar(ext)) => {
                def.directives.extend(ext.directives);
            },

            (TypeDefinition::Union(def), TypeExtension::Union(ext)) => {
                def.directives.extend(ext.directives);
                def.types.extend(ext.types);
            },

            (_, ext) => {
                let type_name = match ext {
                    TypeExtension::Enum(ext) => ext.name,
                    TypeExtension::InputObject(ext) => ext.name,
                    TypeExtension::Interface(ext) => ext.name,
                    TypeExtension::Object(ext) => ext.name,
                    TypeExtension::Scalar(ext) => ext.name,
                    TypeExtension::Union(ext) => ext.name,
                };
                return Err(SchemaBuildError::InvalidExtensionTypeKind {
                    type_name,
                    location: ext_location,
                });
            },
        }

        Ok(())
    }

    fn inject_missing_builtin_scalars(&mut self) {
        for scalar_name in BUILTIN_SCALAR_NAMES {
            if self.types.contains_key(scalar_name) {
                continue;
            }
            self.types.insert(scalar_name.to_string(), (
                loc::SourceLocation::GraphQLBuiltIn,
                ast::schema::TypeDefinition::Scalar(ast::schema::ScalarType {
                    position: builtin_pos(),
                    description: None,
                    name: scalar_name.to_string(),
                    directives: vec![],
                }),
            ));
        }
    }

    fn visit_definition(
        &mut self,
        file_path: &Path,
        def: ast::schema::Definition,
    ) -> Result<()> {
        match def {
            ast::schema::Definition::DirectiveDefinition(_) => Ok(()),

            ast::schema::Definition::SchemaDefinition(schema_def) => {
                self.visit_schema_definition(schema_def);
                Ok(())
            },

            ast::schema::Definition::TypeDefinition(type_def) =>
                self.visit_type_definition(file_path, type_def),

            ast::schema::Definition::TypeExtension(ext) => {
                self.type_extensions.push((Some(file_path.to_path_buf()), ext));
                Ok(())
            },
        }
    }

    fn visit_schema_definition(&mut self, schema_def: ast::schema::SchemaDefinition) {
        if let Some(query_type) = schema_def.query {
            self.query_type = Some(query_type);
        }
        if let Some(mutation_type) = schema_def.mutation {
            self.mutation_type = Some(mutation_type);
        }
        if let Some(subscription_type) = schema_def.subscription {
            self.subscription_type = Some(subscription_type);
        }
    }

    fn visit_type_definition(
        &mut self,
        file_path: &Path,
        type_def: ast::schema::TypeDefinition,
    ) -> Result<()> {
        use ast::schema::TypeDefinition;
        let (name, pos) = match &type_def {
            TypeDefinition::Enum(def) => (&def.name, def.position),
            TypeDefinition::InputObject(def) => (&def.name, def.position),
            TypeDefinition::Interface(def) => (&def.name, def.position),
            TypeDefinition::Object(def) => (&def.name, def.position),
            TypeDefinition::Scalar(def) => (&def.name, def.position),
            TypeDefinition::Union(def) => (&def.name, def.position),
        };
        let name = name.to_owned();
        let location = loc::SourceLocation::from_schema_ast_position(
            Some(file_path),
            &pos,
        );

        if let Some((existing_location, _)) = self.types.get(&name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: name,
                def1: existing_location.to_owned(),
                def2: location,
            });
        }

        self.types.insert(name, (location, type_def));
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_pos() -> ast::AstPos {
    ast::AstPos { line: 0, column: 0 }
}

/// Maps every type name to the object types that satisfy it.
fn compute_possible_types(
    types: &IndexMap<String, ast::schema::TypeDefinition>,
) -> HashMap<String, IndexSet<String>> {
    let mut possible_types: HashMap<String, IndexSet<String>> = HashMap::new();

    for (type_name, type_def) in types {
        match type_def {
            ast::schema::TypeDefinition::Object(obj) => {
                possible_types.entry(type_name.to_owned())
                    .or_default()
                    .insert(type_name.to_owned());

                let mut seen_ifaces = IndexSet::new();
                let mut pending: Vec<&String> = obj.implements_interfaces.iter().collect();
                while let Some(iface_name) = pending.pop() {
                    if !seen_ifaces.insert(iface_name) {
                        continue;
                    }
                    if let Some(ast::schema::TypeDefinition::Interface(iface)) = types.get(iface_name) {
                        pending.extend(iface.implements_interfaces.iter());
                    }
                }
                for iface_name in seen_ifaces {
                    possible_types.entry(iface_name.to_owned())
                        .or_default()
                        .insert(type_name.to_owned());
                }
            },

            ast::schema::TypeDefinition::Union(union_def) => {
                let members = possible_types.entry(type_name.to_owned()).or_default();
                for member in &union_def.types {
                    if let Some(ast::schema::TypeDefinition::Object(_)) = types.get(member) {
                        members.insert(member.to_owned());
                    }
                }
            },

            _ => (),
        }
    }

    possible_types
}

fn typename_field_definition() -> ast::schema::Field {
    ast::schema::Field {
        position: builtin_pos(),
        description: Some("The name of the current Object type at runtime.".to_string()),
        name: "__typename".to_string(),
        arguments: vec![],
        field_type: ast::schema::Type::NonNullType(Box::new(
            ast::schema::Type::NamedType("String".to_string()),
        )),
        directives: vec![],
    }
}

#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("Multiple types were defined with the name `{type_name}`")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SourceLocation,
        def2: loc::SourceLocation,
    },

    #[error("Type extension targets `{type_name}`, which is not defined")]
    ExtensionOfUndefinedType {
        type_name: String,
        location: loc::SourceLocation,
    },

    #[error("Type extension for `{type_name}` does not match the kind of its definition")]
    InvalidExtensionTypeKind {
        type_name: String,
        location: loc::SourceLocation,
    },

    #[error("Root operation type `{type_name}` is not an object type defined in the schema")]
    InvalidRootOperationType {
        type_name: String,
    },

    #[error("No Query operation type was defined in the schema")]
    NoQueryOperationTypeDefined,

    #[error("Error parsing schema document {file:?}: {err}")]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error("Failure while trying to read a schema file from disk: {0}")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),
}
