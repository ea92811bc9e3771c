use crate::ast;
use crate::loc;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod basics {
    use super::*;

    #[test]
    fn build_without_load() {
        let schema = SchemaBuilder::new().build();

        assert!(matches!(
            schema.unwrap_err(),
            SchemaBuildError::NoQueryOperationTypeDefined,
        ));
    }

    #[test]
    fn root_types_by_convention() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, concat!(
                "type Mutation { noop: Boolean }\n",
                "type Query { ping: String }\n",
                "type Subscription { tick: Int }",
            ))?
            .build()?;

        assert_eq!(schema.query_type(), "Query");
        assert_eq!(schema.mutation_type(), Some("Mutation"));
        assert_eq!(schema.subscription_type(), Some("Subscription"));

        Ok(())
    }

    #[test]
    fn root_types_from_schema_definition() -> Result<()> {
        let schema = SchemaBuilder::from_str(None, r#"
            schema { query: RootQuery mutation: RootMutation }
            type RootQuery { ping: String }
            type RootMutation { noop: Boolean }
            type Query { unused: String }
        "#)?.build()?;

        assert_eq!(schema.query_type(), "RootQuery");
        assert_eq!(schema.mutation_type(), Some("RootMutation"));
        assert_eq!(schema.subscription_type(), None);

        Ok(())
    }

    #[test]
    fn root_type_must_be_an_object() {
        let result = SchemaBuilder::from_str(None, r#"
            schema { query: Ping }
            scalar Ping
        "#).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::InvalidRootOperationType { type_name }) if type_name == "Ping",
        ));
    }

    #[test]
    fn builtin_scalars_are_injected() -> Result<()> {
        let schema = SchemaBuilder::from_str(None, "type Query { ping: String }")?
            .build()?;

        for scalar_name in ["Boolean", "Float", "ID", "Int", "String"] {
            assert!(matches!(
                schema.type_definition(scalar_name),
                Some(ast::schema::TypeDefinition::Scalar(_)),
            ));
        }

        Ok(())
    }

    #[test]
    fn multiple_sources_are_combined() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Query { user: User }")?
            .load_str(None, "type User { id: ID! }")?
            .build()?;

        assert!(schema.field_definition("User", "id").is_some());

        Ok(())
    }

    #[test]
    fn parse_errors_report_the_file() {
        let result = SchemaBuilder::from_str(
            Some(PathBuf::from("schema.graphqls")),
            "type Query {",
        );

        assert!(matches!(
            result,
            Err(SchemaBuildError::ParseError { file, .. }) if file == PathBuf::from("schema.graphqls"),
        ));
    }

    #[test]
    fn missing_schema_file_is_an_error() {
        let result = SchemaBuilder::from_files(&["/definitely/not/here.graphqls"]);

        assert!(matches!(result, Err(SchemaBuildError::SchemaFileReadError(_))));
    }
}

mod type_definitions {
    use super::*;

    #[test]
    fn duplicate_type_definitions_are_rejected() {
        let result = SchemaBuilder::new()
            .load_str(None, "type Query { ping: String }\ntype User { id: ID }")
            .and_then(|builder| builder.load_str(None, "type User { name: String }"));

        let Err(SchemaBuildError::DuplicateTypeDefinition { type_name, def1, def2 }) = result else {
            panic!("expected a duplicate type definition error");
        };
        assert_eq!(type_name, "User");
        assert_eq!(def1, loc::SourceLocation::Schema(loc::FilePosition {
            col: 1,
            file: Some(PathBuf::from("str://0")),
            line: 2,
        }));
        assert_eq!(def2, loc::SourceLocation::Schema(loc::FilePosition {
            col: 1,
            file: Some(PathBuf::from("str://1")),
            line: 1,
        }));
    }

    #[test]
    fn extensions_fold_into_their_base_definition() -> Result<()> {
        let schema = SchemaBuilder::from_str(None, r#"
            extend type Query { extra: Int }
            type Query { ping: String }
            interface Named { name: String }
            type Pet { id: ID }
            extend type Pet implements Named { name: String }
            union Anything = Pet
            type Rock { id: ID }
            extend union Anything = Rock
        "#)?.build()?;

        assert!(schema.field_definition("Query", "ping").is_some());
        assert!(schema.field_definition("Query", "extra").is_some());
        assert!(schema.possible_types("Named").contains("Pet"));
        assert_eq!(
            schema.possible_types("Anything").iter().collect::<Vec<_>>(),
            vec!["Pet", "Rock"],
        );

        Ok(())
    }

    #[test]
    fn extension_of_undefined_type_is_rejected() {
        let result = SchemaBuilder::from_str(None, r#"
            type Query { ping: String }
            extend type Missing { id: ID }
        "#).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::ExtensionOfUndefinedType { type_name, .. }) if type_name == "Missing",
        ));
    }

    #[test]
    fn extension_must_match_the_definition_kind() {
        let result = SchemaBuilder::from_str(None, r#"
            type Query { ping: String }
            scalar Date
            extend type Date { id: ID }
        "#).and_then(|builder| builder.build());

        assert!(matches!(
            result,
            Err(SchemaBuildError::InvalidExtensionTypeKind { type_name, .. }) if type_name == "Date",
        ));
    }
}

mod lookups {
    use super::*;

    fn setup_schema() -> crate::schema::Schema {
        SchemaBuilder::from_str(None, r#"
            type Query { node: Node, search: [SearchResult] }

            interface Node { id: ID! }
            interface Entity implements Node { id: ID! }

            "A user of the service"
            type User implements Entity & Node {
                id: ID!
                handle: String @deprecated
                nickname: String @deprecated(reason: "Use `handle`.")
            }

            type Post implements Node { id: ID! }

            type Comment implements Entity { id: ID! }

            union SearchResult = Post | User
        "#)
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn possible_types_of_objects_interfaces_and_unions() {
        let schema = setup_schema();

        assert_eq!(schema.possible_types("User").iter().collect::<Vec<_>>(), vec!["User"]);
        assert_eq!(
            schema.possible_types("Node").iter().collect::<Vec<_>>(),
            vec!["User", "Post", "Comment"],
        );
        assert_eq!(
            schema.possible_types("Entity").iter().collect::<Vec<_>>(),
            vec!["User", "Comment"],
        );
        assert_eq!(
            schema.possible_types("SearchResult").iter().collect::<Vec<_>>(),
            vec!["Post", "User"],
        );
        assert!(schema.possible_types("ID").is_empty());
        assert!(schema.possible_types("Undefined").is_empty());
    }

    #[test]
    fn interface_implemented_only_transitively() {
        // `Comment` names `Entity` alone, and `Entity` implements `Node`.
        let schema = setup_schema();

        assert!(schema.possible_types("Node").contains("Comment"));
    }

    #[test]
    fn typename_resolves_on_every_composite_type() {
        let schema = setup_schema();

        for type_name in ["User", "Node", "SearchResult"] {
            let typename = schema.field_definition(type_name, "__typename").unwrap();
            assert_eq!(typename.field_type.to_string(), "String!");
        }
        assert!(schema.field_definition("ID", "__typename").is_none());
        assert!(schema.field_definition("SearchResult", "id").is_none());
    }

    #[test]
    fn deprecation_reasons() {
        let schema = setup_schema();

        let id = schema.field_definition("User", "id").unwrap();
        assert_eq!(schema.deprecation_reason(id), None);

        let handle = schema.field_definition("User", "handle").unwrap();
        assert_eq!(schema.deprecation_reason(handle), Some("No longer supported".to_string()));

        let nickname = schema.field_definition("User", "nickname").unwrap();
        assert_eq!(schema.deprecation_reason(nickname), Some("Use `handle`.".to_string()));
    }

    #[test]
    fn type_descriptions() {
        let schema = setup_schema();

        assert_eq!(schema.type_description("User"), Some("A user of the service"));
        assert_eq!(schema.type_description("Post"), None);
    }
}
