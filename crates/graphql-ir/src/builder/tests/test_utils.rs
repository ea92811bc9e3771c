use crate::builder::DocumentIr;
use crate::builder::IrBuildError;
use crate::builder::IrBuilder;
use crate::builder::IrBuilderOptions;
use crate::document::ExecutableDocument;
use crate::document::FragmentRegistry;
use crate::document::FragmentRegistryBuilder;
use crate::ir::Field;
use crate::ir::Fragment;
use crate::ir::FragmentImplementation;
use crate::ir::FragmentInterface;
use crate::ir::Operation;
use crate::ir::SelectionKey;
use crate::ir::SelectionKeyType;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;

pub(super) const STARWARS_SCHEMA: &str = r#"
    type Query {
        droid(id: ID!): Droid
        hero(episode: Episode): Character
        node(id: ID!): Node
        search(text: String!, first: Int): [SearchResult]
    }

    type Mutation {
        createReview(episode: Episode, review: ReviewInput!): Review
    }

    enum Episode { NEWHOPE EMPIRE JEDI }

    enum LengthUnit { METER FOOT }

    input ReviewInput {
        stars: Int!
        commentary: String
        tags: [String!] = []
    }

    type Review {
        commentary: String
        stars: Int!
    }

    interface Node {
        id: ID!
    }

    "A character from the Star Wars universe"
    interface Character implements Node {
        appearsIn: [Episode]!
        friends: [Character]
        id: ID!
        name: String!
    }

    "A humanoid creature"
    type Human implements Character & Node {
        appearsIn: [Episode]!
        friends: [Character]
        height(unit: LengthUnit = METER): Float
        homePlanet: String
        id: ID!
        name: String!
    }

    "A mechanical creature"
    type Droid implements Character & Node {
        appearsIn: [Episode]!
        friends: [Character]
        id: ID!
        legacyId: String @deprecated
        name: String!
        oldName: String @deprecated(reason: "Use `name`.")
        primaryFunction: String
    }

    type Starship implements Node {
        id: ID!
        "The name of the starship"
        name: String!
    }

    union SearchResult = Human | Droid | Starship
"#;

pub(super) fn setup_schema() -> Schema {
    SchemaBuilder::from_str(None, STARWARS_SCHEMA)
        .unwrap()
        .build()
        .unwrap()
}

pub(super) fn setup_registry(document: &ExecutableDocument) -> FragmentRegistry {
    FragmentRegistryBuilder::from_documents(&[document]).unwrap()
}

pub(super) fn try_build_ir(
    schema: &Schema,
    document_str: &str,
    options: IrBuilderOptions,
) -> Result<DocumentIr, IrBuildError> {
    let document = ExecutableDocument::from_str(document_str, None).unwrap();
    let registry = setup_registry(&document);
    IrBuilder::new(schema, &registry, options).build_document(&document)
}

pub(super) fn build_ir(schema: &Schema, document_str: &str) -> DocumentIr {
    try_build_ir(schema, document_str, IrBuilderOptions::default()).unwrap()
}

/// Builds a document expected to contain exactly one operation.
pub(super) fn build_operation(schema: &Schema, document_str: &str) -> Operation {
    let mut document_ir = build_ir(schema, document_str);
    assert_eq!(document_ir.operations.len(), 1);
    document_ir.operations.remove(0)
}

pub(super) fn field<'a>(fields: &'a [Field], response_name: &str) -> &'a Field {
    fields.iter()
        .find(|field| field.response_name() == response_name)
        .unwrap_or_else(|| panic!("no field with response name `{response_name}`"))
}

pub(super) fn interface<'a>(fragments: &'a [Fragment], type_condition: &str) -> &'a FragmentInterface {
    fragments.iter()
        .filter_map(Fragment::as_interface)
        .find(|interface| interface.type_condition() == type_condition)
        .unwrap_or_else(|| panic!("no interface on `{type_condition}`"))
}

pub(super) fn implementation<'a>(fragments: &'a [Fragment], name: &str) -> &'a FragmentImplementation {
    fragments.iter()
        .filter_map(Fragment::as_implementation)
        .find(|implementation| implementation.name() == name)
        .unwrap_or_else(|| panic!("no implementation named `{name}`"))
}

pub(super) fn implementations(fragments: &[Fragment]) -> Vec<&FragmentImplementation> {
    fragments.iter().filter_map(Fragment::as_implementation).collect()
}

pub(super) fn query_key(path: &str) -> SelectionKey {
    key_from_path(path, SelectionKeyType::Query)
}

pub(super) fn fragment_key(path: &str) -> SelectionKey {
    key_from_path(path, SelectionKeyType::Fragment)
}

fn key_from_path(path: &str, key_type: SelectionKeyType) -> SelectionKey {
    let mut segments = path.split('.');
    let mut key = SelectionKey::new(segments.next().unwrap(), key_type);
    for segment in segments {
        key = key.with_segment(segment);
    }
    key
}

/// Calls `visit` on every field in the tree rooted at `field` (including
/// `field` itself and the fields of every fragment).
pub(super) fn visit_fields(field: &Field, visit: &mut impl FnMut(&Field)) {
    visit(field);
    for child in field.fields() {
        visit_fields(child, visit);
    }
    for fragment in field.fragments() {
        for child in fragment.fields() {
            visit_fields(child, visit);
        }
    }
}
