use crate::document::DocumentLoadError;
use crate::document::ExecutableDocument;
use std::path::Path;
use std::path::PathBuf;

#[test]
fn operations_and_fragments_are_exposed_in_order() {
    let document = ExecutableDocument::from_str(
        "fragment A on T { a }\nquery B { b }\nfragment C on T { c }\nmutation D { d }",
        None,
    ).unwrap();

    let fragment_names: Vec<&str> = document.fragments()
        .map(|frag_def| frag_def.name.as_str())
        .collect();
    assert_eq!(fragment_names, vec!["A", "C"]);
    assert_eq!(document.operations().count(), 2);
}

#[test]
fn definition_source_is_byte_exact() {
    let content = concat!(
        "query Hero {\n",
        "    hero {   name }\n",
        "}\n",
        "\n",
        "  fragment F on Character {\n",
        "\tid\n",
        "  }\n",
    );
    let document = ExecutableDocument::from_str(content, None).unwrap();

    let frag_def = document.fragments().next().unwrap();
    assert_eq!(
        document.definition_source(&frag_def.position),
        Some("fragment F on Character {\n\tid\n  }"),
    );
}

#[test]
fn file_path_is_retained() {
    let document = ExecutableDocument::from_str(
        "query A { a }",
        Some(PathBuf::from("queries/a.graphql")),
    ).unwrap();

    assert_eq!(document.file_path(), Some(Path::new("queries/a.graphql")));
    assert_eq!(document.content(), "query A { a }");
}

#[test]
fn parse_errors_carry_the_file() {
    let result = ExecutableDocument::from_str(
        "query A { a",
        Some(PathBuf::from("broken.graphql")),
    );

    assert!(matches!(
        result,
        Err(DocumentLoadError::ParseError { file: Some(file), .. })
            if file == PathBuf::from("broken.graphql"),
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let result = ExecutableDocument::from_file("/definitely/not/here.graphql");

    assert!(matches!(result, Err(DocumentLoadError::FileReadError(_))));
}
