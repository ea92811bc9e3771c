use crate::builder::build_pass::BuildPass;
use crate::builder::tests::test_utils::build_operation;
use crate::builder::tests::test_utils::field;
use crate::builder::tests::test_utils::implementation;
use crate::builder::tests::test_utils::interface;
use crate::builder::tests::test_utils::query_key;
use crate::builder::tests::test_utils::setup_schema;
use crate::builder::tests::test_utils::visit_fields;
use crate::document::FragmentRegistry;
use crate::ir::Condition;
use crate::ir::Field;
use crate::types::Value;
use std::collections::HashSet;

#[test]
fn sibling_selections_merge_by_response_name() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Heroes {
            hero { name friends { id } }
            hero { id friends { name } }
        }
    "#);

    let data_fields = operation.data_field().fields();
    assert_eq!(data_fields.len(), 1);

    let hero = field(data_fields, "hero");
    let child_names: Vec<&str> = hero.fields().iter()
        .map(|field| field.response_name())
        .collect();
    assert_eq!(child_names, vec!["name", "friends", "id"]);

    let friends = field(hero.fields(), "friends");
    let friend_names: Vec<&str> = friends.fields().iter()
        .map(|field| field.response_name())
        .collect();
    assert_eq!(friend_names, vec!["id", "name"]);
}

#[test]
fn aliases_produce_distinct_fields() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Heroes {
            empireHero: hero(episode: EMPIRE) { name }
            jediHero: hero(episode: JEDI) { name }
        }
    "#);

    let data_fields = operation.data_field().fields();
    assert_eq!(data_fields.len(), 2);

    let empire_hero = field(data_fields, "empireHero");
    assert_eq!(empire_hero.name(), "hero");
    assert_eq!(empire_hero.alias(), Some("empireHero"));
    assert_eq!(empire_hero.arguments()[0].value(), &Value::Enum("EMPIRE".to_string()));
    assert!(empire_hero.selection_keys().contains(
        &query_key("HeroesQuery.Data.EmpireHero"),
    ));

    let jedi_hero = field(data_fields, "jediHero");
    assert_eq!(jedi_hero.arguments()[0].value(), &Value::Enum("JEDI".to_string()));
}

#[test]
fn response_names_are_unique_at_every_depth() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Heroes {
            hero {
                name
                ... on Droid { name primaryFunction friends { name } }
                friends { id name }
                ... on Human { friends { id homePlanet: name } }
                name
            }
            hero { friends { name } }
        }
    "#);

    visit_fields(operation.data_field(), &mut |field| {
        let mut seen = HashSet::new();
        for child in field.fields() {
            assert!(
                seen.insert(child.response_name()),
                "`{}` selects `{}` twice",
                field.response_name(),
                child.response_name(),
            );
        }
    });
}

#[test]
fn merging_a_merged_field_again_is_a_noop() {
    let schema = setup_schema();
    let registry = FragmentRegistry::empty();
    let operation = build_operation(&schema, r#"
        query Heroes($withFriends: Boolean!) {
            hero {
                name
                friends @include(if: $withFriends) { id }
                ... on Droid { primaryFunction friends { name } }
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    let pass = BuildPass {
        fragment_registry: &registry,
        schema: &schema,
        with_implementations: true,
    };
    assert_eq!(pass.merge_fields(vec![hero.clone()]), vec![hero.clone()]);
    assert_eq!(pass.merge_fields(vec![hero.clone(), hero.clone()]), vec![hero.clone()]);
}

#[test]
fn metadata_comes_from_the_schema_definition() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Droid {
            droid(id: "2001") { __typename legacyId oldName primaryFunction }
        }
    "#);
    let droid = field(operation.data_field().fields(), "droid");

    let typename = field(droid.fields(), "__typename");
    assert_eq!(typename.type_annotation().to_graphql_string(), "String!");
    assert_eq!(
        typename.description(),
        Some("The name of the current Object type at runtime."),
    );

    let legacy_id = field(droid.fields(), "legacyId");
    assert!(legacy_id.is_deprecated());
    assert_eq!(legacy_id.deprecation_reason(), Some("No longer supported"));

    let old_name = field(droid.fields(), "oldName");
    assert_eq!(old_name.deprecation_reason(), Some("Use `name`."));

    let primary_function = field(droid.fields(), "primaryFunction");
    assert!(!primary_function.is_deprecated());
}

/// A field selected both unconditionally and under `@skip(if: $cond)` keeps
/// the `$cond` condition: conditions of merged copies are concatenated
/// rather than OR-ed.
#[test]
fn merged_field_keeps_conditions_of_every_copy() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero($cond: Boolean!) {
            hero {
                name @skip(if: $cond)
                name
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    assert_eq!(hero.fields().len(), 1);
    assert_eq!(field(hero.fields(), "name").conditions(), &[Condition::Boolean {
        variable_name: "cond".to_string(),
        inverted: true,
    }]);
}

#[test]
fn conditions_of_merged_copies_are_deduplicated() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero($a: Boolean!, $b: Boolean!) {
            hero {
                name @include(if: $a)
                name @include(if: $a) @skip(if: $b)
            }
        }
    "#);
    let name = field(field(operation.data_field().fields(), "hero").fields(), "name");

    assert_eq!(name.conditions(), &[
        Condition::Boolean { variable_name: "a".to_string(), inverted: false },
        Condition::Boolean { variable_name: "b".to_string(), inverted: true },
    ]);
}

fn response_names(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(|field| field.response_name()).collect()
}

#[test]
fn interfaces_of_merged_copies_cover_every_merged_field() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Q {
            hero { name ... on Droid { primaryFunction } }
            ... on Query { hero { id } }
        }
    "#);

    let query_interface = interface(operation.data_field().fragments(), "Query");
    let hero = field(query_interface.fields(), "hero");
    assert_eq!(response_names(hero.fields()), vec!["name", "id"]);

    let droid = interface(hero.fragments(), "Droid");
    assert_eq!(response_names(droid.fields()), vec!["name", "id", "primaryFunction"]);
    assert!(field(droid.fields(), "id").selection_keys().contains(
        &query_key("QQuery.Data.Query.Hero.Droid.Id"),
    ));

    let droid_hero = implementation(hero.fragments(), "DroidHero");
    assert_eq!(response_names(droid_hero.fields()), vec!["name", "id", "primaryFunction"]);
}

#[test]
fn every_interface_covers_the_fields_of_its_site() {
    fn assert_covered(field: &Field) {
        for fragment in field.fragments() {
            let Some(interface) = fragment.as_interface() else {
                continue;
            };
            let interface_names = response_names(interface.fields());
            for site_field in field.fields() {
                assert!(
                    interface_names.contains(&site_field.response_name()),
                    "interface `{}` under `{}` lacks `{}`",
                    interface.type_condition(),
                    field.response_name(),
                    site_field.response_name(),
                );
            }
        }
    }

    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Heroes {
            hero {
                name
                ... on Human { homePlanet friends { name ... on Droid { primaryFunction } } }
            }
            ... on Query {
                hero {
                    id
                    friends { id ... on Human { height } }
                    ... on Droid { appearsIn }
                }
            }
            hero { friends { appearsIn } }
        }
    "#);

    visit_fields(operation.data_field(), &mut assert_covered);
}
