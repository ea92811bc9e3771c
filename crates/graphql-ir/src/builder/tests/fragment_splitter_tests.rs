use crate::builder::tests::test_utils::build_ir;
use crate::builder::tests::test_utils::build_operation;
use crate::builder::tests::test_utils::field;
use crate::builder::tests::test_utils::implementation;
use crate::builder::tests::test_utils::implementations;
use crate::builder::tests::test_utils::interface;
use crate::builder::tests::test_utils::query_key;
use crate::builder::tests::test_utils::setup_schema;
use crate::ir::Fragment;
use indexmap::IndexSet;

fn type_set(type_names: &[&str]) -> IndexSet<String> {
    type_names.iter().map(|type_name| type_name.to_string()).collect()
}

#[test]
fn one_interface_per_type_condition_and_disjoint_implementations() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero {
            hero {
                ... on Droid { primaryFunction }
                ... on Human { homePlanet }
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    let droid = interface(hero.fragments(), "Droid");
    assert_eq!(droid.possible_types(), &type_set(&["Droid"]));
    let human = interface(hero.fragments(), "Human");
    assert_eq!(human.possible_types(), &type_set(&["Human"]));

    let hero_implementations = implementations(hero.fragments());
    assert_eq!(hero_implementations.len(), 2);

    let droid_hero = implementation(hero.fragments(), "DroidHero");
    assert_eq!(droid_hero.possible_types(), &type_set(&["Droid"]));
    assert_eq!(droid_hero.type_conditions(), &["Droid".to_string()]);
    field(droid_hero.fields(), "primaryFunction");

    let human_hero = implementation(hero.fragments(), "HumanHero");
    assert_eq!(human_hero.possible_types(), &type_set(&["Human"]));
    field(human_hero.fields(), "homePlanet");
}

#[test]
fn interfaces_come_before_implementations() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero {
            hero {
                ... on Droid { primaryFunction }
                ... on Human { homePlanet }
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    let kinds: Vec<bool> = hero.fragments().iter()
        .map(|fragment| matches!(fragment, Fragment::Interface(_)))
        .collect();
    assert_eq!(kinds, vec![true, true, false, false]);
}

#[test]
fn repeated_type_conditions_merge_into_one_interface() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero {
            hero {
                ... on Droid { primaryFunction }
                ... on Droid { name }
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    let droids: Vec<_> = hero.fragments().iter()
        .filter_map(Fragment::as_interface)
        .filter(|interface| interface.type_condition() == "Droid")
        .collect();
    assert_eq!(droids.len(), 1);

    let field_names: Vec<&str> = droids[0].fields().iter()
        .map(|field| field.response_name())
        .collect();
    assert_eq!(field_names, vec!["primaryFunction", "name"]);
    assert_eq!(droids[0].selection_keys(), &IndexSet::from([
        query_key("HeroQuery.Data.Hero.Droid"),
    ]));
}

#[test]
fn types_matching_no_fragment_form_an_other_implementation() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Search {
            search(text: "R2") {
                __typename
                ... on Character { name }
                ... on Droid { primaryFunction }
            }
        }
    "#);
    let search = field(operation.data_field().fields(), "search");

    let character_search = implementation(search.fragments(), "CharacterSearch");
    assert_eq!(character_search.possible_types(), &type_set(&["Human"]));
    assert_eq!(character_search.type_conditions(), &["Character".to_string()]);

    let character_droid_search = implementation(search.fragments(), "CharacterDroidSearch");
    assert_eq!(character_droid_search.possible_types(), &type_set(&["Droid"]));
    let field_names: Vec<&str> = character_droid_search.fields().iter()
        .map(|field| field.response_name())
        .collect();
    assert_eq!(field_names, vec!["__typename", "name", "primaryFunction"]);

    let other_search = implementation(search.fragments(), "OtherSearch");
    assert_eq!(other_search.possible_types(), &type_set(&["Starship"]));
    assert!(other_search.type_conditions().is_empty());
    let field_names: Vec<&str> = other_search.fields().iter()
        .map(|field| field.response_name())
        .collect();
    assert_eq!(field_names, vec!["__typename"]);
}

#[test]
fn implementation_keys_cover_the_site_and_every_member() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero {
            hero {
                ... on Character { name }
                ... on Droid { primaryFunction }
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    let implementation = implementation(hero.fragments(), "CharacterDroidHero");
    assert_eq!(implementation.selection_keys(), &IndexSet::from([
        query_key("HeroQuery.Data.Hero"),
        query_key("HeroQuery.Data.Hero.Character"),
        query_key("HeroQuery.Data.Hero.Droid"),
    ]));
}

#[test]
fn interface_possible_types_are_restricted_to_each_site() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Characters {
            hero { ...CharacterName }
            droid(id: "2001") { ...CharacterName }
        }

        fragment CharacterName on Character { name }
    "#);
    let data_fields = operation.data_field().fields();

    let hero = field(data_fields, "hero");
    assert_eq!(
        interface(hero.fragments(), "Character").possible_types(),
        &type_set(&["Human", "Droid"]),
    );

    let droid = field(data_fields, "droid");
    assert_eq!(
        interface(droid.fragments(), "Character").possible_types(),
        &type_set(&["Droid"]),
    );
}

#[test]
fn interface_view_of_named_fragment_has_no_implementations() {
    let schema = setup_schema();
    let document_ir = build_ir(&schema, r#"
        fragment HeroDetails on Character {
            friends {
                ... on Droid { primaryFunction }
            }
            ... on Droid { primaryFunction }
            ... on Human { homePlanet }
        }
    "#);
    let fragment = &document_ir.fragments[0];

    let selection_set = fragment.selection_set();
    assert!(implementations(selection_set.fragments()).is_empty());
    assert!(implementations(field(selection_set.fields(), "friends").fragments()).is_empty());

    let default_selection_set = fragment.default_selection_set();
    assert_eq!(implementations(default_selection_set.fragments()).len(), 2);
    implementation(default_selection_set.fragments(), "DroidHeroDetails");
    implementation(default_selection_set.fragments(), "HumanHeroDetails");
    implementation(
        field(default_selection_set.fields(), "friends").fragments(),
        "DroidFriends",
    );
}

#[test]
fn sites_without_fragments_have_no_implementations() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero {
            hero { name friends { name } }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    assert!(hero.fragments().is_empty());
    assert!(field(hero.fields(), "friends").fragments().is_empty());
}

#[test]
fn merged_fields_recompute_implementations() {
    let schema = setup_schema();
    let operation = build_operation(&schema, r#"
        query Hero {
            hero {
                friends { ... on Droid { primaryFunction } }
                ... on Human {
                    friends { ... on Human { homePlanet } }
                }
            }
        }
    "#);
    let hero = field(operation.data_field().fields(), "hero");

    let outer_friends = field(hero.fields(), "friends");
    let outer_names: IndexSet<&str> = implementations(outer_friends.fragments())
        .iter()
        .map(|implementation| implementation.name())
        .collect();
    assert_eq!(outer_names, IndexSet::from(["OtherFriends", "DroidFriends"]));

    // Inside `... on Human` the inherited `friends` merges with the
    // fragment's own, so its implementations reflect both interfaces.
    let human = interface(hero.fragments(), "Human");
    let human_friends = field(human.fields(), "friends");
    let human_names: IndexSet<&str> = implementations(human_friends.fragments())
        .iter()
        .map(|implementation| implementation.name())
        .collect();
    assert_eq!(human_names, IndexSet::from(["HumanFriends", "DroidFriends"]));
    assert_eq!(
        implementation(human_friends.fragments(), "HumanFriends").possible_types(),
        &type_set(&["Human"]),
    );
}
